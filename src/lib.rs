pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::http::{build_router, AppState};
pub use config::{BrokerConfig, CliConfig};
pub use crate::core::{broker::StaticBroker, ServiceBroker, ServiceDescriptor};
pub use utils::error::{BrokerError, Result};
