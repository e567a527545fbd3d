pub mod broker;

pub use crate::domain::model::{
    Catalog, Credentials, EmptyResponse, Plan, Service, ServiceBindingResponse,
    ServiceDescriptor, ServiceInstanceResponse, ServiceMetadata,
};
pub use crate::domain::ports::ServiceBroker;
pub use crate::utils::error::Result;
