// Adapters layer: wiring the broker to the outside world.

pub mod http;
pub mod server;
