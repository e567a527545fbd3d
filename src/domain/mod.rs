// Domain layer: broker models and the broker port. No HTTP or config types here.

pub mod model;
pub mod ports;
