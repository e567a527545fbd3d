use crate::domain::model::{Catalog, ServiceBindingResponse, ServiceInstanceResponse};

/// Operations of the service broker API, independent of the HTTP layer.
///
/// Implementations are shared across request tasks, so every method takes
/// `&self` and must be safe to call concurrently.
pub trait ServiceBroker: Send + Sync {
    fn catalog(&self) -> Catalog;

    fn provision(&self, instance_id: &str) -> ServiceInstanceResponse;

    fn deprovision(&self, instance_id: &str);

    fn bind(&self, instance_id: &str, binding_id: &str) -> ServiceBindingResponse;

    fn unbind(&self, instance_id: &str, binding_id: &str);

    fn dashboard(&self) -> &str;
}
