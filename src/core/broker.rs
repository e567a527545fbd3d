use crate::core::{
    Catalog, Plan, Service, ServiceBindingResponse, ServiceBroker, ServiceDescriptor,
    ServiceInstanceResponse, ServiceMetadata,
};

pub const DASHBOARD_TEXT: &str = "Dashboard";

/// Stateless broker: every answer is derived from the startup descriptor.
/// Nothing is recorded per instance or per binding.
#[derive(Debug, Clone)]
pub struct StaticBroker {
    descriptor: ServiceDescriptor,
    dashboard_url: String,
}

impl StaticBroker {
    pub fn new(descriptor: ServiceDescriptor, base_url: &str) -> Self {
        Self {
            descriptor,
            dashboard_url: format!("{}/dashboard", base_url),
        }
    }

    fn description(&self) -> String {
        format!("Shared service for {}", self.descriptor.service_name)
    }
}

impl ServiceBroker for StaticBroker {
    fn catalog(&self) -> Catalog {
        let name = &self.descriptor.service_name;
        let plan = &self.descriptor.service_plan_name;

        Catalog {
            services: vec![Service {
                id: format!("-service-{}", name),
                name: name.clone(),
                description: self.description(),
                bindable: true,
                tags: Vec::new(),
                metadata: Some(ServiceMetadata {
                    display_name: Some(name.clone()),
                    ..Default::default()
                }),
                requires: Vec::new(),
                plans: vec![Plan {
                    id: format!("plan-{}", plan),
                    name: plan.clone(),
                    description: self.description(),
                    free: true,
                }],
            }],
        }
    }

    fn provision(&self, instance_id: &str) -> ServiceInstanceResponse {
        tracing::debug!(instance_id, "provision requested");
        ServiceInstanceResponse {
            dashboard_url: self.dashboard_url.clone(),
        }
    }

    fn deprovision(&self, instance_id: &str) {
        tracing::debug!(instance_id, "deprovision requested");
    }

    fn bind(&self, instance_id: &str, binding_id: &str) -> ServiceBindingResponse {
        tracing::debug!(instance_id, binding_id, "bind requested");
        ServiceBindingResponse {
            credentials: self.descriptor.credentials.clone(),
            syslog_drain_url: None,
        }
    }

    fn unbind(&self, instance_id: &str, binding_id: &str) {
        tracing::debug!(instance_id, binding_id, "unbind requested");
    }

    fn dashboard(&self) -> &str {
        DASHBOARD_TEXT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn broker() -> StaticBroker {
        let mut credentials = serde_json::Map::new();
        credentials.insert("port".to_string(), json!("4000"));
        StaticBroker::new(
            ServiceDescriptor {
                service_name: "some-service-name".to_string(),
                service_plan_name: "shared".to_string(),
                credentials,
            },
            "http://broker.example.com",
        )
    }

    #[test]
    fn test_catalog_has_one_service_and_one_plan() {
        let catalog = broker().catalog();
        assert_eq!(catalog.services.len(), 1);

        let service = &catalog.services[0];
        assert_eq!(service.id, "-service-some-service-name");
        assert_eq!(service.name, "some-service-name");
        assert_eq!(service.description, "Shared service for some-service-name");
        assert!(service.bindable);
        assert_eq!(
            service.metadata.as_ref().and_then(|m| m.display_name.as_deref()),
            Some("some-service-name")
        );

        assert_eq!(service.plans.len(), 1);
        let plan = &service.plans[0];
        assert_eq!(plan.id, "plan-shared");
        assert_eq!(plan.name, "shared");
        assert_eq!(plan.description, "Shared service for some-service-name");
        assert!(plan.free);
    }

    #[test]
    fn test_provision_ignores_instance_id() {
        let broker = broker();
        let first = broker.provision("instance-1");
        let second = broker.provision("something-else");
        assert_eq!(first.dashboard_url, "http://broker.example.com/dashboard");
        assert_eq!(first, second);
    }

    #[test]
    fn test_bind_returns_same_credentials_for_every_binding() {
        let broker = broker();
        let a = broker.bind("instance-1", "binding-a");
        let b = broker.bind("instance-2", "binding-b");
        assert_eq!(a, b);
        assert_eq!(json!(a.credentials), json!({"port": "4000"}));
        assert!(a.syslog_drain_url.is_none());
    }

    #[test]
    fn test_dashboard_text() {
        assert_eq!(broker().dashboard(), "Dashboard");
    }
}
