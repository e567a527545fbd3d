use crate::config::BrokerConfig;
use crate::core::Credentials;
use crate::utils::error::{BrokerError, Result};
use serde::Deserialize;

pub const DEFAULT_SERVICE_NAME: &str = "some-service-name";
pub const DEFAULT_SERVICE_PLAN: &str = "shared";
pub const DEFAULT_CREDENTIALS: &str = r#"{"port": "4000"}"#;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// The part of the platform's `VCAP_APPLICATION` document the broker reads.
#[derive(Debug, Deserialize)]
struct VcapApplication {
    #[serde(default)]
    application_uris: Vec<String>,
}

impl BrokerConfig {
    /// Builds the configuration from a variable lookup. Empty values count
    /// as unset, matching how the platform clears variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let service_name = get("SERVICE_NAME").unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());
        let service_plan = get("SERVICE_PLAN").unwrap_or_else(|| DEFAULT_SERVICE_PLAN.to_string());
        let credentials = parse_credentials(
            &get("CREDENTIALS").unwrap_or_else(|| DEFAULT_CREDENTIALS.to_string()),
        )?;

        let app_url = match get("VCAP_APPLICATION") {
            Some(raw) => Some(app_url_from_vcap(&raw)?),
            None => None,
        };

        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| BrokerError::InvalidConfigValueError {
                    field: "PORT".to_string(),
                    value: raw.clone(),
                    reason: format!("not a valid port: {}", e),
                })?,
            None => DEFAULT_PORT,
        };

        let mut config = Self {
            service_name,
            service_plan,
            credentials,
            app_url,
            host,
            port,
        };
        config.normalize_app_url();
        Ok(config)
    }
}

pub fn parse_credentials(raw: &str) -> Result<Credentials> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| BrokerError::InvalidConfigValueError {
            field: "CREDENTIALS".to_string(),
            value: raw.to_string(),
            reason: format!("not valid JSON: {}", e),
        })?;

    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(BrokerError::InvalidConfigValueError {
            field: "CREDENTIALS".to_string(),
            value: raw.to_string(),
            reason: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
    }
}

/// Base URL of the app: `http://` plus the first route the platform assigned.
pub fn app_url_from_vcap(raw: &str) -> Result<String> {
    let vcap: VcapApplication =
        serde_json::from_str(raw).map_err(|e| BrokerError::InvalidConfigValueError {
            field: "VCAP_APPLICATION".to_string(),
            value: raw.to_string(),
            reason: format!("not valid JSON: {}", e),
        })?;

    let uri = vcap
        .application_uris
        .into_iter()
        .next()
        .ok_or_else(|| BrokerError::InvalidConfigValueError {
            field: "VCAP_APPLICATION".to_string(),
            value: raw.to_string(),
            reason: "application_uris is empty".to_string(),
        })?;

    Ok(format!("http://{}", uri))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = BrokerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.service_name, "some-service-name");
        assert_eq!(config.service_plan, "shared");
        assert_eq!(json!(config.credentials), json!({"port": "4000"}));
        assert_eq!(config.app_url, None);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = BrokerConfig::from_lookup(lookup(&[
            ("SERVICE_NAME", ""),
            ("SERVICE_PLAN", ""),
            ("CREDENTIALS", ""),
        ]))
        .unwrap();
        assert_eq!(config.service_name, "some-service-name");
        assert_eq!(config.service_plan, "shared");
        assert_eq!(json!(config.credentials), json!({"port": "4000"}));
    }

    #[test]
    fn test_reads_all_variables() {
        let config = BrokerConfig::from_lookup(lookup(&[
            ("SERVICE_NAME", "redis"),
            ("SERVICE_PLAN", "small"),
            ("CREDENTIALS", r#"{"host": "10.0.0.5", "port": 6379}"#),
            (
                "VCAP_APPLICATION",
                r#"{"application_uris": ["redis-broker.apps.example.com", "other.example.com"]}"#,
            ),
            ("PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(config.service_name, "redis");
        assert_eq!(config.service_plan, "small");
        assert_eq!(
            json!(config.credentials),
            json!({"host": "10.0.0.5", "port": 6379})
        );
        assert_eq!(
            config.app_url.as_deref(),
            Some("http://redis-broker.apps.example.com")
        );
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_vcap_uri_trailing_slash_trimmed() {
        let config = BrokerConfig::from_lookup(lookup(&[(
            "VCAP_APPLICATION",
            r#"{"application_uris": ["broker.apps.example.com/"]}"#,
        )]))
        .unwrap();
        assert_eq!(config.app_url.as_deref(), Some("http://broker.apps.example.com"));
    }

    #[test]
    fn test_malformed_credentials_fail_fast() {
        let err = BrokerConfig::from_lookup(lookup(&[("CREDENTIALS", "{port: 4000")])).unwrap_err();
        match err {
            BrokerError::InvalidConfigValueError { field, .. } => assert_eq!(field, "CREDENTIALS"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_non_object_credentials_rejected() {
        let err = parse_credentials(r#"["port", "4000"]"#).unwrap_err();
        assert!(err.to_string().contains("expected a JSON object, got an array"));
    }

    #[test]
    fn test_vcap_without_uris_rejected() {
        let err = app_url_from_vcap(r#"{"application_uris": []}"#).unwrap_err();
        assert!(err.to_string().contains("application_uris is empty"));

        let err = app_url_from_vcap("not json").unwrap_err();
        assert!(err.to_string().contains("VCAP_APPLICATION"));
    }

    #[test]
    fn test_invalid_port_rejected() {
        let err = BrokerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
