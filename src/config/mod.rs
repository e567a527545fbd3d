pub mod cli;
pub mod env;
pub mod toml_config;

pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::{Credentials, ServiceDescriptor};
use crate::utils::error::{BrokerError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_required_field, validate_url, Validate,
};
use std::net::{IpAddr, SocketAddr};

/// Startup configuration. Built once, validated, then only read.
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    pub service_name: String,
    pub service_plan: String,
    pub credentials: Credentials,
    /// Public base URL without trailing slash.
    pub app_url: Option<String>,
    pub host: String,
    pub port: u16,
}

impl BrokerConfig {
    /// Environment, then the optional TOML file, then CLI flags; validated.
    pub fn load(cli: &CliConfig) -> Result<Self> {
        Self::load_with(cli, |key| std::env::var(key).ok())
    }

    /// `VCAP_APPLICATION` is only read when neither the file nor the CLI
    /// supplies the base URL, so a broken platform value cannot block an
    /// explicit override.
    pub fn load_with<F>(cli: &CliConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match &cli.config {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading config file");
                Some(TomlConfig::from_file(path)?)
            }
            None => None,
        };

        let url_overridden = cli.app_url.is_some()
            || file
                .as_ref()
                .and_then(|file| file.server.as_ref())
                .is_some_and(|server| server.app_url.is_some());

        let mut config = Self::from_lookup(|key| {
            if url_overridden && key == "VCAP_APPLICATION" {
                return None;
            }
            lookup(key)
        })?;

        if let Some(file) = file {
            config.apply_file(file);
        }
        config.apply_cli(cli);

        config.validate()?;
        Ok(config)
    }

    pub fn apply_file(&mut self, file: TomlConfig) {
        if let Some(service) = file.service {
            if let Some(name) = service.name {
                self.service_name = name;
            }
            if let Some(plan) = service.plan {
                self.service_plan = plan;
            }
            if let Some(credentials) = service.credentials {
                self.credentials = credentials;
            }
        }
        if let Some(server) = file.server {
            if let Some(host) = server.host {
                self.host = host;
            }
            if let Some(port) = server.port {
                self.port = port;
            }
            if let Some(app_url) = server.app_url {
                self.app_url = Some(app_url);
            }
        }
        self.normalize_app_url();
    }

    pub fn apply_cli(&mut self, cli: &CliConfig) {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(app_url) = &cli.app_url {
            self.app_url = Some(app_url.clone());
        }
        self.normalize_app_url();
    }

    pub(crate) fn normalize_app_url(&mut self) {
        if let Some(url) = self.app_url.as_mut() {
            let trimmed = url.trim_end_matches('/').len();
            url.truncate(trimmed);
        }
    }

    /// Base URL; its absence is reported against `VCAP_APPLICATION`, the
    /// platform's source for it.
    pub fn app_url(&self) -> Result<&str> {
        validate_required_field("VCAP_APPLICATION", &self.app_url).map(String::as_str)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| BrokerError::InvalidConfigValueError {
                field: "HOST".to_string(),
                value: self.host.clone(),
                reason: format!("not an IP address: {}", e),
            })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn descriptor(&self) -> ServiceDescriptor {
        ServiceDescriptor {
            service_name: self.service_name.clone(),
            service_plan_name: self.service_plan.clone(),
            credentials: self.credentials.clone(),
        }
    }
}

impl Validate for BrokerConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("SERVICE_NAME", &self.service_name)?;
        validate_non_empty_string("SERVICE_PLAN", &self.service_plan)?;
        validate_url("app_url", self.app_url()?)?;
        self.bind_addr()?;

        tracing::debug!("broker configuration validation passed");
        Ok(())
    }
}
