use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrokerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

impl BrokerError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            BrokerError::ConfigError { .. }
                | BrokerError::MissingConfigError { .. }
                | BrokerError::InvalidConfigValueError { .. }
                | BrokerError::ConfigValidationError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BrokerError::IoError(e) => format!("Server I/O failed: {}", e),
            BrokerError::ConfigError { message } => format!("Configuration problem: {}", message),
            BrokerError::MissingConfigError { field } => {
                format!("Required setting {} is not set", field)
            }
            BrokerError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting {} is invalid: {}", field, reason)
            }
            BrokerError::ConfigValidationError { field, message } => {
                format!("Setting {} failed validation: {}", field, message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            BrokerError::IoError(_) => {
                "Check that the bind address is free and the process may listen on it".to_string()
            }
            BrokerError::MissingConfigError { field } if field == "VCAP_APPLICATION" => {
                "Run the broker on the platform, or pass --app-url for a local run".to_string()
            }
            BrokerError::MissingConfigError { field } => {
                format!("Set {} in the environment or the config file", field)
            }
            BrokerError::InvalidConfigValueError { field, .. } if field == "CREDENTIALS" => {
                "CREDENTIALS must be a JSON object, e.g. {\"port\": \"4000\"}".to_string()
            }
            BrokerError::InvalidConfigValueError { field, .. }
            | BrokerError::ConfigValidationError { field, .. } => {
                format!("Fix the value of {} and restart", field)
            }
            BrokerError::ConfigError { .. } => {
                "Review the broker configuration file and environment".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BrokerError>;
