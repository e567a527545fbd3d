use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "stub-broker")]
#[command(about = "A stub service broker for the Cloud Foundry service broker API")]
pub struct CliConfig {
    #[arg(long, env = "BROKER_CONFIG", help = "TOML file overriding environment settings")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Listen address, overrides HOST")]
    pub host: Option<String>,

    #[arg(long, help = "Listen port, overrides PORT")]
    pub port: Option<u16>,

    #[arg(long, help = "Base URL of this broker, overrides VCAP_APPLICATION")]
    pub app_url: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides() {
        let cli = CliConfig::try_parse_from([
            "stub-broker",
            "--port",
            "8080",
            "--app-url",
            "http://localhost:8080",
            "--verbose",
        ])
        .unwrap();
        assert_eq!(cli.port, Some(8080));
        assert_eq!(cli.app_url.as_deref(), Some("http://localhost:8080"));
        assert!(cli.verbose);
        assert!(!cli.log_json);
        assert!(cli.host.is_none());
    }

    #[test]
    fn test_rejects_non_numeric_port() {
        assert!(CliConfig::try_parse_from(["stub-broker", "--port", "http"]).is_err());
    }
}
