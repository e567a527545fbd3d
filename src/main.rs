use clap::Parser;
use stub_broker::adapters::server;
use stub_broker::utils::logger;
use stub_broker::{BrokerConfig, BrokerError, CliConfig};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_logger(cli.verbose, cli.log_json);
    tracing::info!("Starting stub-broker");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match BrokerConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    tracing::info!(
        service = %config.service_name,
        plan = %config.service_plan,
        app_url = config.app_url.as_deref().unwrap_or_default(),
        "broker configured"
    );

    if let Err(e) = server::run(config).await {
        exit_with(e);
    }
}

fn exit_with(e: BrokerError) -> ! {
    tracing::error!("❌ stub-broker failed: {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());

    let exit_code = if e.is_config_error() { 1 } else { 2 };
    std::process::exit(exit_code);
}
