use anyhow::Context;
use clap::Parser;
use mb_config::BridgeConfig;

mod cli;
mod commands;
mod error;
mod pipeline;
mod receiver;
mod server;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("milestone-bridge error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.log_level(), cli.log_format)?;

    let config = BridgeConfig::load_with_dotenv(cli.config.as_deref())
        .context("failed to load configuration")?;

    match cli.into_command() {
        cli::Commands::Serve(args) => commands::serve::handle(args, config).await,
        cli::Commands::Complete(args) => commands::complete::handle(args, &config).await,
        cli::Commands::CheckConfig => commands::check_config::handle(&config),
    }
}

fn init_tracing(level: &str, format: cli::LogFormat) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("MILESTONE_BRIDGE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match format {
        cli::LogFormat::Text => builder.try_init(),
        cli::LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}
