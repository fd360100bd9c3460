use clap::Parser;
use medication_registry::{serve, RegistryConfig};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// In-memory medication registry served over HTTP.
#[derive(Debug, Parser)]
#[command(name = "medication-registry", version, about)]
struct Cli {
    /// Address to bind
    #[arg(long, env = "MEDREG_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "MEDREG_PORT", default_value_t = 8080)]
    port: u16,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "medication_registry=info,tower_http=info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = RegistryConfig::new().with_host(cli.host).with_port(cli.port);

    if let Err(e) = serve(config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
