//! vibe-trade HTTP server

use clap::Parser;
use tracing::{info, warn};
use vibe_server::{AppState, ServerConfig, app};
use vibe_utils::{LogFormat, init_tracing};

#[derive(Parser, Debug)]
#[command(name = "vibe-server")]
#[command(about = "Payment-gated trading analysis API", long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Log output format: pretty or json
    #[arg(long, env = "LOG_FORMAT", default_value = "pretty")]
    log_format: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_tracing("info,tower_http=info", LogFormat::parse(&args.log_format));

    let config = ServerConfig::from_env(args.port)?;
    info!(
        environment = %config.service.environment,
        network = %config.payment.network,
        pay_to = %config.payment.pay_to,
        paying_upstream = config.payment.can_pay(),
        "Starting vibe-trade"
    );

    let state = AppState::from_config(&config)?;
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Could not install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
