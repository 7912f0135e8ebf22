mod cli;

use crate::cli::{LogFormat, CLI};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wormhole_gateway::App;
use wormhole_generator::RandomGenerator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    init_tracing(config.log_format);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(
        listen_addr = %listener.local_addr()?,
        fixed_code = ?config.fixed_code.as_ref().map(|code| code.as_str()),
        code_length = config.code_length,
        "starting gateway server"
    );

    let router = App::in_memory(
        RandomGenerator::with_length(config.code_length),
        config.fixed_code,
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Pretty => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
