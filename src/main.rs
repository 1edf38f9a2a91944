use clap::Parser;
use crypto_price_tracker::{
    providers::CoinGeckoProvider, resolve_coins, Cli, HistoryLog, Presenter, Tracker,
};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    // Presenter already prints cycle warnings; RUST_LOG opts into more
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    let mut presenter = Presenter::stdout(cli.color());

    let resolution = match resolve_coins(&cli.coins) {
        Ok(resolution) => resolution,
        Err(e) => {
            tracing::debug!(error = %e, "Refusing to start");
            if let Err(e) = presenter.fatal(&format!("{}. Exiting.", e)) {
                tracing::warn!(error = %e, "Failed to write startup error");
            }
            return ExitCode::FAILURE;
        }
    };

    let config = cli.tracker_config();
    let provider = match CoinGeckoProvider::new(config.timeout) {
        Ok(provider) => provider,
        Err(e) => {
            if let Err(e) = presenter.fatal(&format!("Failed to create CoinGecko client: {}", e)) {
                tracing::warn!(error = %e, "Failed to write startup error");
            }
            return ExitCode::FAILURE;
        }
    };

    let ids = resolution.identifiers().to_vec();
    let history = HistoryLog::from_path(cli.csv_path(), &ids);

    if let Err(e) = presenter.startup(&resolution) {
        tracing::warn!(error = %e, "Failed to write startup banner");
    }

    let tracker = Tracker::new(Arc::new(provider), presenter, history, ids, config);
    tracker.run(shutdown_signal()).await;

    ExitCode::SUCCESS
}
