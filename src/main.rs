use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use passport_board::client::{FileSnapshotSource, HttpMintClient, HttpOracleClient};
use passport_board::config::{AppConfig, Args, Command};
use passport_board::handlers::{Dashboard, DashboardSettings};
use passport_board::util::display::print_dashboard;
use passport_board::wallet::{FileStore, WalletSession};

type BoardDashboard = Dashboard<FileSnapshotSource, HttpMintClient, HttpOracleClient, FileStore>;

fn init_tracing(log_level: &str) -> Result<()> {
    // Create logs directory if it doesn't exist
    std::fs::create_dir_all("logs")?;

    let file_appender = tracing_appender::rolling::daily("logs", "passport-board.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .compact();

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .json()
        .with_current_span(false)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    // Keep the file writer alive for the whole process
    std::mem::forget(guard);

    Ok(())
}

fn build_dashboard(config: &AppConfig) -> Result<BoardDashboard> {
    let source = FileSnapshotSource::new(&config.source.snapshot_path);
    let mint = HttpMintClient::new(&config.services.mint_url, config.request_timeout())
        .context("Failed to create mint client")?;
    let oracle = HttpOracleClient::new(
        &config.services.oracle_url,
        &config.services.chain_id,
        &config.services.application_id,
        config.request_timeout(),
    )
    .context("Failed to create oracle client")?;
    let session = WalletSession::restore(FileStore::new(&config.wallet.store_path))
        .context("Failed to load wallet session")?;

    let settings = DashboardSettings {
        board_size: config.dashboard.leaderboard_size,
        poll_interval: config.poll_interval(),
        refresh_delay: config.refresh_delay(),
    };

    Ok(Dashboard::new(source, mint, oracle, session, settings))
}

async fn watch(mut dashboard: BoardDashboard) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => info!("🛑 Shutdown signal received"),
            Err(e) => error!("Failed to listen for shutdown signal: {}", e),
        }
        let _ = shutdown_tx.send(());
    });

    info!("Press Ctrl+C to stop");
    let board = tokio::spawn(async move { dashboard.run(shutdown_rx).await });
    board.await.context("Dashboard task panicked")?
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let config = AppConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    info!("🛂 Passport Board");
    info!("   Snapshot: {}", config.source.snapshot_path);
    info!("   Mint API: {}", config.services.mint_url);
    info!("   Oracle:   {}", config.services.oracle_url);

    let mut dashboard = build_dashboard(&config)?;

    match args.command() {
        Command::Watch => watch(dashboard).await?,
        Command::Show => {
            let view = dashboard.refresh().await;
            print_dashboard(&view);
        }
        Command::Connect { address, kind } => {
            let address = address.unwrap_or_else(|| config.wallet.default_address.clone());
            if address.trim().is_empty() {
                bail!("No address given and wallet.default_address is not configured");
            }
            dashboard
                .session_mut()
                .connect(&address, kind)
                .context("Failed to connect wallet")?;
            let view = dashboard.refresh().await;
            print_dashboard(&view);
        }
        Command::Disconnect => {
            dashboard
                .session_mut()
                .disconnect()
                .context("Failed to disconnect wallet")?;
        }
        Command::Mint => {
            dashboard.refresh().await;
            match dashboard.mint_passport().await {
                Ok(_) => print_dashboard(&dashboard.view()),
                Err(e) => {
                    warn!("Mint failed: {}", e);
                    bail!("Mint failed: {} (ensure the mint API is running at {})", e, config.services.mint_url);
                }
            }
        }
        Command::Analyze => {
            dashboard.refresh().await;
            match dashboard.request_score().await {
                Ok(report) => {
                    info!(score = ?report.score, method = ?report.method, "Oracle analysis complete");
                    print_dashboard(&dashboard.view());
                }
                Err(e) => {
                    warn!("Oracle request failed: {}", e);
                    bail!("Oracle request failed: {}", e);
                }
            }
        }
    }

    Ok(())
}
