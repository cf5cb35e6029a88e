//! The `run` subcommand: the hourly fetch-and-report daemon.

use anyhow::Result;
use clap::Args;
use elprice_lib::config::secs_to_duration;
use elprice_lib::{ElpriceConfig, PricePipeline, PriceReporter};
use tokio::signal;
use tokio_util::sync::CancellationToken;

use super::common::ConnectionArgs;

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// After a failed fetch, retry after this many seconds instead of waiting for the next hour
    #[arg(long)]
    pub failure_delay_secs: Option<u64>,

    /// Wait for the top of the hour before the first fetch
    #[arg(long)]
    pub align_start: bool,
}

impl RunArgs {
    fn resolve(&self) -> Result<ElpriceConfig> {
        let mut config = self.connection.resolve()?;
        if let Some(secs) = self.failure_delay_secs {
            config.failure_delay = secs_to_duration(secs);
        }
        if self.align_start {
            config.align_start = true;
        }
        Ok(config)
    }
}

pub async fn run(args: &RunArgs) -> Result<()> {
    let config = args.resolve()?;
    tracing::info!(
        "Reporting prices from {} to {}",
        config.api_base_url,
        config.server_addr
    );

    let pipeline = PricePipeline::new(config.api_client(), PriceReporter::new(config.server_addr))
        .with_failure_delay(config.failure_delay)
        .with_align_start(config.align_start);

    let cancel = CancellationToken::new();
    tokio::spawn(await_shutdown(cancel.clone()));

    pipeline.run(cancel).await?;
    tracing::info!("Stopped");
    Ok(())
}

/// Cancels `cancel` on Ctrl+C or SIGTERM.
async fn await_shutdown(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Unable to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Unable to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }

    cancel.cancel();
}
