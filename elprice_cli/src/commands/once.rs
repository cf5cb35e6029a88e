//! The `once` subcommand: a single fetch, extract, report cycle.

use anyhow::Result;
use clap::Args;
use elprice_lib::{PricePipeline, PriceReporter};

use super::common::ConnectionArgs;
use crate::output::{print_reading, OutputFormat};

#[derive(Args)]
pub struct OnceArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

pub async fn run(args: &OnceArgs, format: &OutputFormat) -> Result<()> {
    let config = args.connection.resolve()?;
    let pipeline =
        PricePipeline::new(config.api_client(), PriceReporter::new(config.server_addr));

    let reading = pipeline.run_cycle().await?;
    print_reading(&reading, format);
    Ok(())
}
