//! The `price` subcommand: fetch and print today's price without reporting it.

use anyhow::Result;
use clap::Args;
use elprice_lib::{PricePipeline, PriceReporter};

use super::common::ConnectionArgs;
use crate::output::{print_reading, OutputFormat};

#[derive(Args)]
pub struct PriceArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

pub async fn run(args: &PriceArgs, format: &OutputFormat) -> Result<()> {
    let config = args.connection.resolve()?;
    // The reporter is never invoked by read_price.
    let pipeline =
        PricePipeline::new(config.api_client(), PriceReporter::new(config.server_addr));

    let reading = pipeline.read_price().await?;
    print_reading(&reading, format);
    Ok(())
}
