mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "elprice")]
#[command(about = "Forward the hourly Energi Fyn electricity price to a TCP server")]
struct Cli {
    /// Output format for printed readings: text or json
    #[arg(long, default_value = "text", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and report the price every hour until stopped
    Run(commands::run::RunArgs),
    /// Fetch and report the price once
    Once(commands::once::OnceArgs),
    /// Fetch the price and print it without reporting
    Price(commands::price::PriceArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("elprice=info".parse()?)
                .add_directive("elprice_lib=info".parse()?)
                .add_directive("energifyn_api=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Text,
    };

    match &cli.command {
        Commands::Run(args) => commands::run::run(args).await?,
        Commands::Once(args) => commands::once::run(args, &format).await?,
        Commands::Price(args) => commands::price::run(args, &format).await?,
    }

    Ok(())
}
