//! Flags shared by every subcommand that talks to the API or the report server.

use anyhow::Result;
use clap::Args;
use elprice_lib::config::{parse_server_addr, secs_to_duration};
use elprice_lib::ElpriceConfig;

#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    /// Report server address as ip:port (default 192.168.87.188:35000)
    #[arg(long)]
    pub server: Option<String>,

    /// Base URL of the price API (default https://api.energifyn.dk)
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Largest accepted response body in bytes
    #[arg(long)]
    pub max_body_bytes: Option<usize>,

    /// HTTP request timeout in seconds, 0 waits forever
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl ConnectionArgs {
    /// Environment (and `.env`) first, then explicit flags on top.
    pub fn resolve(&self) -> Result<ElpriceConfig> {
        self.apply(ElpriceConfig::from_env()?)
    }

    pub fn apply(&self, mut config: ElpriceConfig) -> Result<ElpriceConfig> {
        if let Some(ref server) = self.server {
            config.server_addr = parse_server_addr(server)?;
        }
        if let Some(ref url) = self.api_base_url {
            config.api_base_url = url.clone();
        }
        if let Some(max) = self.max_body_bytes {
            config.max_body_bytes = max;
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout = secs_to_duration(secs);
        }
        Ok(config)
    }
}
