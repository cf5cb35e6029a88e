//! Delivers the current price to the home server over plain TCP.
//!
//! One connection per price: connect, write a single CRLF-terminated line,
//! close. The server's reply, if any, is never read.

use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

/// Tag the server looks for at the start of a price line.
pub const PRICE_COMMAND_TAG: &str = "[[current price]]";

/// Address of the home server that stores prices.
pub const DEFAULT_SERVER_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(192, 168, 87, 188), 35000));

/// Errors from price reporting. Every variant ends the daemon.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("unable to establish connection to {addr}: {source}")]
    Connect { addr: SocketAddr, source: io::Error },
    #[error("failed to send price to {addr}: {source}")]
    Write { addr: SocketAddr, source: io::Error },
}

/// Destination for extracted prices.
#[async_trait]
pub trait PriceSink: Send + Sync {
    async fn report(&self, price: f64) -> Result<(), ReportError>;
}

/// Renders the wire line, e.g. `[[current price]] 12.340000\r\n`.
pub fn format_price_command(price: f64) -> String {
    format!("{} {:.6}\r\n", PRICE_COMMAND_TAG, price)
}

/// Fire-and-forget TCP reporter bound to one server endpoint.
#[derive(Debug, Clone)]
pub struct PriceReporter {
    endpoint: SocketAddr,
}

impl Default for PriceReporter {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_ADDR)
    }
}

impl PriceReporter {
    pub fn new(endpoint: SocketAddr) -> Self {
        Self { endpoint }
    }

    pub fn endpoint(&self) -> SocketAddr {
        self.endpoint
    }

    /// Opens a connection, writes the price line, and closes the connection.
    pub async fn send(&self, price: f64) -> Result<(), ReportError> {
        let addr = self.endpoint;
        tracing::info!("Establishing connection to {}", addr);
        let mut stream = TcpStream::connect(addr).await.map_err(|source| {
            tracing::error!("Unable to establish connection to {}: {}", addr, source);
            ReportError::Connect { addr, source }
        })?;
        tracing::debug!("Connected to {}", addr);

        let command = format_price_command(price);
        stream
            .write_all(command.as_bytes())
            .await
            .map_err(|source| ReportError::Write { addr, source })?;

        // The line is already written; a failed FIN only means the peer went away first.
        if let Err(e) = stream.shutdown().await {
            tracing::debug!("Shutdown of connection to {} failed: {}", addr, e);
        }
        tracing::info!("Connection to {} closed", addr);
        Ok(())
    }
}

#[async_trait]
impl PriceSink for PriceReporter {
    async fn report(&self, price: f64) -> Result<(), ReportError> {
        self.send(price).await
    }
}
