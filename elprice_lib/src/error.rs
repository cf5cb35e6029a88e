//! Error types for the library layer.

use std::fmt;

use crate::extract::ExtractError;
use crate::report::ReportError;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding extraction, reporting, and configuration failures.
#[derive(Debug)]
pub enum ElpriceError {
    /// Fetching the price body failed.
    Fetch(energifyn_api::Error),
    /// The body did not yield a price.
    Extract(ExtractError),
    /// The price could not be delivered to the report server.
    Report(ReportError),
    /// Configuration could not be resolved.
    Config(String),
}

impl ElpriceError {
    /// Fatal errors stop the daemon; the rest only cost the current cycle.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Report(_) | Self::Config(_))
    }
}

impl fmt::Display for ElpriceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(e) => write!(f, "Fetch error: {}", e),
            Self::Extract(e) => write!(f, "Extract error: {}", e),
            Self::Report(e) => write!(f, "Report error: {}", e),
            Self::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for ElpriceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fetch(e) => Some(e),
            Self::Extract(e) => Some(e),
            Self::Report(e) => Some(e),
            Self::Config(_) => None,
        }
    }
}

impl From<energifyn_api::Error> for ElpriceError {
    fn from(e: energifyn_api::Error) -> Self {
        Self::Fetch(e)
    }
}

impl From<ExtractError> for ElpriceError {
    fn from(e: ExtractError) -> Self {
        Self::Extract(e)
    }
}

impl From<ReportError> for ElpriceError {
    fn from(e: ReportError) -> Self {
        Self::Report(e)
    }
}
