//! Library layer for the hourly electricity price forwarder.
//!
//! Wraps the `energifyn_api` client with price extraction, the TCP price
//! reporter, hour-boundary scheduling, and the fetch-extract-report-sleep
//! pipeline that ties them together.

pub mod config;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod report;
pub mod schedule;

pub use energifyn_api;
pub use energifyn_api::types::DateStamp;

pub use config::ElpriceConfig;
pub use error::ElpriceError;
pub use extract::{extract_price, ExtractError, PriceExtractor, PRICE_MARKER};
pub use pipeline::{PricePipeline, PriceReading, PriceSource};
pub use report::{format_price_command, PriceReporter, PriceSink, ReportError};
pub use schedule::{seconds_until_next_hour, until_next_hour, Clock, SystemClock};
