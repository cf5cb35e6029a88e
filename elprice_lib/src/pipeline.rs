//! The fetch, extract, report, sleep loop.
//!
//! One cycle reads today's price body, pulls the price out of it, and hands
//! it to the sink. Between cycles the loop sleeps until the top of the next
//! hour. Fetch and extract failures skip the cycle without reporting
//! anything; sink failures end the loop with an error.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use energifyn_api::types::DateStamp;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::ElpriceError;
use crate::extract::PriceExtractor;
use crate::report::PriceSink;
use crate::schedule::{sleep_or_cancel, until_next_hour, Clock, SystemClock};

/// Source of raw price bodies, keyed by day.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch(&self, date: &DateStamp) -> Result<Vec<u8>, energifyn_api::Error>;
}

#[async_trait]
impl PriceSource for energifyn_api::Client {
    async fn fetch(&self, date: &DateStamp) -> Result<Vec<u8>, energifyn_api::Error> {
        self.get_price_body(&energifyn_api::PriceQuery::new(*date))
            .await
    }
}

/// A price read during one cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceReading {
    pub date: DateStamp,
    pub price: f64,
    pub fetched_at: DateTime<Local>,
}

/// Wires a price source, the extractor, and a sink into the hourly loop.
pub struct PricePipeline<S, K, C = SystemClock> {
    source: S,
    sink: K,
    clock: C,
    extractor: PriceExtractor,
    failure_delay: Option<Duration>,
    align_start: bool,
}

impl<S: PriceSource, K: PriceSink> PricePipeline<S, K, SystemClock> {
    pub fn new(source: S, sink: K) -> Self {
        Self {
            source,
            sink,
            clock: SystemClock,
            extractor: PriceExtractor::default(),
            failure_delay: None,
            align_start: false,
        }
    }
}

impl<S: PriceSource, K: PriceSink, C: Clock> PricePipeline<S, K, C> {
    /// Replaces the wall clock used for dates and hour boundaries.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> PricePipeline<S, K, C2> {
        PricePipeline {
            source: self.source,
            sink: self.sink,
            clock,
            extractor: self.extractor,
            failure_delay: self.failure_delay,
            align_start: self.align_start,
        }
    }

    pub fn with_extractor(mut self, extractor: PriceExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// After a skipped cycle, try again after `delay` instead of at the next hour.
    pub fn with_failure_delay(mut self, delay: Option<Duration>) -> Self {
        self.failure_delay = delay;
        self
    }

    /// Wait for the top of the hour before the first cycle.
    pub fn with_align_start(mut self, align_start: bool) -> Self {
        self.align_start = align_start;
        self
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Fetches today's body and extracts the price, without reporting it.
    pub async fn read_price(&self) -> Result<PriceReading, ElpriceError> {
        let fetched_at = self.clock.now();
        let date = DateStamp::from_date(&fetched_at);
        tracing::debug!("Fetching price for {}", date);

        let body = self.source.fetch(&date).await?;
        let price = self.extractor.extract(&body)?;
        Ok(PriceReading {
            date,
            price,
            fetched_at,
        })
    }

    /// Runs one fetch, extract, report sequence.
    pub async fn run_cycle(&self) -> Result<PriceReading, ElpriceError> {
        let reading = self.read_price().await?;
        tracing::info!("Current price = {:.2}", reading.price);
        self.sink.report(reading.price).await?;
        Ok(reading)
    }

    /// Runs cycles until `cancel` fires or the sink fails.
    ///
    /// Returns `Ok(())` only after cancellation. A cancelled token abandons
    /// an in-flight cycle.
    pub async fn run(&self, cancel: CancellationToken) -> Result<(), ElpriceError> {
        if self.align_start {
            let delay = until_next_hour(&self.clock.now());
            tracing::info!("Waiting {}s for the beginning of the next hour", delay.as_secs());
            if !sleep_or_cancel(delay, &cancel).await {
                tracing::info!("Price loop cancelled");
                return Ok(());
            }
        }

        loop {
            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    tracing::info!("Price loop cancelled");
                    return Ok(());
                }
                outcome = self.run_cycle() => outcome,
            };

            let delay = match outcome {
                Ok(_) => until_next_hour(&self.clock.now()),
                Err(e) if e.is_fatal() => {
                    tracing::error!("{}", e);
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!("Skipping this cycle: {}", e);
                    self.failure_delay
                        .unwrap_or_else(|| until_next_hour(&self.clock.now()))
                }
            };

            tracing::info!("Sleeping {}s", delay.as_secs());
            if !sleep_or_cancel(delay, &cancel).await {
                tracing::info!("Price loop cancelled");
                return Ok(());
            }
        }
    }
}
