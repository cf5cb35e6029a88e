//! Query builder for the `/api/graph/consumptionprice` endpoint.

use url::Url;

use super::common::Query;
use crate::types::DateStamp;

/// Query for a single day's consumption price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuery {
    pub date: DateStamp,
}

impl PriceQuery {
    pub fn new(date: DateStamp) -> Self {
        Self { date }
    }

    /// Replaces the day being queried.
    pub fn with_date(mut self, date: DateStamp) -> Self {
        self.date = date;
        self
    }
}

impl Default for PriceQuery {
    /// Queries today's price on the local wall clock.
    fn default() -> Self {
        Self::new(DateStamp::today())
    }
}

impl Query for PriceQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("date", &self.date.to_query_value());
        url
    }
}
