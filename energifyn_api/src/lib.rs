mod client;
mod errors;
mod query;
pub mod types;
pub mod user_agent;
pub use self::client::{Client, DEFAULT_MAX_BODY_BYTES, DEFAULT_TIMEOUT};
pub use self::errors::Error;
pub use self::query::{PriceQuery, Query};
