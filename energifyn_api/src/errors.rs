//! Error types for the API client.

/// Errors that can occur when fetching the consumption price.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unreadable body).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body grew past the configured cap.
    #[error("Response body exceeded {limit} bytes")]
    BodyTooLarge { limit: usize },
}
