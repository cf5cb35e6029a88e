//! Locates the west-Denmark price inside a raw response body.
//!
//! The body is never deserialized. The first occurrence of a marker such as
//! `"currentWestPowerPrice":` is found and the numeric literal right after it
//! is parsed, which keeps working when unrelated parts of the payload change
//! shape.

use thiserror::Error;

/// Marker preceding the price in the consumption-price payload.
pub const PRICE_MARKER: &str = "\"currentWestPowerPrice\":";

/// Errors from price extraction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("marker {0} not found in response body")]
    MarkerNotFound(String),
    #[error("invalid number after marker: {0:?}")]
    InvalidNumber(String),
}

/// Extracts a numeric field that follows a fixed marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceExtractor {
    marker: String,
}

impl Default for PriceExtractor {
    fn default() -> Self {
        Self::new(PRICE_MARKER)
    }
}

impl PriceExtractor {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Parses the number immediately following the first marker occurrence.
    ///
    /// Leading ASCII whitespace after the marker is skipped. The token ends at
    /// the first byte that cannot be part of a decimal literal.
    pub fn extract(&self, body: &[u8]) -> Result<f64, ExtractError> {
        let marker = self.marker.as_bytes();
        let start = find_subslice(body, marker)
            .ok_or_else(|| ExtractError::MarkerNotFound(self.marker.clone()))?;

        let token = numeric_token(&body[start + marker.len()..]);
        let text = std::str::from_utf8(token)
            .map_err(|_| ExtractError::InvalidNumber(String::from_utf8_lossy(token).into_owned()))?;
        text.parse::<f64>()
            .map_err(|_| ExtractError::InvalidNumber(text.to_string()))
    }
}

/// Extracts the price using the default marker.
pub fn extract_price(body: &[u8]) -> Result<f64, ExtractError> {
    PriceExtractor::default().extract(body)
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn numeric_token(bytes: &[u8]) -> &[u8] {
    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    let start = i;
    while i < bytes.len() && is_numeric_byte(bytes[i]) {
        i += 1;
    }
    &bytes[start..i]
}

fn is_numeric_byte(b: u8) -> bool {
    b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_price_followed_by_other_fields() {
        let body = br#"{"currentWestPowerPrice":2.75,"other":1}"#;
        assert_eq!(extract_price(body), Ok(2.75));
    }

    #[test]
    fn extracts_price_at_end_of_object() {
        let body = br#"{"unit":"kr/kWh","currentWestPowerPrice":1.0421}"#;
        assert_eq!(extract_price(body), Ok(1.0421));
    }

    #[test]
    fn literal_values_are_exact() {
        for literal in ["0", "12.34", "-0.17", "3", "1234567.891", "0.000001", "2.5e-3", "7E2"] {
            let body = format!("{{\"currentWestPowerPrice\":{},\"x\":0}}", literal);
            let expected: f64 = literal.parse().unwrap();
            assert_eq!(extract_price(body.as_bytes()), Ok(expected), "literal {}", literal);
        }
    }

    #[test]
    fn skips_whitespace_after_marker() {
        let body = b"{\"currentWestPowerPrice\": \n 3.5 }";
        assert_eq!(extract_price(body), Ok(3.5));
    }

    #[test]
    fn first_occurrence_wins() {
        let body = br#"[{"currentWestPowerPrice":1.5},{"currentWestPowerPrice":9.9}]"#;
        assert_eq!(extract_price(body), Ok(1.5));
    }

    #[test]
    fn missing_marker_fails() {
        let body = br#"{"currentEastPowerPrice":2.75}"#;
        assert_eq!(
            extract_price(body),
            Err(ExtractError::MarkerNotFound(PRICE_MARKER.to_string()))
        );
    }

    #[test]
    fn empty_body_fails() {
        assert!(matches!(
            extract_price(b""),
            Err(ExtractError::MarkerNotFound(_))
        ));
    }

    #[test]
    fn marker_at_end_of_body_fails() {
        let body = br#"{"currentWestPowerPrice":"#;
        assert_eq!(
            extract_price(body),
            Err(ExtractError::InvalidNumber(String::new()))
        );
    }

    #[test]
    fn null_value_fails() {
        let body = br#"{"currentWestPowerPrice":null}"#;
        assert_eq!(
            extract_price(body),
            Err(ExtractError::InvalidNumber(String::new()))
        );
    }

    #[test]
    fn malformed_number_fails() {
        let body = br#"{"currentWestPowerPrice":1.2.3}"#;
        assert_eq!(
            extract_price(body),
            Err(ExtractError::InvalidNumber("1.2.3".to_string()))
        );
    }

    #[test]
    fn non_utf8_bytes_elsewhere_are_ignored() {
        let mut body = vec![0xff, 0xfe, b' '];
        body.extend_from_slice(br#""currentWestPowerPrice":4.25"#);
        body.push(0xc0);
        assert_eq!(extract_price(&body), Ok(4.25));
    }

    #[test]
    fn custom_marker() {
        let extractor = PriceExtractor::new("\"currentEastPowerPrice\":");
        let body = br#"{"currentWestPowerPrice":2.75,"currentEastPowerPrice":2.61}"#;
        assert_eq!(extractor.extract(body), Ok(2.61));
        assert_eq!(extractor.marker(), "\"currentEastPowerPrice\":");
    }

    #[test]
    fn error_display() {
        let err = ExtractError::MarkerNotFound(PRICE_MARKER.to_string());
        assert!(err.to_string().contains("not found"));

        let err = ExtractError::InvalidNumber("abc".to_string());
        assert!(err.to_string().contains("abc"));
    }
}
