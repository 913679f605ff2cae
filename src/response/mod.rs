// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response normalization and parsing for Huum API payloads.
//!
//! The Huum service wraps every JSON payload in a single pair of
//! parentheses, optionally followed by a semicolon: `({"key":"value"});`.
//! [`ApiResponse`] strips that wrapping and parses the remainder into a
//! generic [`serde_json::Value`]; the submodules turn generic values into
//! typed entities, reading fields defensively because the service mixes
//! field shapes freely between firmware versions.

mod login;
mod session;
mod statistics;
mod status;

pub use login::LoginResponse;
pub use session::{StartResponse, StopResponse};
pub use statistics::TemperatureReading;
pub use status::StatusResponse;

use crate::error::ParseError;

/// Raw response body from a Huum API call.
///
/// # Examples
///
/// ```
/// use huumr_lib::response::ApiResponse;
///
/// let response = ApiResponse::new(r#"({"temperature": 56});"#.to_string());
/// let value = response.to_value().unwrap();
/// assert_eq!(value["temperature"], 56);
/// ```
#[derive(Debug, Clone)]
pub struct ApiResponse {
    body: String,
}

impl ApiResponse {
    /// Creates a new response with the given body.
    #[must_use]
    pub fn new(body: String) -> Self {
        Self { body }
    }

    /// Returns the raw response body, wrapping included.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Unwraps the JSONP-style wrapping and parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the unwrapped body is not valid JSON.
    /// Malformed payloads are not transient; this is never retried.
    pub fn to_value(&self) -> Result<serde_json::Value, ParseError> {
        serde_json::from_str(unwrap_jsonp(&self.body)).map_err(Into::into)
    }
}

/// Strips the Huum API's JSONP-style wrapping from a response body.
///
/// Removes one leading `(` and one trailing `);` or `)` if and only if
/// both delimiters are present; otherwise the body is returned unchanged,
/// since some error responses arrive as bare JSON.
///
/// # Examples
///
/// ```
/// use huumr_lib::response::unwrap_jsonp;
///
/// assert_eq!(unwrap_jsonp(r#"({"a":1});"#), r#"{"a":1}"#);
/// assert_eq!(unwrap_jsonp(r#"({"a":1})"#), r#"{"a":1}"#);
/// assert_eq!(unwrap_jsonp(r#"{"a":1}"#), r#"{"a":1}"#);
/// ```
#[must_use]
pub fn unwrap_jsonp(body: &str) -> &str {
    let trimmed = body.trim();
    if let Some(inner) = trimmed.strip_prefix('(') {
        if let Some(inner) = inner.strip_suffix(");") {
            return inner;
        }
        if let Some(inner) = inner.strip_suffix(')') {
            return inner;
        }
    }
    trimmed
}

/// Reads a JSON value as a string, accepting numbers too.
///
/// The Huum API switches between `"user_id": "123"` and `"user_id": 123`
/// depending on endpoint and firmware.
pub(crate) fn coerce_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads a JSON value as an unsigned integer, accepting numeric strings too.
pub(crate) fn coerce_u64(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_string_accepts_numbers() {
        assert_eq!(
            coerce_string(&serde_json::json!("abc")),
            Some("abc".to_string())
        );
        assert_eq!(coerce_string(&serde_json::json!(42)), Some("42".to_string()));
        assert_eq!(coerce_string(&serde_json::json!(null)), None);
    }

    #[test]
    fn coerce_u64_accepts_numeric_strings() {
        assert_eq!(coerce_u64(&serde_json::json!(17)), Some(17));
        assert_eq!(coerce_u64(&serde_json::json!("17")), Some(17));
        assert_eq!(coerce_u64(&serde_json::json!("unknown")), None);
    }

    #[test]
    fn unwrap_with_semicolon() {
        assert_eq!(unwrap_jsonp(r#"({"key":"value"});"#), r#"{"key":"value"}"#);
    }

    #[test]
    fn unwrap_without_semicolon() {
        assert_eq!(unwrap_jsonp(r#"({"key":"value"})"#), r#"{"key":"value"}"#);
    }

    #[test]
    fn bare_body_passes_through() {
        assert_eq!(unwrap_jsonp(r#"{"error":"bad"}"#), r#"{"error":"bad"}"#);
    }

    #[test]
    fn unbalanced_wrapping_passes_through() {
        // Leading paren without a closing one must stay untouched.
        assert_eq!(unwrap_jsonp(r#"({"key":"value"}"#), r#"({"key":"value"}"#);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(unwrap_jsonp("  ({\"a\":1});\n"), r#"{"a":1}"#);
    }

    #[test]
    fn round_trip_equals_plain_parse() {
        let bodies = [
            r#"{"key":"value"}"#,
            r#"{"nested":{"a":[1,2,3]}}"#,
            r#"[{"timestamp":1700000000,"temperature":72}]"#,
        ];
        for body in bodies {
            let plain: serde_json::Value = serde_json::from_str(body).unwrap();
            for wrapped in [format!("({body})"), format!("({body});"), body.to_string()] {
                let value = ApiResponse::new(wrapped).to_value().unwrap();
                assert_eq!(value, plain);
            }
        }
    }

    #[test]
    fn malformed_body_fails() {
        let response = ApiResponse::new("(not json);".to_string());
        assert!(response.to_value().is_err());
    }

    #[test]
    fn body_accessor_keeps_wrapping() {
        let response = ApiResponse::new("({})".to_string());
        assert_eq!(response.body(), "({})");
    }
}
