// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `HuumR` library.
//!
//! This module provides the error hierarchy for failures across the library:
//! value validation, API communication, response parsing, device selection,
//! and credential storage. [`ApiError::classify`] maps raw HTTP outcomes to
//! semantic error kinds without performing any I/O.

use thiserror::Error;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when talking to
/// the Huum cloud API.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error returned by or on the way to the Huum API.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Error occurred while parsing a response body.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred while resolving a target device.
    #[error("selection error: {0}")]
    Selection(#[from] SelectionError),

    /// Error reported by the injected credential store.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client initialization failed: {0}")]
    Init(#[from] reqwest::Error),

    /// No stored credentials are available; the caller must log in first.
    #[error("not authenticated")]
    NotAuthenticated,
}

impl Error {
    /// Returns the process exit code class for this error.
    ///
    /// The surrounding CLI maps errors to exit codes: `1` for
    /// validation/user errors (authentication required, bad temperature,
    /// ambiguous or unknown device), `2` for API or device-communication
    /// errors, `3` for local-storage errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use huumr_lib::error::{ApiError, Error};
    ///
    /// assert_eq!(Error::NotAuthenticated.exit_code(), 1);
    /// assert_eq!(Error::Api(ApiError::RateLimited).exit_code(), 2);
    /// ```
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Value(_) | Self::Selection(_) | Self::NotAuthenticated => 1,
            Self::Api(api) => match api {
                ApiError::AuthenticationFailed => 1,
                _ => 2,
            },
            Self::Parse(_) | Self::Init(_) => 2,
            Self::Storage(_) => 3,
        }
    }
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },
}

/// Semantic error kinds for Huum API calls.
///
/// Produced by [`ApiError::classify`] from an HTTP status and parsed body,
/// or by [`ApiError::from_transport`] for connection-level failures.
/// Classification is pure and deterministic; only
/// [`ApiError::ServiceUnavailable`] and [`ApiError::RateLimited`] are
/// transient and eligible for retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Credentials were rejected, or the session token is no longer valid.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The authenticated account may not perform this operation.
    #[error("permission denied")]
    PermissionDenied,

    /// The endpoint does not exist on the vendor service.
    #[error("endpoint not found")]
    NotFound,

    /// The vendor service is throttling requests.
    #[error("rate limited")]
    RateLimited,

    /// The vendor service is unreachable or answered 503.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The API rejected the request with an explicit error message,
    /// e.g. "no active session" when stopping an idle sauna.
    #[error("{0}")]
    ValidationFailed(String),

    /// Any other non-2xx response.
    #[error("unexpected API response (HTTP {status}): {message}")]
    Unknown {
        /// The HTTP status code.
        status: u16,
        /// Error text from the body, if any.
        message: String,
    },
}

impl ApiError {
    /// Classifies an HTTP status code and parsed error body.
    ///
    /// `body` is the already-unwrapped JSON body, when one could be parsed.
    /// A 4xx response carrying a recognizable `"error"` message becomes
    /// [`ApiError::ValidationFailed`]; everything unrecognized becomes
    /// [`ApiError::Unknown`].
    #[must_use]
    pub fn classify(status: u16, body: Option<&serde_json::Value>) -> Self {
        match status {
            401 => Self::AuthenticationFailed,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            503 => Self::ServiceUnavailable(format!("HTTP {status}")),
            _ => {
                let message = body
                    .and_then(|b| b.get("error"))
                    .and_then(serde_json::Value::as_str)
                    .map(ToString::to_string);
                match message {
                    Some(message) if (400..500).contains(&status) => {
                        Self::ValidationFailed(message)
                    }
                    message => Self::Unknown {
                        status,
                        message: message.unwrap_or_default(),
                    },
                }
            }
        }
    }

    /// Maps a transport-level failure to a semantic kind.
    ///
    /// Connect and timeout failures are indistinguishable from a struggling
    /// service for retry purposes, so they all classify as
    /// [`ApiError::ServiceUnavailable`].
    #[must_use]
    pub fn from_transport(err: &reqwest::Error) -> Self {
        Self::ServiceUnavailable(err.to_string())
    }

    /// Returns true if this error kind is transient and worth retrying.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ServiceUnavailable(_) | Self::RateLimited)
    }
}

/// Errors related to parsing Huum API responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed after JSONP unwrapping.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// Errors resolving a target device from a status listing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The account has no devices at all.
    #[error("no sauna devices found for this account")]
    NoDevicesFound,

    /// No device matched the requested identifier.
    #[error("device '{0}' not found")]
    DeviceNotFound(String),

    /// Several devices exist and none was specified.
    #[error("{0} devices found; specify a device id")]
    AmbiguousDevice(usize),
}

/// Error reported by an injected [`CredentialStore`](crate::session::CredentialStore).
///
/// The store's internals (keyring, file, ...) are opaque to this crate, so
/// the error is an opaque message too.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("credential store failure: {0}")]
pub struct StorageError(String);

impl StorageError {
    /// Creates a storage error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
