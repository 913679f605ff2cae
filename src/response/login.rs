// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Login response parsing.

use crate::error::ParseError;
use crate::response::coerce_string;

/// Response from `/action/login`.
///
/// The API returns `session_hash`, `user_id` and `email`; only the session
/// hash is guaranteed to be present on success.
///
/// # Examples
///
/// ```
/// use huumr_lib::response::LoginResponse;
///
/// let value = serde_json::json!({
///     "session_hash": "abc123",
///     "user_id": 42,
///     "email": "sauna@example.com"
/// });
/// let response = LoginResponse::from_value(&value).unwrap();
/// assert_eq!(response.session(), "abc123");
/// assert_eq!(response.user_id(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    session: String,
    user_id: String,
    email: String,
}

impl LoginResponse {
    /// Parses a login payload.
    ///
    /// `user_id` arrives as a number or a string depending on the endpoint;
    /// both are accepted. A missing `email` is left empty for the caller to
    /// substitute.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` if `session_hash` is absent or
    /// empty.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, ParseError> {
        let session = value
            .get("session_hash")
            .and_then(coerce_string)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ParseError::MissingField("session_hash".to_string()))?;

        let user_id = value
            .get("user_id")
            .and_then(coerce_string)
            .unwrap_or_default();

        let email = value
            .get("email")
            .and_then(coerce_string)
            .unwrap_or_default();

        Ok(Self {
            session,
            user_id,
            email,
        })
    }

    /// Substitutes a fallback email when the API omitted one.
    ///
    /// The login endpoint frequently answers without an `email` field; the
    /// username the caller logged in with is the natural stand-in.
    #[must_use]
    pub fn with_email_fallback(mut self, fallback: &str) -> Self {
        if self.email.is_empty() {
            self.email = fallback.to_string();
        }
        self
    }

    /// Returns the session token.
    #[must_use]
    pub fn session(&self) -> &str {
        &self.session
    }

    /// Returns the account user id.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns the account email, empty if the API omitted it.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}
