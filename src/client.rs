// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the Huum sauna cloud API.
//!
//! The vendor's documented contract diverges from its real behavior: status
//! and stop are GET despite being documented as POST, the dedicated
//! session-validation endpoint answers 404, and a 403 from `/action/status`
//! is the only observable signal that a session token has been invalidated.
//! This client implements the observed behavior.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;

use crate::device::Device;
use crate::error::{ApiError, Error};
use crate::response::{
    ApiResponse, LoginResponse, StartResponse, StatusResponse, StopResponse, TemperatureReading,
    unwrap_jsonp,
};
use crate::retry::RetryPolicy;
use crate::types::{SessionDuration, TargetTemperature};

/// Production endpoint of the Huum cloud service.
pub const DEFAULT_BASE_URL: &str = "https://sauna.huum.eu";

/// Client for the Huum sauna cloud API.
///
/// Owns the base endpoint and the current session token. The token is
/// embedded in-body or in-query per endpoint, never in a header.
///
/// # Examples
///
/// ```no_run
/// use huumr_lib::client::ApiClient;
///
/// # async fn example() -> huumr_lib::Result<()> {
/// let mut client = ApiClient::new()?;
/// client.login("sauna@example.com", "secret").await?;
///
/// let devices = client.get_status().await?;
/// println!("{} device(s)", devices.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    retry: RetryPolicy,
    session: Option<String>,
}

/// Fixed humidity parameter the start endpoint requires.
const DEFAULT_HUMIDITY: u8 = 0;

/// Protocol version the stop endpoint requires.
const STOP_API_VERSION: &str = "3";

enum Payload<'a> {
    Get {
        query: Vec<(&'static str, &'a str)>,
    },
    Post {
        body: serde_json::Value,
    },
}

struct Request<'a> {
    path: &'static str,
    payload: Payload<'a>,
}

impl ApiClient {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a client against the production endpoint with default
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, Error> {
        Self::builder().build()
    }

    /// Returns a builder for custom configuration.
    #[must_use]
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    /// Returns the base URL of the service.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the current session token, if any.
    #[must_use]
    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }

    /// Sets the session token for subsequent calls.
    pub fn set_session(&mut self, token: impl Into<String>) {
        self.session = Some(token.into());
    }

    /// Forgets the session token.
    pub fn clear_session(&mut self) {
        self.session = None;
    }

    /// Authenticates and stores the returned session token on the client.
    ///
    /// # Errors
    ///
    /// - `ApiError::AuthenticationFailed` on rejected credentials (401)
    /// - `ApiError::ServiceUnavailable` if the service is unreachable
    ///   (retried before surfacing)
    /// - `ParseError::MissingField` if a 2xx response carries no
    ///   `session_hash`
    pub async fn login(&mut self, username: &str, password: &str) -> Result<LoginResponse, Error> {
        let request = Request {
            path: "/action/login",
            payload: Payload::Post {
                body: serde_json::json!({
                    "username": username,
                    "password": password,
                }),
            },
        };

        let value = self.execute(&request).await?;
        let response = LoginResponse::from_value(&value)?.with_email_fallback(username);
        self.session = Some(response.session().to_string());
        Ok(response)
    }

    /// Fetches the status of all devices on the account.
    ///
    /// The response is an object keyed by device id; one [`Device`] is
    /// emitted per entry. A 403 from this endpoint is the sole signal that
    /// the session token is invalid, so it surfaces as
    /// `ApiError::AuthenticationFailed`; callers should re-authenticate
    /// rather than report a permission problem.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotAuthenticated` if no session token is set, or
    /// the classified API error otherwise.
    pub async fn get_status(&self) -> Result<Vec<Device>, Error> {
        let session = self.require_session()?;
        let request = Request {
            path: "/action/status",
            payload: Payload::Get {
                query: vec![("session", session)],
            },
        };

        let value = self.execute(&request).await.map_err(|err| match err {
            Error::Api(ApiError::PermissionDenied) => Error::Api(ApiError::AuthenticationFailed),
            other => other,
        })?;

        Ok(StatusResponse::from_value(&value)?.into_devices())
    }

    /// Starts a heating session.
    ///
    /// Computes `startDate`/`endDate` as absolute Unix timestamps from the
    /// requested duration. The start endpoint addresses the account's
    /// sauna implicitly; it takes no device id.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotAuthenticated` without a session token, or the
    /// classified API error.
    pub async fn start(
        &self,
        temperature: TargetTemperature,
        duration: SessionDuration,
    ) -> Result<StartResponse, Error> {
        let session = self.require_session()?;
        let now = Utc::now();
        let end = now + duration.to_chrono();

        let request = Request {
            path: "/action/start",
            payload: Payload::Post {
                body: serde_json::json!({
                    "session": session,
                    "targetTemperature": temperature.value(),
                    "startDate": now.timestamp(),
                    "endDate": end.timestamp(),
                    "humidity": DEFAULT_HUMIDITY,
                }),
            },
        };

        let value = self.execute(&request).await?;
        Ok(StartResponse::from_value(&value))
    }

    /// Stops the heating session on the given device.
    ///
    /// Stopping an idle sauna surfaces `ApiError::ValidationFailed`
    /// ("no active session"); whether that is a warning or an error is the
    /// caller's policy, not this client's.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotAuthenticated` without a session token, or the
    /// classified API error.
    pub async fn stop(&self, device_id: &str) -> Result<StopResponse, Error> {
        let session = self.require_session()?;
        let request = Request {
            path: "/action/stop_sauna",
            payload: Payload::Get {
                query: vec![
                    ("session", session),
                    ("saunaId", device_id),
                    ("version", STOP_API_VERSION),
                ],
            },
        };

        let value = self.execute(&request).await?;
        Ok(StopResponse::from_value(&value))
    }

    /// Fetches temperature statistics for the given device.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotAuthenticated` without a session token, or the
    /// classified API error.
    pub async fn get_statistics(&self, device_id: &str) -> Result<Vec<TemperatureReading>, Error> {
        let session = self.require_session()?;
        let request = Request {
            path: "/action/statistics",
            payload: Payload::Get {
                query: vec![("session", session), ("saunaId", device_id)],
            },
        };

        let value = self.execute(&request).await?;
        Ok(TemperatureReading::list_from_value(&value)?)
    }

    fn require_session(&self) -> Result<&str, Error> {
        self.session.as_deref().ok_or(Error::NotAuthenticated)
    }

    /// Runs a request under the retry policy and normalizes the response.
    ///
    /// Transport failures and classified non-2xx statuses go through the
    /// retry policy. JSONP unwrapping and parsing happen once, after the
    /// final attempt, since malformed payloads are not transient.
    async fn execute(&self, request: &Request<'_>) -> Result<serde_json::Value, Error> {
        let response = self.retry.run(|| self.send_once(request)).await?;
        let value = response.to_value()?;

        // A 2xx body can still carry an application-level rejection.
        if value.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
            let message = value
                .get("error")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown API error");
            return Err(ApiError::ValidationFailed(message.to_string()).into());
        }

        Ok(value)
    }

    async fn send_once(&self, request: &Request<'_>) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);

        let builder = match &request.payload {
            Payload::Get { query } => self.http.get(&url).query(query),
            Payload::Post { body } => self.http.post(&url).json(body),
        };

        tracing::debug!(path = request.path, "sending API request");

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;

        tracing::debug!(status = status.as_u16(), body = %body, "received API response");

        if !status.is_success() {
            // Error bodies may be wrapped, bare JSON, or an HTML page.
            let parsed: Option<serde_json::Value> = serde_json::from_str(unwrap_jsonp(&body)).ok();
            return Err(ApiError::classify(status.as_u16(), parsed.as_ref()));
        }

        Ok(ApiResponse::new(body))
    }
}

/// Builder for creating an [`ApiClient`] with custom configuration.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use huumr_lib::client::ApiClient;
/// use huumr_lib::retry::RetryPolicy;
///
/// # fn example() -> huumr_lib::Result<()> {
/// let client = ApiClient::builder()
///     .base_url("https://sauna.example.test")
///     .timeout(Duration::from_secs(5))
///     .retry_policy(RetryPolicy::disabled())
///     .session("stored-token")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    retry: Option<RetryPolicy>,
    session: Option<String>,
}

impl ApiClientBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL, overriding the production endpoint.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    /// Sets an initial session token.
    #[must_use]
    pub fn session(mut self, token: impl Into<String>) -> Self {
        self.session = Some(token.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn build(self) -> Result<ApiClient, Error> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let http = Client::builder()
            .timeout(self.timeout.unwrap_or(ApiClient::DEFAULT_TIMEOUT))
            .build()?;

        Ok(ApiClient {
            base_url,
            http,
            retry: self.retry.unwrap_or_default(),
            session: self.session,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration() {
        let client = ApiClient::new().unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        assert!(client.session().is_none());
    }

    #[test]
    fn builder_strips_trailing_slash() {
        let client = ApiClient::builder()
            .base_url("https://sauna.example.test/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://sauna.example.test");
    }

    #[test]
    fn session_management() {
        let mut client = ApiClient::new().unwrap();
        client.set_session("token");
        assert_eq!(client.session(), Some("token"));
        client.clear_session();
        assert!(client.session().is_none());
    }

    #[test]
    fn builder_with_initial_session() {
        let client = ApiClient::builder().session("stored").build().unwrap();
        assert_eq!(client.session(), Some("stored"));
    }

    #[tokio::test]
    async fn operations_require_session() {
        let client = ApiClient::new().unwrap();
        assert!(matches!(
            client.get_status().await,
            Err(Error::NotAuthenticated)
        ));
        assert!(matches!(
            client.stop("265746").await,
            Err(Error::NotAuthenticated)
        ));
        assert!(matches!(
            client.get_statistics("265746").await,
            Err(Error::NotAuthenticated)
        ));
        let temperature = TargetTemperature::new(85).unwrap();
        assert!(matches!(
            client.start(temperature, SessionDuration::default()).await,
            Err(Error::NotAuthenticated)
        ));
    }
}
