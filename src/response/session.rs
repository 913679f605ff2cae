// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heating session response parsing.

use crate::response::coerce_u64;

/// Response from `/action/start`.
///
/// # Examples
///
/// ```
/// use huumr_lib::response::StartResponse;
///
/// let value = serde_json::json!({"success": true, "estimated_time": 25});
/// let response = StartResponse::from_value(&value);
/// assert!(response.accepted());
/// assert_eq!(response.estimated_minutes(), Some(25));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartResponse {
    accepted: bool,
    estimated_minutes: Option<u64>,
}

impl StartResponse {
    /// Parses a start payload.
    ///
    /// `estimated_time` is optional and arrives as a number or a numeric
    /// string; anything unreadable counts as absent.
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Self {
        let accepted = value
            .get("success")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(true);

        let estimated_minutes = value.get("estimated_time").and_then(coerce_u64);

        Self {
            accepted,
            estimated_minutes,
        }
    }

    /// Returns true if the API accepted the session.
    #[must_use]
    pub fn accepted(&self) -> bool {
        self.accepted
    }

    /// Returns the estimated minutes until the target temperature, if the
    /// API reported one.
    #[must_use]
    pub fn estimated_minutes(&self) -> Option<u64> {
        self.estimated_minutes
    }
}

/// Response from `/action/stop_sauna`.
///
/// Both summary fields are frequently omitted by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopResponse {
    duration_minutes: Option<u64>,
    max_temperature: Option<u64>,
}

impl StopResponse {
    /// Parses a stop payload.
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Self {
        Self {
            duration_minutes: value.get("session_duration_minutes").and_then(coerce_u64),
            max_temperature: value.get("max_temperature").and_then(coerce_u64),
        }
    }

    /// Returns how long the stopped session ran, if reported.
    #[must_use]
    pub fn duration_minutes(&self) -> Option<u64> {
        self.duration_minutes
    }

    /// Returns the maximum temperature the session reached, if reported.
    #[must_use]
    pub fn max_temperature(&self) -> Option<u64> {
        self.max_temperature
    }
}
