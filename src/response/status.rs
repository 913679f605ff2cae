// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status response parsing.
//!
//! `/action/status` answers with an object keyed by device id, not an
//! array:
//!
//! ```json
//! { "265746": { "temperature": 56, "targetTemperature": 80, ... } }
//! ```
//!
//! Field names drift between firmware versions (`online` vs the legacy
//! `door` flag, `heating` vs an `endDate` timestamp), so every field is
//! read defensively with an explicit absent default.

use chrono::{DateTime, Utc};

use crate::device::Device;
use crate::error::ParseError;
use crate::response::coerce_u64;

/// Parsed response from `/action/status`.
///
/// # Examples
///
/// ```
/// use huumr_lib::response::StatusResponse;
///
/// let value = serde_json::json!({
///     "265746": {"temperature": 56, "door": true}
/// });
/// let response = StatusResponse::from_value(&value).unwrap();
/// assert_eq!(response.devices()[0].id, "265746");
/// assert!(response.devices()[0].online);
/// ```
#[derive(Debug, Clone)]
pub struct StatusResponse {
    devices: Vec<Device>,
}

impl StatusResponse {
    /// Parses a status payload into one [`Device`] per map entry.
    ///
    /// The map key becomes [`Device::id`]; no separate id field exists.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnexpectedFormat` if the payload is not a JSON
    /// object.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, ParseError> {
        Self::from_value_at(value, Utc::now())
    }

    /// Parses a status payload against an explicit "now" reference.
    ///
    /// Heating can be reported as an `endDate` timestamp instead of a flag;
    /// the session counts as active while that instant is in the future.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnexpectedFormat` if the payload is not a JSON
    /// object.
    pub fn from_value_at(
        value: &serde_json::Value,
        now: DateTime<Utc>,
    ) -> Result<Self, ParseError> {
        let entries = value.as_object().ok_or_else(|| {
            ParseError::UnexpectedFormat("status payload is not an object".to_string())
        })?;

        let devices = entries
            .iter()
            .map(|(id, entry)| device_from_entry(id, entry, now))
            .collect();

        Ok(Self { devices })
    }

    /// Returns the parsed devices.
    #[must_use]
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Consumes the response, returning the parsed devices.
    #[must_use]
    pub fn into_devices(self) -> Vec<Device> {
        self.devices
    }
}

fn device_from_entry(id: &str, entry: &serde_json::Value, now: DateTime<Utc>) -> Device {
    let name = entry
        .get("saunaName")
        .or_else(|| entry.get("name"))
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
        .map_or_else(|| format!("Sauna {id}"), ToString::to_string);

    // door=true means the sauna is reachable on older firmware.
    let online = entry
        .get("online")
        .or_else(|| entry.get("door"))
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);

    let current_temperature = entry
        .get("temperature")
        .and_then(coerce_u64)
        .and_then(|v| u16::try_from(v).ok())
        .unwrap_or(0);

    let target_temperature = entry
        .get("targetTemperature")
        .and_then(coerce_u64)
        .and_then(|v| u16::try_from(v).ok());

    let heating = entry
        .get("heating")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or_else(|| session_end_in_future(entry, now));

    Device {
        id: id.to_string(),
        name,
        online,
        current_temperature,
        target_temperature,
        heating,
    }
}

fn session_end_in_future(entry: &serde_json::Value, now: DateTime<Utc>) -> bool {
    entry
        .get("endDate")
        .and_then(serde_json::Value::as_i64)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .is_some_and(|end| end > now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn parse_single_device() {
        let value = serde_json::json!({
            "265746": {
                "saunaName": "Backyard",
                "door": true,
                "temperature": 56,
                "targetTemperature": 80
            }
        });
        let devices = StatusResponse::from_value(&value).unwrap().into_devices();
        assert_eq!(devices.len(), 1);
        let device = &devices[0];
        assert_eq!(device.id, "265746");
        assert_eq!(device.name, "Backyard");
        assert!(device.online);
        assert_eq!(device.current_temperature, 56);
        assert_eq!(device.target_temperature, Some(80));
        assert!(!device.heating);
    }

    #[test]
    fn map_key_becomes_id() {
        let value = serde_json::json!({"111": {}, "222": {}});
        let devices = StatusResponse::from_value(&value).unwrap().into_devices();
        let ids: Vec<&str> = devices.iter().map(|d| d.id.as_str()).collect();
        assert!(ids.contains(&"111"));
        assert!(ids.contains(&"222"));
    }

    #[test]
    fn missing_name_falls_back_to_id() {
        let value = serde_json::json!({"42": {"temperature": 30}});
        let devices = StatusResponse::from_value(&value).unwrap().into_devices();
        assert_eq!(devices[0].name, "Sauna 42");
    }

    #[test]
    fn explicit_online_and_heating_flags() {
        let value = serde_json::json!({
            "1": {"online": true, "heating": true, "temperature": 70}
        });
        let devices = StatusResponse::from_value(&value).unwrap().into_devices();
        assert!(devices[0].online);
        assert!(devices[0].heating);
    }

    #[test]
    fn heating_derived_from_future_end_date() {
        let value = serde_json::json!({
            "1": {"door": true, "endDate": 2_000},
            "2": {"door": true, "endDate": 500}
        });
        let devices = StatusResponse::from_value_at(&value, at(1_000))
            .unwrap()
            .into_devices();
        assert!(devices[0].heating);
        assert!(!devices[1].heating);
    }

    #[test]
    fn absent_fields_default() {
        let value = serde_json::json!({"9": {}});
        let devices = StatusResponse::from_value(&value).unwrap().into_devices();
        let device = &devices[0];
        assert!(!device.online);
        assert_eq!(device.current_temperature, 0);
        assert_eq!(device.target_temperature, None);
        assert!(!device.heating);
    }

    #[test]
    fn temperature_as_string_is_coerced() {
        let value = serde_json::json!({"9": {"temperature": "63"}});
        let devices = StatusResponse::from_value(&value).unwrap().into_devices();
        assert_eq!(devices[0].current_temperature, 63);
    }

    #[test]
    fn non_object_payload_rejected() {
        let value = serde_json::json!([1, 2, 3]);
        assert!(matches!(
            StatusResponse::from_value(&value),
            Err(ParseError::UnexpectedFormat(_))
        ));
    }

    #[test]
    fn empty_object_means_no_devices() {
        let value = serde_json::json!({});
        let devices = StatusResponse::from_value(&value).unwrap().into_devices();
        assert!(devices.is_empty());
    }
}
