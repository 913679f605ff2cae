// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature statistics parsing.
//!
//! `/action/statistics` answers with a JSONP-wrapped array of readings,
//! one per sample, with Unix-second timestamps.

use chrono::{DateTime, Utc};

use crate::error::ParseError;
use crate::response::coerce_u64;

/// One temperature sample from the statistics endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct TemperatureReading {
    /// When the sample was taken.
    pub timestamp: DateTime<Utc>,
    /// Measured temperature in °C.
    pub temperature: u16,
}

impl TemperatureReading {
    /// Parses a statistics payload into readings, oldest first as the API
    /// reports them.
    ///
    /// Entries without a readable timestamp are skipped; a reading with a
    /// broken temperature defaults to 0 rather than discarding the sample.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnexpectedFormat` if the payload is not a JSON
    /// array.
    pub fn list_from_value(value: &serde_json::Value) -> Result<Vec<Self>, ParseError> {
        let entries = value.as_array().ok_or_else(|| {
            ParseError::UnexpectedFormat("statistics payload is not an array".to_string())
        })?;

        Ok(entries
            .iter()
            .filter_map(|entry| {
                let timestamp = entry
                    .get("timestamp")
                    .and_then(serde_json::Value::as_i64)
                    .and_then(|secs| DateTime::from_timestamp(secs, 0))?;
                let temperature = entry
                    .get("temperature")
                    .and_then(coerce_u64)
                    .and_then(|v| u16::try_from(v).ok())
                    .unwrap_or(0);
                Some(Self {
                    timestamp,
                    temperature,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_readings() {
        let value = serde_json::json!([
            {"timestamp": 1_700_000_000, "temperature": 40},
            {"timestamp": 1_700_000_600, "temperature": 62}
        ]);
        let readings = TemperatureReading::list_from_value(&value).unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].temperature, 40);
        assert_eq!(
            readings[1].timestamp,
            DateTime::from_timestamp(1_700_000_600, 0).unwrap()
        );
    }

    #[test]
    fn entries_without_timestamp_are_skipped() {
        let value = serde_json::json!([
            {"temperature": 50},
            {"timestamp": 1_700_000_000, "temperature": 55}
        ]);
        let readings = TemperatureReading::list_from_value(&value).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].temperature, 55);
    }

    #[test]
    fn broken_temperature_defaults_to_zero() {
        let value = serde_json::json!([{"timestamp": 1_700_000_000, "temperature": null}]);
        let readings = TemperatureReading::list_from_value(&value).unwrap();
        assert_eq!(readings[0].temperature, 0);
    }

    #[test]
    fn non_array_rejected() {
        let value = serde_json::json!({"timestamp": 1});
        assert!(TemperatureReading::list_from_value(&value).is_err());
    }
}
