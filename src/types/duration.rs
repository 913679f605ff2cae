// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heating session duration type.
//!
//! This module provides a type-safe representation of the heating session
//! length, used to compute the `startDate`/`endDate` pair the API expects.

use std::fmt;

use crate::error::ValueError;

/// Heating session length in minutes (1-360).
///
/// The Huum API bounds sessions at six hours; the vendor app defaults to
/// 90 minutes, and so does [`SessionDuration::default`].
///
/// # Examples
///
/// ```
/// use huumr_lib::types::SessionDuration;
///
/// let duration = SessionDuration::new(120).unwrap();
/// assert_eq!(duration.minutes(), 120);
///
/// // The vendor default
/// assert_eq!(SessionDuration::default().minutes(), 90);
///
/// // Invalid values return error
/// assert!(SessionDuration::new(0).is_err());
/// assert!(SessionDuration::new(361).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SessionDuration(u16);

impl SessionDuration {
    /// Minimum session duration (1 minute).
    pub const MIN: u16 = 1;

    /// Maximum session duration (360 minutes = 6 hours).
    pub const MAX: u16 = 360;

    /// Default session duration (90 minutes).
    pub const DEFAULT: Self = Self(90);

    /// Creates a new session duration.
    ///
    /// # Arguments
    ///
    /// * `minutes` - The duration in minutes (1-360)
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is outside [1, 360].
    pub fn new(minutes: u16) -> Result<Self, ValueError> {
        if !(Self::MIN..=Self::MAX).contains(&minutes) {
            return Err(ValueError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: minutes,
            });
        }
        Ok(Self(minutes))
    }

    /// Returns the duration in minutes.
    #[must_use]
    pub const fn minutes(&self) -> u16 {
        self.0
    }

    /// Returns the duration as a `chrono::Duration` for date arithmetic.
    #[must_use]
    pub fn to_chrono(self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.0))
    }
}

impl Default for SessionDuration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for SessionDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}

impl TryFrom<u16> for SessionDuration {
    type Error = ValueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_values() {
        assert_eq!(SessionDuration::new(1).unwrap().minutes(), 1);
        assert_eq!(SessionDuration::new(90).unwrap().minutes(), 90);
        assert_eq!(SessionDuration::new(360).unwrap().minutes(), 360);
    }

    #[test]
    fn invalid_values() {
        assert!(SessionDuration::new(0).is_err());
        assert!(SessionDuration::new(361).is_err());
    }

    #[test]
    fn default_is_ninety_minutes() {
        assert_eq!(SessionDuration::default().minutes(), 90);
    }

    #[test]
    fn chrono_conversion() {
        let duration = SessionDuration::new(90).unwrap();
        assert_eq!(duration.to_chrono(), chrono::Duration::minutes(90));
    }

    #[test]
    fn display() {
        assert_eq!(SessionDuration::new(45).unwrap().to_string(), "45 min");
    }
}
