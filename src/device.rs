// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sauna device entity and target selection.
//!
//! A [`Device`] is a snapshot of one heater taken from a status fetch; it is
//! never cached across commands. [`select_device`] resolves exactly one
//! target from a listing; control commands always act on a single device.

use crate::error::SelectionError;

/// A single controllable sauna heater unit.
///
/// Produced fresh on every status fetch and immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Device {
    /// Vendor-assigned device id.
    pub id: String,
    /// Display name, `"Sauna <id>"` when the account has none configured.
    pub name: String,
    /// Whether the heater is reachable.
    pub online: bool,
    /// Last reported temperature in °C.
    pub current_temperature: u16,
    /// Target temperature of the active session, if any.
    pub target_temperature: Option<u16>,
    /// True iff a heating session is active on this device.
    pub heating: bool,
}

/// Resolves exactly one target device from a status listing.
///
/// With a requested identifier, matches by exact id or by case-insensitive
/// exact name. Without one, a single-device account auto-selects; anything
/// else is an error the caller must resolve by naming a device. Pure: the
/// listing is never mutated.
///
/// # Errors
///
/// - [`SelectionError::DeviceNotFound`] if `requested` matches nothing
/// - [`SelectionError::NoDevicesFound`] if the listing is empty
/// - [`SelectionError::AmbiguousDevice`] if several devices exist and none
///   was requested
///
/// # Examples
///
/// ```
/// use huumr_lib::device::{select_device, Device};
///
/// let devices = vec![Device {
///     id: "265746".to_string(),
///     name: "Backyard".to_string(),
///     online: true,
///     current_temperature: 56,
///     target_temperature: None,
///     heating: false,
/// }];
///
/// let device = select_device(&devices, None).unwrap();
/// assert_eq!(device.id, "265746");
///
/// let device = select_device(&devices, Some("backyard")).unwrap();
/// assert_eq!(device.id, "265746");
/// ```
pub fn select_device<'a>(
    devices: &'a [Device],
    requested: Option<&str>,
) -> Result<&'a Device, SelectionError> {
    match requested {
        Some(wanted) => {
            let wanted_lower = wanted.to_lowercase();
            devices
                .iter()
                .find(|d| d.id == wanted || d.name.to_lowercase() == wanted_lower)
                .ok_or_else(|| SelectionError::DeviceNotFound(wanted.to_string()))
        }
        None => match devices {
            [] => Err(SelectionError::NoDevicesFound),
            [only] => Ok(only),
            many => Err(SelectionError::AmbiguousDevice(many.len())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(id: &str, name: &str) -> Device {
        Device {
            id: id.to_string(),
            name: name.to_string(),
            online: true,
            current_temperature: 20,
            target_temperature: None,
            heating: false,
        }
    }

    #[test]
    fn empty_listing() {
        assert_eq!(
            select_device(&[], None).unwrap_err(),
            SelectionError::NoDevicesFound
        );
    }

    #[test]
    fn single_device_auto_selects() {
        let devices = vec![device("1", "Home")];
        assert_eq!(select_device(&devices, None).unwrap().id, "1");
    }

    #[test]
    fn multiple_devices_require_id() {
        let devices = vec![device("1", "Home"), device("2", "Cabin")];
        assert_eq!(
            select_device(&devices, None).unwrap_err(),
            SelectionError::AmbiguousDevice(2)
        );
    }

    #[test]
    fn select_by_id() {
        let devices = vec![device("1", "Home"), device("2", "Cabin")];
        assert_eq!(select_device(&devices, Some("2")).unwrap().id, "2");
    }

    #[test]
    fn select_by_name_case_insensitive() {
        let devices = vec![device("1", "Home"), device("2", "Cabin")];
        assert_eq!(select_device(&devices, Some("CABIN")).unwrap().id, "2");
    }

    #[test]
    fn unknown_id() {
        let devices = vec![device("1", "Home")];
        assert_eq!(
            select_device(&devices, Some("nope")).unwrap_err(),
            SelectionError::DeviceNotFound("nope".to_string())
        );
    }

    #[test]
    fn listing_is_untouched() {
        let devices = vec![device("1", "Home"), device("2", "Cabin")];
        let before = devices.clone();
        let _ = select_device(&devices, Some("Cabin"));
        assert_eq!(devices, before);
    }
}
