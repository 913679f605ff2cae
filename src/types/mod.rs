// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for sauna control.
//!
//! This module provides type-safe representations of values sent to the
//! Huum API. Each type ensures values are within their valid ranges at
//! construction time, preventing runtime errors.
//!
//! # Types
//!
//! - [`TargetTemperature`] - Target temperature in °C (40-110)
//! - [`SessionDuration`] - Heating session length in minutes (1-360)

mod duration;
mod temperature;

pub use duration::SessionDuration;
pub use temperature::TargetTemperature;
