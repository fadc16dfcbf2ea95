// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-side projections of device state.

use crate::table::CommandTable;
use crate::types::percentage::ordered_item_to_percentage;
use crate::types::{Direction, PowerState};

use super::DeviceState;

/// Settings that decide what a presentation layer may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationPolicy {
    /// Show last-known values after a remote power-on.
    pub restore_on_remote: bool,
    /// Current state of the availability gate.
    pub available: bool,
    /// Report an unavailable device as unavailable even while on.
    pub availability_when_on: bool,
}

impl Default for PresentationPolicy {
    fn default() -> Self {
        Self {
            restore_on_remote: true,
            available: true,
            availability_when_on: false,
        }
    }
}

/// The externally reported power state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    /// The device is on.
    On,
    /// The device is off.
    Off,
    /// The availability gate is closed.
    Unavailable,
}

impl Presence {
    fn resolve(power: PowerState, policy: PresentationPolicy) -> Self {
        if !policy.available && (policy.availability_when_on || power == PowerState::Off) {
            Self::Unavailable
        } else if power.is_on() {
            Self::On
        } else {
            Self::Off
        }
    }
}

/// What a fan reports to its presentation layer.
///
/// `None` means unknown: either unsupported or hidden after a remote change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FanView {
    /// Reported power state.
    pub state: Presence,
    /// Speed as a percentage; `0` while off.
    pub percentage: Option<u8>,
    /// Number of discrete speeds.
    pub speed_count: usize,
    /// Oscillation state.
    pub oscillating: Option<bool>,
    /// Current direction.
    pub direction: Option<Direction>,
}

impl FanView {
    /// Projects a fan state.
    #[must_use]
    pub fn new(state: &DeviceState, table: &CommandTable, policy: PresentationPolicy) -> Self {
        let hidden = state.hides_last_known(policy.restore_on_remote);
        let percentage = if hidden {
            None
        } else if !state.is_on() {
            Some(0)
        } else {
            state
                .speed()
                .and_then(|speed| ordered_item_to_percentage(table.speeds(), &speed.to_string()))
        };

        Self {
            state: Presence::resolve(state.power(), policy),
            percentage,
            speed_count: table.speeds().len(),
            oscillating: if hidden { None } else { state.oscillating() },
            direction: (!hidden).then(|| state.direction().clone()),
        }
    }
}

/// What a light reports to its presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LightView {
    /// Reported power state.
    pub state: Presence,
    /// Brightness.
    pub brightness: Option<u32>,
    /// Color temperature in Kelvin.
    pub color_temperature: Option<u32>,
}

impl LightView {
    /// Projects a light state.
    #[must_use]
    pub fn new(state: &DeviceState, policy: PresentationPolicy) -> Self {
        let hidden = state.hides_last_known(policy.restore_on_remote);
        Self {
            state: Presence::resolve(state.power(), policy),
            brightness: if hidden { None } else { state.brightness() },
            color_temperature: if hidden {
                None
            } else {
                state.color_temperature()
            },
        }
    }
}
