// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Target resolution: from a desired state to an ordered list of actions.
//!
//! A request ([`FanRequest`], [`LightRequest`]) is resolved against the
//! device's [`CommandTable`](crate::table::CommandTable) and its current
//! [`DeviceState`](crate::state::DeviceState) into a [`Plan`]: the logical
//! [`Action`]s to send, in order, and the state the device will be in once
//! all of them were transmitted.
//!
//! Resolution does not check that every code exists; a missing code is
//! reported when the [`Sequencer`](crate::sequencer::Sequencer) reaches the
//! action, after the actions before it were sent.
//!
//! Ladder walks are expanded into single step commands by the
//! [`stepper`].

mod action;
mod fan;
mod light;
pub mod stepper;

pub use action::{Action, Plan, PlannedAction, TransmitStep};
pub use fan::FanRequest;
pub use light::LightRequest;

use crate::error::SequenceError;
use crate::state::DeviceState;
use crate::table::CommandTable;

/// A desired-state request that can be turned into a [`Plan`].
///
/// The sequencer resolves requests while holding the device lock, so the
/// plan is always computed from the state left by the previous sequence.
pub trait Resolve {
    /// Computes the plan that moves `current` to the requested state.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::MissingCommand`] if the request targets a
    /// property the device has no commands for at all.
    fn resolve(&self, table: &CommandTable, current: &DeviceState)
    -> Result<Plan, SequenceError>;
}

impl Resolve for Plan {
    fn resolve(&self, _: &CommandTable, _: &DeviceState) -> Result<Plan, SequenceError> {
        Ok(self.clone())
    }
}
