// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device event types.

use crate::error::SequenceError;
use crate::state::DeviceState;
use crate::types::PowerState;

use super::DeviceId;

/// Events emitted by a controlled device.
///
/// Every event carries the id of the device it concerns, so one
/// [`EventBus`](super::EventBus) can be shared by many devices.
#[derive(Debug, Clone)]
pub enum DeviceEvent {
    /// A command sequence completed and its target state was committed.
    StateCommitted {
        /// The device.
        device_id: DeviceId,
        /// The committed state.
        state: DeviceState,
        /// Number of codes transmitted.
        transmitted: usize,
    },

    /// A command sequence stopped early.
    ///
    /// `state` reflects the codes transmitted before the failure.
    SequenceAborted {
        /// The device.
        device_id: DeviceId,
        /// The state after the partial sequence.
        state: DeviceState,
        /// Number of codes transmitted before the failure.
        transmitted: usize,
        /// Why the sequence stopped.
        reason: SequenceError,
    },

    /// The power sensor reported a change nobody requested.
    RemoteChange {
        /// The device.
        device_id: DeviceId,
        /// The reported power state.
        power: PowerState,
        /// The state after reconciliation.
        state: DeviceState,
    },

    /// The power sensor disagreed with a transmitted power change.
    ///
    /// Reported only; the tracked state is left as transmitted.
    PowerCheckFailed {
        /// The device.
        device_id: DeviceId,
        /// Power state the last sequence set.
        expected: PowerState,
        /// Power state the sensor reported.
        observed: PowerState,
    },

    /// The availability gate opened or closed.
    AvailabilityChanged {
        /// The device.
        device_id: DeviceId,
        /// Whether the device accepts commands.
        available: bool,
    },
}

impl DeviceEvent {
    /// Returns the device ID associated with this event.
    #[must_use]
    pub fn device_id(&self) -> DeviceId {
        match self {
            Self::StateCommitted { device_id, .. }
            | Self::SequenceAborted { device_id, .. }
            | Self::RemoteChange { device_id, .. }
            | Self::PowerCheckFailed { device_id, .. }
            | Self::AvailabilityChanged { device_id, .. } => *device_id,
        }
    }

    /// Returns the device state carried by the event, if any.
    #[must_use]
    pub fn state(&self) -> Option<&DeviceState> {
        match self {
            Self::StateCommitted { state, .. }
            | Self::SequenceAborted { state, .. }
            | Self::RemoteChange { state, .. } => Some(state),
            Self::PowerCheckFailed { .. } | Self::AvailabilityChanged { .. } => None,
        }
    }

    /// Returns `true` for events that indicate something went wrong.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::SequenceAborted { .. } | Self::PowerCheckFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_id_is_extracted_from_every_variant() {
        let device_id = DeviceId::new();
        let events = [
            DeviceEvent::StateCommitted {
                device_id,
                state: DeviceState::default(),
                transmitted: 1,
            },
            DeviceEvent::SequenceAborted {
                device_id,
                state: DeviceState::default(),
                transmitted: 0,
                reason: SequenceError::Unavailable,
            },
            DeviceEvent::RemoteChange {
                device_id,
                power: PowerState::On,
                state: DeviceState::default(),
            },
            DeviceEvent::PowerCheckFailed {
                device_id,
                expected: PowerState::On,
                observed: PowerState::Off,
            },
            DeviceEvent::AvailabilityChanged {
                device_id,
                available: false,
            },
        ];
        for event in &events {
            assert_eq!(event.device_id(), device_id);
        }
        assert_eq!(events.iter().filter(|e| e.is_failure()).count(), 2);
        assert_eq!(events.iter().filter(|e| e.state().is_some()).count(), 3);
    }
}
