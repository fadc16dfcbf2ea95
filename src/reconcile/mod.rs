// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reconciliation with externally observed state.
//!
//! Two optional signals feed back into a device:
//!
//! - a **power signal** (binary sensor or template) tells whether the
//!   appliance is actually on. A change nobody requested (a hand-held
//!   remote, a wall switch) is written into the tracked state and marked
//!   as `on_by_remote`. Readings are also compared with transmitted power
//!   changes by the [`PowerMonitor`].
//! - an **availability signal** opens and closes the gate that lets
//!   sequences run at all.
//!
//! State mutations take the same per-device lock as the
//! [`Sequencer`](crate::sequencer::Sequencer), so a remote change is applied
//! either before or after an in-flight sequence, never in the middle of it.

mod power;
mod signal;

pub use power::PowerMonitor;
pub use signal::SignalReading;

use std::sync::Arc;

use tracing::{Instrument, Span, debug, info, warn};

use crate::event::{DeviceEvent, DeviceId, EventBus};
use crate::sequencer::DeviceCell;
use crate::state::{DeviceState, StateChange};
use crate::types::PowerState;

/// Applies power and availability signals to a device.
#[derive(Debug, Clone)]
pub struct Reconciler {
    device_id: DeviceId,
    cell: Arc<DeviceCell>,
    monitor: Option<PowerMonitor>,
    events: EventBus,
    span: Span,
}

impl Reconciler {
    /// Creates a reconciler for the device behind `cell`.
    #[must_use]
    pub fn new(device_id: DeviceId, cell: Arc<DeviceCell>, events: EventBus, span: Span) -> Self {
        Self {
            device_id,
            cell,
            monitor: None,
            events,
            span,
        }
    }

    /// Enables power signal handling through `monitor`.
    #[must_use]
    pub fn with_power_monitor(mut self, monitor: PowerMonitor) -> Self {
        self.monitor = Some(monitor);
        self
    }

    /// Handles a power signal reading.
    ///
    /// Repeated readings and unknown values are ignored. Returns the new
    /// state if the reading changed it.
    ///
    /// - `on` while the device is tracked as off: power on, mark remote.
    /// - `off`: power off, clear the remote mark.
    pub async fn power_signal(&self, reading: SignalReading) -> Option<DeviceState> {
        let Some(monitor) = &self.monitor else {
            debug!(parent: &self.span, %reading, "No power sensor configured, ignoring reading");
            return None;
        };

        let previous = monitor.record(reading);
        let power = reading.power()?;
        if previous == reading {
            return None;
        }

        self.apply_power(power).instrument(self.span.clone()).await
    }

    async fn apply_power(&self, power: PowerState) -> Option<DeviceState> {
        let guard = self.cell.lock().await;
        let mut state = guard.state();

        let changed = match power {
            PowerState::On if state.is_on() => false,
            PowerState::On => state.apply(&StateChange::Batch(vec![
                StateChange::Power(PowerState::On),
                StateChange::OnByRemote(true),
            ])),
            PowerState::Off => state.apply(&StateChange::Batch(vec![
                StateChange::Power(PowerState::Off),
                StateChange::OnByRemote(false),
            ])),
        };
        if !changed {
            return None;
        }

        guard.commit(state.clone());
        drop(guard);

        info!(%power, "Device switched outside of the engine");
        self.events.publish(DeviceEvent::RemoteChange {
            device_id: self.device_id,
            power,
            state: state.clone(),
        });
        Some(state)
    }

    /// Handles an availability signal reading.
    ///
    /// Returns whether the gate is open afterwards, or `None` for an
    /// unknown reading (the gate is left as it is).
    pub fn availability_signal(&self, reading: SignalReading) -> Option<bool> {
        let Some(available) = reading.power().map(|power| power.is_on()) else {
            debug!(parent: &self.span, "Ignoring unknown availability reading");
            return None;
        };

        if self.cell.set_available(available) {
            if available {
                info!(parent: &self.span, "Device available");
            } else {
                warn!(parent: &self.span, "Device unavailable, new requests will be rejected");
            }
            self.events.publish(DeviceEvent::AvailabilityChanged {
                device_id: self.device_id,
                available,
            });
        }
        Some(available)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn reconciler(state: DeviceState, events: &EventBus) -> Reconciler {
        let device_id = DeviceId::new();
        let monitor =
            PowerMonitor::new(device_id, Duration::from_secs(10), events.clone(), Span::none());
        Reconciler::new(
            device_id,
            Arc::new(DeviceCell::new(state)),
            events.clone(),
            Span::none(),
        )
        .with_power_monitor(monitor)
    }

    #[tokio::test]
    async fn remote_power_on_is_marked() {
        let events = EventBus::new();
        let mut rx = events.subscribe();
        let reconciler = reconciler(DeviceState::default(), &events);

        let state = reconciler.power_signal(SignalReading::On).await.unwrap();
        assert!(state.is_on());
        assert!(state.on_by_remote());
        assert!(matches!(
            rx.try_recv().unwrap(),
            DeviceEvent::RemoteChange {
                power: PowerState::On,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn repeated_reading_is_ignored() {
        let events = EventBus::new();
        let reconciler = reconciler(DeviceState::default(), &events);
        assert!(reconciler.power_signal(SignalReading::On).await.is_some());
        assert!(reconciler.power_signal(SignalReading::On).await.is_none());
    }

    #[tokio::test]
    async fn remote_power_off_clears_mark() {
        let events = EventBus::new();
        let reconciler = reconciler(DeviceState::default(), &events);
        reconciler.power_signal(SignalReading::On).await;

        let state = reconciler.power_signal(SignalReading::Off).await.unwrap();
        assert_eq!(state.power(), PowerState::Off);
        assert!(!state.on_by_remote());
    }

    #[tokio::test]
    async fn on_reading_for_device_already_on_changes_nothing() {
        let events = EventBus::new();
        let mut state = DeviceState::default();
        state.set_power(PowerState::On);
        let reconciler = reconciler(state, &events);
        assert!(reconciler.power_signal(SignalReading::On).await.is_none());
    }

    #[tokio::test]
    async fn unknown_reading_is_ignored() {
        let events = EventBus::new();
        let reconciler = reconciler(DeviceState::default(), &events);
        assert!(reconciler.power_signal(SignalReading::Unknown).await.is_none());
        assert_eq!(reconciler.availability_signal(SignalReading::Unknown), None);
    }

    #[tokio::test]
    async fn without_power_sensor_readings_are_ignored() {
        let events = EventBus::new();
        let reconciler = Reconciler::new(
            DeviceId::new(),
            Arc::new(DeviceCell::new(DeviceState::default())),
            events,
            Span::none(),
        );
        assert!(reconciler.power_signal(SignalReading::On).await.is_none());
    }

    #[test]
    fn availability_changes_are_published_once() {
        let events = EventBus::new();
        let mut rx = events.subscribe();
        let reconciler = reconciler(DeviceState::default(), &events);

        assert_eq!(reconciler.availability_signal(SignalReading::Off), Some(false));
        assert_eq!(reconciler.availability_signal(SignalReading::Off), Some(false));
        assert!(matches!(
            rx.try_recv().unwrap(),
            DeviceEvent::AvailabilityChanged {
                available: false,
                ..
            }
        ));
        assert!(rx.try_recv().is_err());
    }
}
