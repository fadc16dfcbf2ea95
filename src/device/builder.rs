// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device builder.

use std::sync::Arc;

use tracing::{debug, info_span};

use crate::capabilities::Capabilities;
use crate::config::DeviceConfig;
use crate::error::{Error, TableError};
use crate::event::{DeviceId, EventBus};
use crate::reconcile::{PowerMonitor, Reconciler};
use crate::sequencer::{DeviceCell, Sequencer};
use crate::state::DeviceState;
use crate::table::{CommandTable, DeviceClass};
use crate::transmit::Transmitter;
use crate::types::ValueKind;

use super::{Device, FanDevice, LightDevice};

/// Builder for [`Device`]s.
///
/// Created with [`Device::builder`].
#[derive(Debug)]
pub struct DeviceBuilder<T> {
    config: DeviceConfig,
    table: CommandTable,
    transmitter: T,
    restored: Option<DeviceState>,
    events: Option<EventBus>,
}

impl<T: Transmitter> DeviceBuilder<T> {
    pub(crate) fn new(config: DeviceConfig, table: CommandTable, transmitter: T) -> Self {
        Self {
            config,
            table,
            transmitter,
            restored: None,
            events: None,
        }
    }

    /// Seeds the device with a persisted state.
    ///
    /// Only values present in the table's ladders and speed list are taken
    /// over; the remote-power marker is kept only when a power sensor is
    /// configured.
    #[must_use]
    pub fn with_restored_state(mut self, state: DeviceState) -> Self {
        self.restored = Some(state);
        self
    }

    /// Publishes events on a shared bus instead of a private one.
    #[must_use]
    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Builds the device.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Value`] if the configuration is invalid.
    pub fn build(self) -> Result<Device<T>, Error> {
        self.config.validate()?;

        let id = self
            .config
            .unique_id
            .as_deref()
            .map_or_else(DeviceId::new, DeviceId::from_unique_id);
        let span = info_span!("device", device = %id, name = %self.config.name);
        let events = self.events.unwrap_or_default();

        let state = match &self.restored {
            Some(snapshot) => restore(&self.table, snapshot, self.config.power_sensor.is_some()),
            None => DeviceState::initial(&self.table),
        };
        debug!(parent: &span, ?state, "Device state initialized");

        let capabilities = Capabilities::from_table(&self.table);
        let cell = Arc::new(DeviceCell::new(state));
        let table = Arc::new(self.table);
        let mut sequencer = Sequencer::new(id, table, self.transmitter, Arc::clone(&cell))
            .with_delay(self.config.delay)
            .with_event_bus(events.clone())
            .with_span(span.clone());
        let mut reconciler = Reconciler::new(id, Arc::clone(&cell), events.clone(), span.clone());

        if self.config.power_sensor.is_some() {
            let monitor = PowerMonitor::new(
                id,
                self.config.power_sensor_delay,
                events.clone(),
                span.clone(),
            );
            sequencer = sequencer.with_power_monitor(monitor.clone());
            reconciler = reconciler.with_power_monitor(monitor);
        }

        Ok(Device {
            id,
            config: self.config,
            capabilities,
            cell,
            sequencer,
            reconciler,
            events,
        })
    }

    /// Builds a fan.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::WrongClass`] for a light table, or any error of
    /// [`build`](Self::build).
    pub fn build_fan(self) -> Result<FanDevice<T>, Error> {
        self.expect_class(DeviceClass::Fan)?;
        Ok(FanDevice::from_device(self.build()?))
    }

    /// Builds a light.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::WrongClass`] for a fan table, or any error of
    /// [`build`](Self::build).
    pub fn build_light(self) -> Result<LightDevice<T>, Error> {
        self.expect_class(DeviceClass::Light)?;
        Ok(LightDevice::from_device(self.build()?))
    }

    fn expect_class(&self, expected: DeviceClass) -> Result<(), TableError> {
        let found = self.table.class();
        if found == expected {
            Ok(())
        } else {
            Err(TableError::WrongClass { expected, found })
        }
    }
}

/// Seeds a fresh state with the valid parts of a persisted one.
fn restore(table: &CommandTable, snapshot: &DeviceState, keep_remote: bool) -> DeviceState {
    let mut state = DeviceState::initial(table);
    state.set_power(snapshot.power());

    if let Some(speed) = snapshot.speed()
        && table.speeds().iter().any(|known| known == speed)
    {
        state.set_speed(speed);
    }
    if table.directions().any(|known| known == snapshot.direction()) {
        state.set_direction(snapshot.direction().clone());
    }
    if let Some(oscillating) = snapshot.oscillating()
        && table.supports_oscillation()
    {
        state.set_oscillating(oscillating);
    }

    let in_ladder = |kind: ValueKind, value: u32| {
        table.ladder(kind).is_some_and(|ladder| ladder.contains(value))
    };
    if let Some(brightness) = snapshot.brightness()
        && in_ladder(ValueKind::Brightness, brightness)
    {
        state.set_brightness(brightness);
    }
    if let Some(kelvin) = snapshot.color_temperature()
        && in_ladder(ValueKind::ColorTemperature, kelvin)
    {
        state.set_color_temperature(kelvin);
    }

    if keep_remote {
        state.set_on_by_remote(snapshot.on_by_remote());
    }
    state
}
