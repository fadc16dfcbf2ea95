// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controlled devices.
//!
//! A [`Device`] wires one command table, one transmitter and one
//! configuration into a sequencer and a reconciler that share the device
//! state. [`FanDevice`] and [`LightDevice`] add the class-specific
//! operations on top.
//!
//! ```
//! use irseq_lib::config::DeviceConfig;
//! use irseq_lib::device::{Device, PowerControl};
//! use irseq_lib::error::TransmitError;
//! use irseq_lib::table::{CommandTable, DeviceClass};
//! use irseq_lib::transmit::Transmitter;
//! use irseq_lib::types::CodeToken;
//!
//! struct Null;
//!
//! impl Transmitter for Null {
//!     async fn send(&self, _: &CodeToken) -> Result<(), TransmitError> {
//!         Ok(())
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() -> irseq_lib::Result<()> {
//! let table = CommandTable::from_json(
//!     DeviceClass::Light,
//!     r#"{"manufacturer": "Acme", "commands": {"on": "1", "off": "0"}}"#,
//! )?;
//! let light = Device::builder(DeviceConfig::new("Desk lamp", 1000), table, Null)
//!     .build_light()?;
//!
//! light.turn_on().await.into_result()?;
//! assert!(light.is_on());
//! # Ok(())
//! # }
//! ```

mod attributes;
mod builder;
mod fan;
mod light;

pub use attributes::Attributes;
pub use builder::DeviceBuilder;
pub use fan::FanDevice;
pub use light::LightDevice;

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::capabilities::Capabilities;
use crate::config::DeviceConfig;
use crate::event::{DeviceEvent, DeviceId, EventBus};
use crate::reconcile::{Reconciler, SignalReading};
use crate::resolve::Resolve;
use crate::sequencer::{DeviceCell, Outcome, Sequencer};
use crate::state::{DeviceState, PresentationPolicy};
use crate::table::CommandTable;
use crate::transmit::Transmitter;

/// Power control shared by all device classes.
#[allow(async_fn_in_trait)]
pub trait PowerControl {
    /// Turns the device on with its current settings.
    async fn turn_on(&self) -> Outcome;

    /// Turns the device off.
    async fn turn_off(&self) -> Outcome;

    /// Returns `true` if the device is tracked as on.
    fn is_on(&self) -> bool;

    /// Switches the device to the opposite of its tracked power state.
    async fn toggle(&self) -> Outcome {
        if self.is_on() {
            self.turn_off().await
        } else {
            self.turn_on().await
        }
    }
}

/// One IR/RF controlled appliance.
#[derive(Debug)]
pub struct Device<T> {
    id: DeviceId,
    config: DeviceConfig,
    capabilities: Capabilities,
    cell: Arc<DeviceCell>,
    sequencer: Sequencer<T>,
    reconciler: Reconciler,
    events: EventBus,
}

impl<T: Transmitter> Device<T> {
    /// Starts building a device from its configuration, table and transmitter.
    #[must_use]
    pub fn builder(config: DeviceConfig, table: CommandTable, transmitter: T) -> DeviceBuilder<T> {
        DeviceBuilder::new(config, table, transmitter)
    }

    /// Returns the device identifier.
    #[must_use]
    pub fn id(&self) -> DeviceId {
        self.id
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Returns the command table.
    #[must_use]
    pub fn table(&self) -> &CommandTable {
        self.sequencer.table()
    }

    /// Returns what the device supports.
    #[must_use]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Returns the state as of the last commit.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        self.cell.snapshot()
    }

    /// Returns `true` if the availability gate is open.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.cell.is_available()
    }

    /// Returns what a presentation layer may show right now.
    #[must_use]
    pub fn policy(&self) -> PresentationPolicy {
        PresentationPolicy {
            restore_on_remote: self.config.power_restore_state,
            available: self.is_available(),
            availability_when_on: self.config.availability_when_on,
        }
    }

    /// Returns the attribute block for the presentation layer.
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        Attributes::new(&self.config, self.table(), &self.state())
    }

    /// Subscribes to the device's events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.events.subscribe()
    }

    /// Submits a desired-state request.
    pub async fn submit<R: Resolve + ?Sized>(&self, request: &R) -> Outcome {
        self.sequencer.submit(request).await
    }

    /// Feeds a reading of the configured power signal.
    pub async fn power_signal(&self, reading: SignalReading) -> Option<DeviceState> {
        self.reconciler.power_signal(reading).await
    }

    /// Feeds a reading of the configured availability signal.
    pub fn availability_signal(&self, reading: SignalReading) -> Option<bool> {
        self.reconciler.availability_signal(reading)
    }
}
