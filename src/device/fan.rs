// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan adapter.

use crate::config::DeviceConfig;
use crate::error::Error;
use crate::loader::TableLoader;
use crate::resolve::FanRequest;
use crate::sequencer::Outcome;
use crate::state::FanView;
use crate::table::DeviceClass;
use crate::transmit::Transmitter;
use crate::types::{Direction, PowerState};

use super::{Device, PowerControl};

/// A fan with discrete speeds, optional direction and oscillation.
///
/// Speeds are exposed as percentages: with `n` speeds, speed `i` (counting
/// from 1) is `i * 100 / n` percent, and a percentage selects the first
/// speed whose value is not below it.
#[derive(Debug)]
pub struct FanDevice<T> {
    device: Device<T>,
}

impl<T: Transmitter> FanDevice<T> {
    pub(crate) fn from_device(device: Device<T>) -> Self {
        Self { device }
    }

    /// Loads the fan table named by `config` and builds the fan.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be loaded or is invalid, or if
    /// the configuration is invalid.
    pub async fn load(
        config: DeviceConfig,
        loader: &TableLoader,
        transmitter: T,
    ) -> Result<Self, Error> {
        let table = loader.load(DeviceClass::Fan, config.device_code).await?;
        Device::builder(config, table, transmitter).build_fan()
    }

    /// Returns the underlying device.
    #[must_use]
    pub fn device(&self) -> &Device<T> {
        &self.device
    }

    /// Sets the speed; `0` turns the fan off.
    pub async fn set_percentage(&self, percentage: u8) -> Outcome {
        self.device
            .submit(&FanRequest::new().with_percentage(percentage))
            .await
    }

    /// Turns the fan on, at `percentage` or else at its current speed.
    pub async fn turn_on_at(&self, percentage: Option<u8>) -> Outcome {
        let request = match percentage {
            Some(percentage) => FanRequest::new().with_percentage(percentage),
            None => FanRequest::new().with_power(PowerState::On),
        };
        self.device.submit(&request).await
    }

    /// Starts or stops oscillation.
    ///
    /// A fan that is off stays off; the setting is sent with the next
    /// power-on.
    pub async fn oscillate(&self, oscillating: bool) -> Outcome {
        self.device
            .submit(&FanRequest::new().with_oscillating(oscillating))
            .await
    }

    /// Sets the rotation direction.
    pub async fn set_direction(&self, direction: Direction) -> Outcome {
        self.device
            .submit(&FanRequest::new().with_direction(direction))
            .await
    }

    /// Returns the presentation view of the fan.
    #[must_use]
    pub fn view(&self) -> FanView {
        FanView::new(&self.device.state(), self.device.table(), self.device.policy())
    }

    /// Returns the current speed as a percentage.
    #[must_use]
    pub fn percentage(&self) -> Option<u8> {
        self.view().percentage
    }

    /// Returns the number of speeds.
    #[must_use]
    pub fn speed_count(&self) -> usize {
        self.device.table().speeds().len()
    }

    /// Returns the oscillation state, if supported.
    #[must_use]
    pub fn oscillating(&self) -> Option<bool> {
        self.view().oscillating
    }

    /// Returns the current direction, if supported and known.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        if self.device.capabilities().direction {
            self.view().direction
        } else {
            None
        }
    }
}

impl<T: Transmitter> PowerControl for FanDevice<T> {
    async fn turn_on(&self) -> Outcome {
        self.turn_on_at(None).await
    }

    async fn turn_off(&self) -> Outcome {
        self.device
            .submit(&FanRequest::new().with_power(PowerState::Off))
            .await
    }

    fn is_on(&self) -> bool {
        self.device.state().is_on()
    }
}
