// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light adapter.

use crate::capabilities::ColorMode;
use crate::config::DeviceConfig;
use crate::error::Error;
use crate::loader::TableLoader;
use crate::resolve::LightRequest;
use crate::sequencer::Outcome;
use crate::state::LightView;
use crate::table::DeviceClass;
use crate::transmit::Transmitter;

use super::{Device, PowerControl};

/// A light with optional brightness and color temperature ladders.
#[derive(Debug)]
pub struct LightDevice<T> {
    device: Device<T>,
}

impl<T: Transmitter> LightDevice<T> {
    pub(crate) fn from_device(device: Device<T>) -> Self {
        Self { device }
    }

    /// Loads the light table named by `config` and builds the light.
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
        let table = loader.load(DeviceClass::Light, config.device_code).await?;
        Device::builder(config, table, transmitter).build_light()
    }

    /// Returns the underlying device.
    #[must_use]
    pub fn device(&self) -> &Device<T> {
        &self.device
    }

    /// Turns the light on and sets the given values.
    ///
    /// A value left as `None` is sent again at its tracked value. Values are
    /// snapped to the closest supported step. A brightness of 1 selects the
    /// night light when the device has one.
    pub async fn turn_on_with(&self, brightness: Option<u32>, kelvin: Option<u32>) -> Outcome {
        let request = LightRequest {
            brightness,
            color_temperature: kelvin,
            ..LightRequest::on()
        }
        .restoring_values()
        .assuming_power(self.device.config().trusts_power_state());
        self.device.submit(&request).await
    }

    /// Returns the presentation view of the light.
    #[must_use]
    pub fn view(&self) -> LightView {
        LightView::new(&self.device.state(), self.device.policy())
    }

    /// Returns the current brightness.
    #[must_use]
    pub fn brightness(&self) -> Option<u32> {
        self.view().brightness
    }

    /// Returns the current color temperature in Kelvin.
    #[must_use]
    pub fn color_temp_kelvin(&self) -> Option<u32> {
        self.view().color_temperature
    }

    /// Returns the lowest supported color temperature.
    #[must_use]
    pub fn min_color_temp_kelvin(&self) -> Option<u32> {
        self.device.capabilities().min_color_temp_kelvin
    }

    /// Returns the highest supported color temperature.
    #[must_use]
    pub fn max_color_temp_kelvin(&self) -> Option<u32> {
        self.device.capabilities().max_color_temp_kelvin
    }

    /// Returns how the light's color can be controlled.
    #[must_use]
    pub fn color_mode(&self) -> ColorMode {
        self.device
            .capabilities()
            .color_mode
            .unwrap_or(ColorMode::OnOff)
    }
}

impl<T: Transmitter> PowerControl for LightDevice<T> {
    async fn turn_on(&self) -> Outcome {
        self.turn_on_with(None, None).await
    }

    async fn turn_off(&self) -> Outcome {
        self.device.submit(&LightRequest::off()).await
    }

    fn is_on(&self) -> bool {
        self.device.state().is_on()
    }
}
