// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `irseq` Lib - Command sequencing for IR/RF controlled fans and lights.
//!
//! Appliances driven by an infrared or radio remote cannot be asked for
//! their state, and many only understand relative commands ("one step
//! brighter"). This library turns a desired state into the codes that get
//! an appliance there, sends them one at a time, and tracks what the
//! appliance should now be doing.
//!
//! # Features
//!
//! - **Command tables**: validated per-model code tables, loaded from JSON
//! - **Target resolution**: minimal ordered code sequences for fans and lights
//! - **Ladder stepping**: relative brightness/color temperature walks with
//!   resynchronization at the ends of the range
//! - **Serialized execution**: one sequence per device at a time, with the
//!   configured delay after each code and partial-failure aware commits
//! - **Reconciliation**: power sensor feedback, remote-control detection and
//!   availability gating
//! - **Events**: commits, aborts and remote changes on a broadcast bus
//!
//! # Quick Start
//!
//! ```no_run
//! use irseq_lib::config::DeviceConfig;
//! use irseq_lib::device::{FanDevice, PowerControl};
//! use irseq_lib::loader::TableLoader;
//! use irseq_lib::transmit::ChannelTransmitter;
//!
//! #[tokio::main]
//! async fn main() -> irseq_lib::Result<()> {
//!     let (transmitter, mut codes) = ChannelTransmitter::new(16);
//!     tokio::spawn(async move {
//!         while let Some(request) = codes.recv().await {
//!             // Forward request.code() to the IR blaster here
//!             request.complete(Ok(()));
//!         }
//!     });
//!
//!     let config = DeviceConfig::from_json(
//!         r#"{ "name": "Bedroom fan", "device_code": 1020 }"#,
//!     )?;
//!     let fan = FanDevice::load(config, &TableLoader::new("/etc/irseq"), transmitter).await?;
//!
//!     fan.set_percentage(66).await.into_result()?;
//!     fan.turn_off().await.into_result()?;
//!     Ok(())
//! }
//! ```

pub mod capabilities;
pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod loader;
pub mod reconcile;
pub mod resolve;
pub mod sequencer;
pub mod state;
pub mod table;
pub mod transmit;
pub mod types;

pub use capabilities::{Capabilities, ColorMode};
pub use config::{DeviceConfig, SignalSource};
pub use device::{Device, DeviceBuilder, FanDevice, LightDevice, PowerControl};
pub use error::{Error, LoadError, Result, SequenceError, TableError, TransmitError, ValueError};
pub use event::{DeviceEvent, DeviceId, EventBus};
pub use reconcile::SignalReading;
pub use resolve::{FanRequest, LightRequest};
pub use sequencer::Outcome;
pub use state::{DeviceState, StateChange};
pub use table::{CommandTable, DeviceClass};
pub use transmit::{ChannelTransmitter, Transmitter};
pub use types::{CodeToken, Direction, PowerState, ValueKind};
