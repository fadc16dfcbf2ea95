// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device events.
//!
//! Committed sequences, aborted sequences, remote changes, failed power
//! checks and availability changes are published on an [`EventBus`] built
//! on tokio's broadcast channel.
//!
//! # Examples
//!
//! ```
//! use irseq_lib::event::{DeviceEvent, DeviceId, EventBus};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(DeviceEvent::AvailabilityChanged {
//!     device_id: DeviceId::new(),
//!     available: false,
//! });
//! assert!(rx.try_recv().is_ok());
//! ```

mod device_event;
mod device_id;
mod event_bus;

pub use device_event::DeviceEvent;
pub use device_id::DeviceId;
pub use event_bus::EventBus;
