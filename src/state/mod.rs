// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state management types.
//!
//! [`DeviceState`] is the engine's model of what the appliance is doing,
//! based on what has actually been transmitted. It is changed through
//! [`StateChange`] effects: every transmitted step carries the change it
//! causes, so a partially sent sequence can be reflected exactly.
//!
//! [`FanView`] and [`LightView`] are the read-side projections handed to a
//! presentation layer. They hide last-known values that may be stale after
//! the appliance was switched by its own remote.
//!
//! # Examples
//!
//! ```
//! use irseq_lib::state::{DeviceState, StateChange};
//! use irseq_lib::types::PowerState;
//!
//! let mut state = DeviceState::default();
//!
//! let changed = state.apply(&StateChange::Power(PowerState::On));
//! assert!(changed);
//! assert_eq!(state.power(), PowerState::On);
//!
//! // Applying the same change again is a no-op
//! assert!(!state.apply(&StateChange::Power(PowerState::On)));
//! ```

mod device_state;
mod state_change;
mod view;

pub use device_state::DeviceState;
pub use state_change::StateChange;
pub use view::{FanView, LightView, Presence, PresentationPolicy};
