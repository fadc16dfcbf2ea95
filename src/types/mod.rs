// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared across the engine.

mod code;
mod direction;
pub mod percentage;
mod power;
mod value_kind;

pub use code::CodeToken;
pub use direction::Direction;
pub use power::PowerState;
pub use value_kind::ValueKind;
