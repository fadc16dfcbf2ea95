// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validated device command tables.
//!
//! A device table is loaded once per device as raw [`DeviceData`] (the JSON
//! shape used by code files) and converted into an immutable
//! [`CommandTable`]. All structural checks happen during that conversion,
//! so a constructed table can always serve the capabilities it declares.
//!
//! # Examples
//!
//! ```
//! use irseq_lib::table::{CommandTable, DeviceClass, DiscreteCommand};
//!
//! let json = r#"{
//!     "manufacturer": "Acme",
//!     "supportedModels": ["L-1"],
//!     "supportedController": "Broadlink",
//!     "commandsEncoding": "Base64",
//!     "brightness": [10, 50, 100, 255],
//!     "commands": { "on": "AAA=", "off": "BBB=", "dim": "CCC=", "brighten": "DDD=" }
//! }"#;
//!
//! let table = CommandTable::from_json(DeviceClass::Light, json).unwrap();
//! assert!(table.resolve_discrete(DiscreteCommand::Dim).is_some());
//! assert_eq!(table.ladder(irseq_lib::types::ValueKind::Brightness).unwrap().len(), 4);
//! ```

mod command_table;
mod ladder;
mod raw;

pub use command_table::{CommandTable, DiscreteCommand};
pub use ladder::ValueLadder;
pub use raw::{DeviceClass, DeviceData};
