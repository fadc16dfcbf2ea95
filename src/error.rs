// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `irseq` library.
//!
//! Errors fall into two groups:
//!
//! - **Setup-time** errors ([`TableError`], [`LoadError`], [`ValueError`]) are
//!   fatal to creating a device. A device is never built from a malformed
//!   command table or configuration.
//! - **Per-request** errors ([`SequenceError`]) abort a single command
//!   sequence. They are reported as part of an
//!   [`Outcome`](crate::sequencer::Outcome) rather than raised, so the device
//!   stays usable after a failed request.

use std::path::PathBuf;

use thiserror::Error;

use crate::table::DeviceClass;
use crate::types::ValueKind;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The device command table is structurally invalid.
    #[error("invalid device table: {0}")]
    Table(#[from] TableError),

    /// The device command table could not be loaded.
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// A command sequence was aborted.
    #[error("sequence aborted: {0}")]
    Sequence(#[from] SequenceError),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u32,
        /// Maximum allowed value.
        max: u32,
        /// The actual value that was provided.
        actual: u32,
    },

    /// An invalid power state string was provided.
    #[error("invalid power state: {0}")]
    InvalidPowerState(String),

    /// A duration setting is zero, negative or not finite.
    #[error("invalid duration for {field}: {value}")]
    InvalidDuration {
        /// The configuration field.
        field: &'static str,
        /// The rejected value in seconds.
        value: f64,
    },

    /// A configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Structural errors in a device command table.
///
/// Raised while building a [`CommandTable`](crate::table::CommandTable);
/// a device cannot be created from a table that fails these checks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A ladder is declared but has no entries.
    #[error("{0} ladder is empty")]
    EmptyLadder(&'static str),

    /// A ladder contains the same value twice or is not ascending.
    #[error("{0} ladder must be strictly ascending")]
    UnorderedLadder(&'static str),

    /// A relative ladder is declared without one of its step commands.
    #[error("{kind} ladder requires the '{command}' command")]
    MissingStepCommand {
        /// The ladder kind.
        kind: ValueKind,
        /// The missing step command name.
        command: &'static str,
    },

    /// An absolute value table has no code for one of the ladder values.
    #[error("{kind} value {value} has no absolute command")]
    MissingAbsoluteCode {
        /// The value kind.
        kind: ValueKind,
        /// The ladder value lacking a code.
        value: u32,
    },

    /// Absolute value commands exist without a ladder to snap values to.
    #[error("{0} commands are defined without a value ladder")]
    AbsoluteWithoutLadder(ValueKind),

    /// A fan table has no speed ladder.
    #[error("fan table requires a non-empty speed list")]
    MissingSpeedLadder,

    /// A fan table has no direction/speed command matrix.
    #[error("fan table requires at least one direction with speed commands")]
    MissingSpeedCommands,

    /// The table was validated for another device class.
    #[error("expected a {expected} table, found a {found} table")]
    WrongClass {
        /// The class the caller needs.
        expected: DeviceClass,
        /// The class of the table.
        found: DeviceClass,
    },

    /// The table document is not valid device data JSON.
    #[error("device table is not valid JSON: {0}")]
    Json(String),

    /// A command entry has an unsupported shape.
    #[error("command '{name}' is malformed: {reason}")]
    MalformedCommand {
        /// The command key.
        name: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Errors raised while loading a device table from storage.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No table file exists for the device code.
    #[error("no device table for code {code} in {searched:?}")]
    NotFound {
        /// The requested device code.
        code: u32,
        /// Directories that were searched.
        searched: Vec<PathBuf>,
    },

    /// The table file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The table file is not valid device data JSON.
    #[error("failed to parse {path}: {source}")]
    Json {
        /// The file path.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Failure reported by a [`Transmitter`](crate::transmit::Transmitter).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransmitError {
    /// The transport rejected or failed to send the code.
    #[error("transmission failed: {0}")]
    Failed(String),

    /// The transport is gone (e.g. its consumer task stopped).
    #[error("transmitter channel closed")]
    ChannelClosed,

    /// The transport did not complete in time.
    #[error("transmission timed out after {0} ms")]
    Timeout(u64),
}

/// Reasons a command sequence is aborted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// A requested action has no code in the device table.
    #[error("missing command: {0}")]
    MissingCommand(String),

    /// The transmitter failed to send a code.
    #[error(transparent)]
    Transmit(#[from] TransmitError),

    /// The availability gate is closed.
    #[error("device is unavailable")]
    Unavailable,
}

impl SequenceError {
    /// Returns `true` if the request was refused before the sequence started.
    ///
    /// Missing commands and transmission failures may occur after earlier
    /// actions of the same sequence were already sent.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
