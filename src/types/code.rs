// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opaque transmittable code tokens.

use std::fmt;

/// An opaque IR/RF code understood only by the transmitter.
///
/// The engine never inspects the content of a code. It only compares codes
/// for equality (to detect identical on/off toggle codes) and hands them to
/// the [`Transmitter`](crate::transmit::Transmitter).
#[derive(Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CodeToken(String);

impl CodeToken {
    /// Wraps an encoded code.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the encoded code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CodeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Raw codes can be several kilobytes long
        match self.0.char_indices().nth(16) {
            Some((cut, _)) => write!(f, "CodeToken({}.. {} bytes)", &self.0[..cut], self.0.len()),
            None => write!(f, "CodeToken({})", self.0),
        }
    }
}

impl From<&str> for CodeToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
