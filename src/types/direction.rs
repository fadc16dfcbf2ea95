// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan rotation direction.

use std::fmt;

/// Symbolic fan direction, used as the first key of the speed matrix.
///
/// Fans that cannot reverse keep all speed codes under the `"default"` key.
/// Reversible fans use `"forward"` and `"reverse"`.
///
/// # Examples
///
/// ```
/// use irseq_lib::types::Direction;
///
/// assert_eq!(Direction::default().as_str(), "default");
/// assert_eq!(Direction::forward().as_str(), "forward");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct Direction(String);

impl Direction {
    /// Key for fans without direction support.
    pub const DEFAULT_KEY: &'static str = "default";
    /// Key for forward rotation.
    pub const FORWARD: &'static str = "forward";
    /// Key for reverse rotation.
    pub const REVERSE: &'static str = "reverse";

    /// Creates a direction from its table key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The forward direction.
    #[must_use]
    pub fn forward() -> Self {
        Self::new(Self::FORWARD)
    }

    /// The reverse direction.
    #[must_use]
    pub fn reverse() -> Self {
        Self::new(Self::REVERSE)
    }

    /// Returns the table key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Direction {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
