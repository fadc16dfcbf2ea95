// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Result of one command sequence.

use crate::error::{Error, SequenceError};
use crate::state::DeviceState;

/// What a submitted request ended in.
///
/// Both variants carry the device state after the sequence. An aborted
/// sequence commits the effects of the codes it sent before failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every code was sent and the target state was committed.
    Committed {
        /// The committed state.
        state: DeviceState,
        /// Number of codes sent.
        transmitted: usize,
    },
    /// The sequence stopped early.
    Aborted {
        /// The state reflecting the codes that were sent.
        state: DeviceState,
        /// Number of codes sent before the failure.
        transmitted: usize,
        /// Why the sequence stopped.
        reason: SequenceError,
    },
}

impl Outcome {
    /// Returns `true` if the target state was reached.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }

    /// Returns the device state after the sequence.
    #[must_use]
    pub fn state(&self) -> &DeviceState {
        match self {
            Self::Committed { state, .. } | Self::Aborted { state, .. } => state,
        }
    }

    /// Returns the number of codes sent.
    #[must_use]
    pub fn transmitted(&self) -> usize {
        match self {
            Self::Committed { transmitted, .. } | Self::Aborted { transmitted, .. } => *transmitted,
        }
    }

    /// Returns the abort reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&SequenceError> {
        match self {
            Self::Committed { .. } => None,
            Self::Aborted { reason, .. } => Some(reason),
        }
    }

    /// Converts into a `Result`, discarding the partial state of an abort.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Sequence`] with the abort reason.
    pub fn into_result(self) -> Result<DeviceState, Error> {
        match self {
            Self::Committed { state, .. } => Ok(state),
            Self::Aborted { reason, .. } => Err(reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aborted_outcome_converts_to_error() {
        let outcome = Outcome::Aborted {
            state: DeviceState::default(),
            transmitted: 2,
            reason: SequenceError::MissingCommand("'night'".to_string()),
        };
        assert!(!outcome.is_committed());
        assert_eq!(outcome.transmitted(), 2);
        let err = outcome.into_result().unwrap_err();
        assert!(matches!(
            err,
            Error::Sequence(SequenceError::MissingCommand(_))
        ));
    }

    #[test]
    fn committed_outcome_yields_state() {
        let outcome = Outcome::Committed {
            state: DeviceState::default(),
            transmitted: 1,
        };
        assert!(outcome.reason().is_none());
        assert_eq!(outcome.into_result().unwrap(), DeviceState::default());
    }
}
