// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relative ladder stepping.
//!
//! Devices without absolute brightness or color temperature codes only
//! understand "one step up" and "one step down". Moving between two rungs
//! sends the step command once per rung.
//!
//! The engine cannot observe the real rung, so its belief may have drifted
//! (a step lost in transit, a remote control used by hand). Whenever the
//! target is the first or the last rung, the walk sends as many steps as the
//! ladder has rungs: the device saturates at the end of its range, which
//! puts it back in sync regardless of where it actually was.
//!
//! ```
//! use irseq_lib::resolve::stepper;
//! use irseq_lib::table::{DiscreteCommand, ValueLadder};
//! use irseq_lib::types::ValueKind;
//!
//! let ladder = ValueLadder::new("brightness", vec![10, 50, 100, 255]).unwrap();
//! let walk = stepper::walk(&ladder, ValueKind::Brightness, 0, 3);
//! assert_eq!(walk.command, DiscreteCommand::Brighten);
//! assert_eq!(walk.positions, vec![1, 2, 3, 3]);
//! ```

use crate::table::{DiscreteCommand, ValueLadder};
use crate::types::ValueKind;

/// A resolved ladder walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LadderWalk {
    /// The step command to repeat.
    pub command: DiscreteCommand,
    /// Believed ladder index after each step.
    pub positions: Vec<usize>,
}

impl LadderWalk {
    /// Returns the number of step commands in the walk.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.positions.len()
    }
}

/// Plans a walk from index `from` to index `to`.
///
/// Indices beyond the ladder are clamped to its last rung.
#[must_use]
pub fn walk(ladder: &ValueLadder, kind: ValueKind, from: usize, to: usize) -> LadderWalk {
    let last = ladder.last_index();
    let from = from.min(last);
    let to = to.min(last);
    let (decrease, increase) = DiscreteCommand::steps_for(kind);

    // At equal indices only an endpoint target needs steps, toward itself
    let increasing = match to.cmp(&from) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => to != 0,
    };

    let steps = if ladder.is_endpoint(to) {
        ladder.len()
    } else {
        to.abs_diff(from)
    };

    let mut position = from;
    let positions = (0..steps)
        .map(|_| {
            position = if increasing {
                (position + 1).min(last)
            } else {
                position.saturating_sub(1)
            };
            position
        })
        .collect();

    LadderWalk {
        command: if increasing { increase } else { decrease },
        positions,
    }
}
