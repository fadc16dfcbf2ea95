// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered value ladders.

use crate::error::TableError;

/// A non-empty, strictly ascending list of legal values.
///
/// Requested values are snapped to the closest rung. When a value lies
/// exactly between two rungs the lower index wins.
///
/// # Examples
///
/// ```
/// use irseq_lib::table::ValueLadder;
///
/// let ladder = ValueLadder::new("brightness", vec![10, 50, 100, 255]).unwrap();
/// assert_eq!(ladder.closest_index(60), 1);
/// assert_eq!(ladder.closest_value(200), 255);
/// // 30 is equally far from 10 and 50
/// assert_eq!(ladder.closest_value(30), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueLadder {
    values: Vec<u32>,
}

impl ValueLadder {
    /// Creates a ladder from ascending values.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::EmptyLadder`] if `values` is empty and
    /// [`TableError::UnorderedLadder`] if it is not strictly ascending.
    pub fn new(name: &'static str, values: Vec<u32>) -> Result<Self, TableError> {
        if values.is_empty() {
            return Err(TableError::EmptyLadder(name));
        }
        if values.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(TableError::UnorderedLadder(name));
        }
        Ok(Self { values })
    }

    /// Returns the index of the rung closest to `value`.
    #[must_use]
    pub fn closest_index(&self, value: u32) -> usize {
        let mut best = 0;
        let mut best_distance = u32::MAX;
        for (index, rung) in self.values.iter().enumerate() {
            let distance = rung.abs_diff(value);
            // Strict comparison keeps the lower index on ties
            if distance < best_distance {
                best = index;
                best_distance = distance;
            }
        }
        best
    }

    /// Returns the rung closest to `value`.
    #[must_use]
    pub fn closest_value(&self, value: u32) -> u32 {
        self.values[self.closest_index(value)]
    }

    /// Returns the value at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<u32> {
        self.values.get(index).copied()
    }

    /// Returns `true` if `index` is the first or last rung.
    #[must_use]
    pub fn is_endpoint(&self, index: usize) -> bool {
        index == 0 || index == self.last_index()
    }

    /// Returns the index of the top rung.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.values.len() - 1
    }

    /// Returns the lowest value.
    #[must_use]
    pub fn min(&self) -> u32 {
        self.values[0]
    }

    /// Returns the highest value.
    #[must_use]
    pub fn max(&self) -> u32 {
        self.values[self.last_index()]
    }

    /// Returns `true` if `value` is one of the rungs.
    #[must_use]
    pub fn contains(&self, value: u32) -> bool {
        self.values.binary_search(&value).is_ok()
    }

    /// Returns the number of rungs.
    #[must_use]
    #[allow(clippy::len_without_is_empty)] // never empty
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns the rungs in ascending order.
    #[must_use]
    pub fn values(&self) -> &[u32] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder() -> ValueLadder {
        ValueLadder::new("brightness", vec![10, 50, 100, 255]).unwrap()
    }

    #[test]
    fn rejects_empty_ladder() {
        assert_eq!(
            ValueLadder::new("brightness", vec![]),
            Err(TableError::EmptyLadder("brightness"))
        );
    }

    #[test]
    fn rejects_unordered_ladder() {
        assert_eq!(
            ValueLadder::new("colorTemperature", vec![6500, 2700]),
            Err(TableError::UnorderedLadder("colorTemperature"))
        );
        assert!(ValueLadder::new("brightness", vec![10, 10]).is_err());
    }

    #[test]
    fn closest_index_snaps_to_nearest() {
        let ladder = ladder();
        assert_eq!(ladder.closest_index(0), 0);
        assert_eq!(ladder.closest_index(74), 1);
        assert_eq!(ladder.closest_index(76), 2);
        assert_eq!(ladder.closest_index(1000), 3);
    }

    #[test]
    fn closest_match_minimizes_distance_for_every_value() {
        let ladder = ladder();
        for value in 0..300 {
            let chosen = ladder.closest_value(value).abs_diff(value);
            let best = ladder.values().iter().map(|r| r.abs_diff(value)).min().unwrap();
            assert_eq!(chosen, best, "value {value}");
        }
    }

    #[test]
    fn ties_pick_lower_index() {
        let ladder = ladder();
        assert_eq!(ladder.closest_index(75), 1);
        assert_eq!(ladder.closest_index(30), 0);
    }

    #[test]
    fn endpoints() {
        let ladder = ladder();
        assert!(ladder.is_endpoint(0));
        assert!(ladder.is_endpoint(3));
        assert!(!ladder.is_endpoint(1));
        assert_eq!(ladder.min(), 10);
        assert_eq!(ladder.max(), 255);
    }

    #[test]
    fn single_rung_is_both_endpoints() {
        let ladder = ValueLadder::new("brightness", vec![128]).unwrap();
        assert!(ladder.is_endpoint(0));
        assert_eq!(ladder.closest_index(3), 0);
    }
}
