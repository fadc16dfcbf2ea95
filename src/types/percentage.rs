// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mapping between ordered speed lists and percentages.
//!
//! A list of `n` speeds divides 1-100% into `n` equal bands. Speed `i`
//! (zero-based) is reported as `(i + 1) * 100 / n` and a percentage maps to
//! the first speed whose band upper bound is not below it.

/// Returns the percentage reported for `item`, or `None` if not in the list.
///
/// # Examples
///
/// ```
/// use irseq_lib::types::percentage::ordered_item_to_percentage;
///
/// let speeds = ["low", "medium", "high"];
/// assert_eq!(ordered_item_to_percentage(&speeds, &"low"), Some(33));
/// assert_eq!(ordered_item_to_percentage(&speeds, &"high"), Some(100));
/// ```
#[must_use]
pub fn ordered_item_to_percentage<T: PartialEq>(list: &[T], item: &T) -> Option<u8> {
    let position = list.iter().position(|entry| entry == item)? + 1;
    // position <= len, so the quotient is at most 100
    #[allow(clippy::cast_possible_truncation)]
    let percentage = (position * 100 / list.len()) as u8;
    Some(percentage)
}

/// Returns the list item for `percentage`, or `None` for an empty list.
///
/// Percentages above 100 map to the last item.
///
/// # Examples
///
/// ```
/// use irseq_lib::types::percentage::percentage_to_ordered_item;
///
/// let speeds = ["low", "medium", "high"];
/// assert_eq!(percentage_to_ordered_item(&speeds, 1), Some(&"low"));
/// assert_eq!(percentage_to_ordered_item(&speeds, 34), Some(&"medium"));
/// assert_eq!(percentage_to_ordered_item(&speeds, 100), Some(&"high"));
/// ```
#[must_use]
pub fn percentage_to_ordered_item<T>(list: &[T], percentage: u8) -> Option<&T> {
    let len = list.len();
    list.iter()
        .enumerate()
        .find(|(offset, _)| usize::from(percentage) <= (offset + 1) * 100 / len)
        .map(|(_, item)| item)
        .or_else(|| list.last())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_bands_for_four_speeds() {
        let speeds = [1, 2, 3, 4];
        assert_eq!(percentage_to_ordered_item(&speeds, 25), Some(&1));
        assert_eq!(percentage_to_ordered_item(&speeds, 26), Some(&2));
        assert_eq!(percentage_to_ordered_item(&speeds, 75), Some(&3));
        assert_eq!(percentage_to_ordered_item(&speeds, 76), Some(&4));
    }

    #[test]
    fn percentage_over_hundred_maps_to_last() {
        let speeds = ["low", "high"];
        assert_eq!(percentage_to_ordered_item(&speeds, 250), Some(&"high"));
    }

    #[test]
    fn empty_list_has_no_item() {
        let speeds: [&str; 0] = [];
        assert_eq!(percentage_to_ordered_item(&speeds, 50), None);
    }

    #[test]
    fn unknown_item_has_no_percentage() {
        let speeds = ["low", "high"];
        assert_eq!(ordered_item_to_percentage(&speeds, &"turbo"), None);
    }

    #[test]
    fn item_percentage_round_trips_through_bands() {
        let speeds = ["a", "b", "c", "d", "e", "f", "g"];
        for speed in &speeds {
            let pct = ordered_item_to_percentage(&speeds, speed).unwrap();
            assert_eq!(percentage_to_ordered_item(&speeds, pct), Some(speed));
        }
    }
}
