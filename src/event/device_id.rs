// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device identifier type.

use std::fmt;

use uuid::Uuid;

/// Namespace for identifiers derived from configured unique ids.
const UNIQUE_ID_NAMESPACE: Uuid = Uuid::from_u128(0x5f0c_2a4e_91d3_4b7a_8e61_c0de_1a5e_0001);

/// Identifier of a controlled device, carried by logs and events.
///
/// Devices configured with a `unique_id` get a stable identifier derived
/// from it, so events keep the same id across restarts. Other devices get
/// a random one.
///
/// # Examples
///
/// ```
/// use irseq_lib::event::DeviceId;
///
/// let a = DeviceId::from_unique_id("living_room_fan");
/// let b = DeviceId::from_unique_id("living_room_fan");
/// assert_eq!(a, b);
/// assert_ne!(a, DeviceId::new());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DeviceId(Uuid);

impl DeviceId {
    /// Creates a random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derives a stable identifier from a configured unique id.
    #[must_use]
    pub fn from_unique_id(unique_id: &str) -> Self {
        Self(Uuid::new_v5(&UNIQUE_ID_NAMESPACE, unique_id.as_bytes()))
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DeviceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let simple = self.0.simple().to_string();
        write!(f, "DeviceId({}..)", &simple[..8])
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for DeviceId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_differ() {
        assert_ne!(DeviceId::new(), DeviceId::new());
    }

    #[test]
    fn unique_id_derivation_is_stable() {
        let a = DeviceId::from_unique_id("bedroom_light");
        assert_eq!(a, DeviceId::from_unique_id("bedroom_light"));
        assert_ne!(a, DeviceId::from_unique_id("kitchen_light"));
        assert_eq!(a.as_uuid().get_version_num(), 5);
    }

    #[test]
    fn debug_is_shortened() {
        let id = DeviceId::from(Uuid::nil());
        assert_eq!(format!("{id:?}"), "DeviceId(00000000..)");
    }

    #[test]
    fn serializes_as_plain_uuid() {
        let id = DeviceId::from(Uuid::nil());
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"00000000-0000-0000-0000-000000000000\""
        );
    }
}
