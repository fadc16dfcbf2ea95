// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lock-protected state of one device.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use tokio::sync::{Mutex, MutexGuard};

use crate::state::DeviceState;

/// The authoritative state of one device and its command lock.
///
/// Writers (the sequencer and the reconciliation handlers) hold the async
/// lock for their whole critical section; waiting writers are served in
/// FIFO order. Readers take a snapshot without waiting for an in-flight
/// sequence, and see the state as of the last commit.
#[derive(Debug)]
pub struct DeviceCell {
    state: RwLock<DeviceState>,
    gate: Mutex<()>,
    available: AtomicBool,
}

impl DeviceCell {
    /// Creates an available device in `state`.
    #[must_use]
    pub fn new(state: DeviceState) -> Self {
        Self {
            state: RwLock::new(state),
            gate: Mutex::new(()),
            available: AtomicBool::new(true),
        }
    }

    /// Returns a copy of the last committed state.
    #[must_use]
    pub fn snapshot(&self) -> DeviceState {
        self.state.read().clone()
    }

    /// Returns `true` if the availability gate is open.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Acquire)
    }

    /// Opens or closes the availability gate, returning `true` on a change.
    pub(crate) fn set_available(&self, available: bool) -> bool {
        self.available.swap(available, Ordering::AcqRel) != available
    }

    /// Waits for exclusive write access.
    pub(crate) async fn lock(&self) -> CellGuard<'_> {
        CellGuard {
            _gate: self.gate.lock().await,
            cell: self,
        }
    }
}

/// Exclusive write access to a [`DeviceCell`].
pub(crate) struct CellGuard<'a> {
    _gate: MutexGuard<'a, ()>,
    cell: &'a DeviceCell,
}

impl CellGuard<'_> {
    pub(crate) fn state(&self) -> DeviceState {
        self.cell.snapshot()
    }

    pub(crate) fn commit(&self, state: DeviceState) {
        *self.cell.state.write() = state;
    }

    pub(crate) fn is_available(&self) -> bool {
        self.cell.is_available()
    }
}
