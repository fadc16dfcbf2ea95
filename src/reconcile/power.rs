// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Delayed verification of transmitted power changes.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::AbortHandle;
use tracing::{Span, debug, warn};

use crate::event::{DeviceEvent, DeviceId, EventBus};
use crate::types::PowerState;

use super::SignalReading;

/// Checks that the power sensor follows transmitted power changes.
///
/// The sequencer calls [`PowerMonitor::expect`] right before it sends the
/// first code of a sequence that changes power. After the configured delay
/// the last sensor reading is compared with the expectation; a mismatch is
/// logged and published as [`DeviceEvent::PowerCheckFailed`]. The tracked
/// state is never corrected by the check.
///
/// A new expectation replaces a pending one. A sensor reading matching the
/// pending expectation settles it early.
#[derive(Debug, Clone)]
pub struct PowerMonitor {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    device_id: DeviceId,
    delay: Duration,
    events: EventBus,
    span: Span,
    reading: Mutex<SignalReading>,
    pending: Mutex<Option<Pending>>,
}

#[derive(Debug)]
struct Pending {
    generation: u64,
    expected: PowerState,
    timer: AbortHandle,
}

impl PowerMonitor {
    /// Creates a monitor that checks `delay` after each power change.
    ///
    /// Check results are logged in `span`.
    #[must_use]
    pub fn new(device_id: DeviceId, delay: Duration, events: EventBus, span: Span) -> Self {
        Self {
            inner: Arc::new(Inner {
                device_id,
                delay,
                events,
                span,
                reading: Mutex::new(SignalReading::Unknown),
                pending: Mutex::new(None),
            }),
        }
    }

    /// Returns the last sensor reading.
    #[must_use]
    pub fn reading(&self) -> SignalReading {
        *self.inner.reading.lock()
    }

    /// Returns the power state a pending check expects.
    #[must_use]
    pub fn pending(&self) -> Option<PowerState> {
        self.inner.pending.lock().as_ref().map(|p| p.expected)
    }

    /// Schedules a check for `expected`, replacing any pending one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn expect(&self, expected: PowerState) {
        let mut pending = self.inner.pending.lock();
        let generation = match pending.take() {
            Some(previous) => {
                previous.timer.abort();
                previous.generation.wrapping_add(1)
            }
            None => 0,
        };

        let inner = Arc::clone(&self.inner);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(inner.delay).await;
            inner.verify(generation);
        })
        .abort_handle();

        *pending = Some(Pending {
            generation,
            expected,
            timer,
        });
    }

    /// Records a sensor reading and returns the previous one.
    ///
    /// A reading that matches the pending expectation settles the check.
    pub fn record(&self, reading: SignalReading) -> SignalReading {
        let previous = std::mem::replace(&mut *self.inner.reading.lock(), reading);

        let mut pending = self.inner.pending.lock();
        let settled = pending
            .as_ref()
            .is_some_and(|check| Some(check.expected) == reading.power());
        if let Some(check) = pending.take_if(|_| settled) {
            check.timer.abort();
            debug!(
                parent: &self.inner.span,
                power = %check.expected,
                "Power sensor confirmed transmitted state"
            );
        }
        previous
    }
}

impl Inner {
    fn verify(&self, generation: u64) {
        let Some(expected) = self
            .pending
            .lock()
            .take_if(|check| check.generation == generation)
            .map(|check| check.expected)
        else {
            return;
        };

        match self.reading.lock().power() {
            Some(observed) if observed != expected => {
                warn!(
                    parent: &self.span,
                    %expected,
                    %observed,
                    "Power sensor does not match transmitted state"
                );
                self.events.publish(DeviceEvent::PowerCheckFailed {
                    device_id: self.device_id,
                    expected,
                    observed,
                });
            }
            Some(_) => debug!(parent: &self.span, %expected, "Power check passed"),
            None => debug!(parent: &self.span, %expected, "Power check inconclusive, no sensor reading"),
        }
    }
}
