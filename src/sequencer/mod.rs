// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serialized execution of command sequences.
//!
//! A [`Sequencer`] owns the command path of one device. Each submitted
//! request is, under the device lock:
//!
//! 1. checked against the availability gate,
//! 2. resolved into a [`Plan`] against the current state,
//! 3. sent code by code, waiting the configured delay after each code,
//! 4. committed.
//!
//! On success the plan's target state replaces the device state. When a
//! code is missing or a send fails, the remaining codes are skipped and the
//! state keeps only the effects of the codes already sent. Requests that
//! arrive during a sequence wait for it in FIFO order; nothing is
//! cancelled. Separate devices have separate sequencers and never wait on
//! each other.

mod cell;
mod outcome;

pub use cell::DeviceCell;
pub use outcome::Outcome;

use std::sync::Arc;
use std::time::Duration;

use tracing::{Instrument, Span, debug, warn};

use crate::error::SequenceError;
use crate::event::{DeviceEvent, DeviceId, EventBus};
use crate::reconcile::PowerMonitor;
use crate::resolve::{Plan, Resolve};
use crate::state::DeviceState;
use crate::table::CommandTable;
use crate::transmit::Transmitter;

use cell::CellGuard;

/// Default pause after each transmitted code.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Executes command sequences for one device.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use irseq_lib::error::TransmitError;
/// use irseq_lib::event::DeviceId;
/// use irseq_lib::resolve::FanRequest;
/// use irseq_lib::sequencer::{DeviceCell, Sequencer};
/// use irseq_lib::state::DeviceState;
/// use irseq_lib::table::{CommandTable, DeviceClass};
/// use irseq_lib::transmit::Transmitter;
/// use irseq_lib::types::CodeToken;
///
/// struct Null;
///
/// impl Transmitter for Null {
///     async fn send(&self, _: &CodeToken) -> Result<(), TransmitError> {
///         Ok(())
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread", start_paused = true)]
/// # async fn main() {
/// let table = CommandTable::from_json(
///     DeviceClass::Fan,
///     r#"{"manufacturer": "Acme", "speed": ["low", "high"],
///         "commands": {"off": "0", "default": {"low": "1", "high": "2"}}}"#,
/// )
/// .unwrap();
/// let cell = Arc::new(DeviceCell::new(DeviceState::initial(&table)));
/// let sequencer = Sequencer::new(DeviceId::new(), Arc::new(table), Null, cell);
///
/// let outcome = sequencer.submit(&FanRequest::new().with_percentage(100)).await;
/// assert!(outcome.is_committed());
/// assert_eq!(outcome.state().speed(), Some("high"));
/// # }
/// ```
#[derive(Debug)]
pub struct Sequencer<T> {
    device_id: DeviceId,
    table: Arc<CommandTable>,
    transmitter: T,
    cell: Arc<DeviceCell>,
    delay: Duration,
    monitor: Option<PowerMonitor>,
    events: EventBus,
    span: Span,
}

impl<T: Transmitter> Sequencer<T> {
    /// Creates a sequencer sending through `transmitter`.
    #[must_use]
    pub fn new(
        device_id: DeviceId,
        table: Arc<CommandTable>,
        transmitter: T,
        cell: Arc<DeviceCell>,
    ) -> Self {
        Self {
            device_id,
            table,
            transmitter,
            cell,
            delay: DEFAULT_DELAY,
            monitor: None,
            events: EventBus::new(),
            span: Span::none(),
        }
    }

    /// Sets the pause after each code.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Arms `monitor` before every power-changing sequence.
    #[must_use]
    pub fn with_power_monitor(mut self, monitor: PowerMonitor) -> Self {
        self.monitor = Some(monitor);
        self
    }

    /// Publishes commits and aborts on `events`.
    #[must_use]
    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    /// Logs sequences within `span`.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Returns the device state as of the last commit.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        self.cell.snapshot()
    }

    /// Returns the command table.
    #[must_use]
    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// Returns the configured pause after each code.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Resolves `request` against the current state and executes it.
    ///
    /// Waits for any sequence already running on this device.
    pub async fn submit<R: Resolve + ?Sized>(&self, request: &R) -> Outcome {
        self.run(request).instrument(self.span.clone()).await
    }

    /// Executes a pre-resolved plan.
    ///
    /// The plan was resolved against an earlier state; ladder walks start
    /// from the index recorded in the plan.
    pub async fn execute(&self, plan: Plan) -> Outcome {
        self.submit(&plan).await
    }

    async fn run<R: Resolve + ?Sized>(&self, request: &R) -> Outcome {
        if !self.cell.is_available() {
            return self.reject(self.cell.snapshot());
        }

        let guard = self.cell.lock().await;
        if !guard.is_available() {
            return self.reject(guard.state());
        }

        let initial = guard.state();
        let plan = match request.resolve(&self.table, &initial) {
            Ok(plan) => plan,
            Err(reason) => return self.abort(&guard, initial, 0, reason),
        };

        let mut reached = initial;
        let mut transmitted = 0;
        for planned in plan.actions() {
            let steps = match planned.transmit_steps(&self.table, self.delay) {
                Ok(steps) => steps,
                Err(reason) => return self.abort(&guard, reached, transmitted, reason),
            };

            for step in steps {
                if transmitted == 0
                    && let (Some(monitor), Some(expected)) = (&self.monitor, plan.expected_power())
                {
                    monitor.expect(expected);
                }

                debug!(step = %step.label, code = ?step.code, "Transmitting");
                if let Err(err) = self.transmitter.send(&step.code).await {
                    return self.abort(&guard, reached, transmitted, err.into());
                }
                transmitted += 1;
                reached.apply(&step.effect);
                tokio::time::sleep(step.delay).await;
            }
        }

        let mut state = plan.target().clone();
        state.set_on_by_remote(false);
        guard.commit(state.clone());
        debug!(transmitted, "Sequence committed");

        self.events.publish(DeviceEvent::StateCommitted {
            device_id: self.device_id,
            state: state.clone(),
            transmitted,
        });
        Outcome::Committed { state, transmitted }
    }

    fn reject(&self, state: DeviceState) -> Outcome {
        warn!("Device unavailable, request rejected");
        self.aborted(state, 0, SequenceError::Unavailable)
    }

    fn abort(
        &self,
        guard: &CellGuard<'_>,
        mut state: DeviceState,
        transmitted: usize,
        reason: SequenceError,
    ) -> Outcome {
        if transmitted > 0 {
            state.set_on_by_remote(false);
            guard.commit(state.clone());
        }
        warn!(transmitted, %reason, "Sequence aborted");
        self.aborted(state, transmitted, reason)
    }

    fn aborted(&self, state: DeviceState, transmitted: usize, reason: SequenceError) -> Outcome {
        self.events.publish(DeviceEvent::SequenceAborted {
            device_id: self.device_id,
            state: state.clone(),
            transmitted,
            reason: reason.clone(),
        });
        Outcome::Aborted {
            state,
            transmitted,
            reason,
        }
    }
}
