// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The boundary to the physical IR/RF transmitter.
//!
//! The engine hands opaque [`CodeToken`]s to a [`Transmitter`] one at a
//! time and waits for each send to finish before pausing and sending the
//! next one. How a code reaches the air (a Broadlink hub, an MQTT blaster,
//! a test recorder) is up to the implementation.
//!
//! [`ChannelTransmitter`] forwards codes over a tokio channel to a task that
//! owns the real transport.

mod channel;

pub use channel::{ChannelTransmitter, TransmitRequest};

use std::future::Future;
use std::sync::Arc;

use crate::error::TransmitError;
use crate::types::CodeToken;

/// Sends codes to a physical device.
///
/// Implementations may be written with `async fn`.
///
/// # Examples
///
/// ```
/// use irseq_lib::error::TransmitError;
/// use irseq_lib::transmit::Transmitter;
/// use irseq_lib::types::CodeToken;
///
/// struct Console;
///
/// impl Transmitter for Console {
///     async fn send(&self, code: &CodeToken) -> Result<(), TransmitError> {
///         println!("sending {code:?}");
///         Ok(())
///     }
/// }
/// ```
pub trait Transmitter: Send + Sync {
    /// Sends one code and resolves once the transport accepted it.
    ///
    /// # Errors
    ///
    /// Returns a [`TransmitError`] if the code could not be sent. The
    /// current sequence is aborted.
    fn send(&self, code: &CodeToken) -> impl Future<Output = Result<(), TransmitError>> + Send;
}

impl<T: Transmitter> Transmitter for Arc<T> {
    fn send(&self, code: &CodeToken) -> impl Future<Output = Result<(), TransmitError>> + Send {
        (**self).send(code)
    }
}
