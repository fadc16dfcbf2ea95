// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel-backed transmitter.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};

use crate::error::TransmitError;
use crate::types::CodeToken;

use super::Transmitter;

/// A code waiting to be sent by the transport task.
///
/// The transport must answer through [`TransmitRequest::complete`]; dropping
/// the request reports [`TransmitError::ChannelClosed`] to the sender.
#[derive(Debug)]
pub struct TransmitRequest {
    code: CodeToken,
    ack: oneshot::Sender<Result<(), TransmitError>>,
}

impl TransmitRequest {
    /// Returns the code to send.
    #[must_use]
    pub fn code(&self) -> &CodeToken {
        &self.code
    }

    /// Reports the result of the send back to the sequencer.
    pub fn complete(self, result: Result<(), TransmitError>) {
        // The sequencer may have timed out and stopped waiting
        let _ = self.ack.send(result);
    }
}

/// A [`Transmitter`] that queues codes on a bounded tokio channel.
///
/// # Examples
///
/// ```
/// use irseq_lib::transmit::{ChannelTransmitter, Transmitter};
/// use irseq_lib::types::CodeToken;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (transmitter, mut rx) = ChannelTransmitter::new(8);
///
/// tokio::spawn(async move {
///     while let Some(request) = rx.recv().await {
///         // Hand request.code() to the real hub here
///         request.complete(Ok(()));
///     }
/// });
///
/// transmitter.send(&CodeToken::from("JgBQAAAB")).await.unwrap();
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ChannelTransmitter {
    sender: mpsc::Sender<TransmitRequest>,
    timeout: Option<Duration>,
}

impl ChannelTransmitter {
    /// Creates a transmitter and the receiving end for the transport task.
    ///
    /// A `capacity` of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<TransmitRequest>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (
            Self {
                sender,
                timeout: None,
            },
            receiver,
        )
    }

    /// Fails sends that are not acknowledged within `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    async fn round_trip(&self, code: &CodeToken) -> Result<(), TransmitError> {
        let (ack, done) = oneshot::channel();
        self.sender
            .send(TransmitRequest {
                code: code.clone(),
                ack,
            })
            .await
            .map_err(|_| TransmitError::ChannelClosed)?;
        done.await.map_err(|_| TransmitError::ChannelClosed)?
    }
}

impl Transmitter for ChannelTransmitter {
    async fn send(&self, code: &CodeToken) -> Result<(), TransmitError> {
        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.round_trip(code))
                .await
                .map_err(|_| {
                    TransmitError::Timeout(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX))
                })?,
            None => self.round_trip(code).await,
        }
    }
}
