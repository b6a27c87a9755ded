//! Bounded, pollable in-memory channel.

use crate::channel::{
    error::{ChannelConfigError, ChannelError, ChannelResult},
    ports::{MessageChannel, PollableChannel},
};
use crate::message::domain::Message;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};

/// A FIFO channel holding up to `capacity` messages until polled.
///
/// `send` waits for room and `receive` waits for a message, each bounded by
/// the caller's timeout. A zero timeout never waits.
pub struct QueueChannel {
    name: String,
    sender: mpsc::Sender<Message>,
    receiver: Mutex<mpsc::Receiver<Message>>,
}

impl QueueChannel {
    /// Creates a queue channel.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelConfigError::ZeroCapacity`] when `capacity` is zero.
    pub fn new(name: impl Into<String>, capacity: usize) -> Result<Self, ChannelConfigError> {
        let name = name.into();
        if capacity == 0 {
            return Err(ChannelConfigError::ZeroCapacity(name));
        }
        let (sender, receiver) = mpsc::channel(capacity);
        Ok(Self {
            name,
            sender,
            receiver: Mutex::new(receiver),
        })
    }

    /// Returns the number of buffered messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sender.max_capacity() - self.sender.capacity()
    }

    /// Returns `true` when no message is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the remaining room.
    #[must_use]
    pub fn remaining_capacity(&self) -> usize {
        self.sender.capacity()
    }

    fn closed(&self) -> ChannelError {
        ChannelError::Closed(self.name.clone())
    }
}

#[async_trait]
impl MessageChannel for QueueChannel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, message: Message, timeout: Option<Duration>) -> ChannelResult<bool> {
        match timeout {
            None => self
                .sender
                .send(message)
                .await
                .map(|()| true)
                .map_err(|_| self.closed()),
            Some(limit) if limit.is_zero() => match self.sender.try_send(message) {
                Ok(()) => Ok(true),
                Err(mpsc::error::TrySendError::Full(_)) => Ok(false),
                Err(mpsc::error::TrySendError::Closed(_)) => Err(self.closed()),
            },
            Some(limit) => match tokio::time::timeout(limit, self.sender.send(message)).await {
                Ok(Ok(())) => Ok(true),
                Ok(Err(_)) => Err(self.closed()),
                Err(_elapsed) => Ok(false),
            },
        }
    }
}

#[async_trait]
impl PollableChannel for QueueChannel {
    async fn receive(&self, timeout: Option<Duration>) -> ChannelResult<Option<Message>> {
        let mut receiver = self.receiver.lock().await;
        match timeout {
            None => receiver.recv().await.map(Some).ok_or_else(|| self.closed()),
            Some(limit) if limit.is_zero() => match receiver.try_recv() {
                Ok(message) => Ok(Some(message)),
                Err(mpsc::error::TryRecvError::Empty) => Ok(None),
                Err(mpsc::error::TryRecvError::Disconnected) => Err(self.closed()),
            },
            Some(limit) => match tokio::time::timeout(limit, receiver.recv()).await {
                Ok(Some(message)) => Ok(Some(message)),
                Ok(None) => Err(self.closed()),
                Err(_elapsed) => Ok(None),
            },
        }
    }
}
