//! In-memory trigger bus for dev and tests.
//!
//! HTTP handlers and fired in-process timers publish lifecycle triggers here;
//! the trigger worker holds the one long-lived subscription and feeds each
//! trigger to the lifecycle router.

use std::sync::{Mutex, mpsc};

use crate::bus::{EventBus, Subscription};

#[derive(Debug, thiserror::Error)]
pub enum InMemoryBusError {
    /// A publisher panicked while holding the subscriber list.
    #[error("trigger bus subscriber list poisoned")]
    Poisoned,
}

/// Broadcasts every published trigger to all current subscribers.
///
/// Publishing never blocks, so a timer task can publish from inside the
/// runtime. A trigger published while nobody is subscribed is lost; a
/// stopped worker is forgotten on the next publish.
#[derive(Debug)]
pub struct InMemoryEventBus<M> {
    subscribers: Mutex<Vec<mpsc::Sender<M>>>,
}

impl<M> InMemoryEventBus<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribers still attached as of the last publish (usually one worker).
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|senders| senders.len()).unwrap_or(0)
    }
}

impl<M> Default for InMemoryEventBus<M> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

impl<M> EventBus<M> for InMemoryEventBus<M>
where
    M: Clone + Send + 'static,
{
    type Error = InMemoryBusError;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        let mut senders = self.subscribers.lock().map_err(|_| InMemoryBusError::Poisoned)?;

        // A failed send means the worker's receiver is gone.
        senders.retain(|tx| tx.send(message.clone()).is_ok());
        tracing::trace!(subscribers = senders.len(), "trigger published");

        Ok(())
    }

    fn subscribe(&self) -> Subscription<M> {
        let (sender, receiver) = mpsc::channel();

        // Poisoned: the subscription is valid but stays silent.
        if let Ok(mut senders) = self.subscribers.lock() {
            senders.push(sender);
        }

        Subscription::new(receiver)
    }
}
