//! Event envelope and the write-once reply slot.
//!
//! Handlers receive an [`Envelope`] wrapping the posted event. Trigger
//! envelopes expose the reply slot: the first reply written wins, later
//! attempts are refused and logged.

use parking_lot::Mutex;
use std::ops::Deref;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use super::event::{Event, EventKind, Trigger};

type Continuation<R> = Box<dyn FnOnce(R) + Send>;

/// Where an accepted reply goes
enum Sink<R> {
    /// Held in the slot until the poster collects it after dispatch.
    Collect,
    /// Poster returned without a continuation; late replies are dropped.
    Closed,
    /// Handed to a callback as soon as it is written.
    Continuation(Continuation<R>),
    /// Sent over a oneshot channel to a [`PendingReply`].
    Channel(oneshot::Sender<R>),
}

struct SlotState<R> {
    written: bool,
    value: Option<R>,
    sink: Sink<R>,
}

/// Write-once reply cell shared between an envelope and its responders
pub(crate) struct ReplySlot<R> {
    event: &'static str,
    state: Arc<Mutex<SlotState<R>>>,
}

impl<R> Clone for ReplySlot<R> {
    fn clone(&self) -> Self {
        Self {
            event: self.event,
            state: Arc::clone(&self.state),
        }
    }
}

impl<R: Send + 'static> ReplySlot<R> {
    fn with_sink(event: &'static str, sink: Sink<R>) -> Self {
        Self {
            event,
            state: Arc::new(Mutex::new(SlotState {
                written: false,
                value: None,
                sink,
            })),
        }
    }

    /// Slot whose reply is collected by the poster with [`ReplySlot::take`].
    pub(crate) fn collecting(event: &'static str) -> Self {
        Self::with_sink(event, Sink::Collect)
    }

    /// Slot that hands its reply to `continuation` as soon as it arrives.
    pub(crate) fn with_continuation<F>(event: &'static str, continuation: F) -> Self
    where
        F: FnOnce(R) + Send + 'static,
    {
        Self::with_sink(event, Sink::Continuation(Box::new(continuation)))
    }

    /// Slot paired with an awaitable [`PendingReply`].
    pub(crate) fn pending(event: &'static str) -> (Self, PendingReply<R>) {
        let (tx, rx) = oneshot::channel();
        (
            Self::with_sink(event, Sink::Channel(tx)),
            PendingReply { rx },
        )
    }

    /// Write the reply. Returns false if a reply was already written or
    /// nobody is left to receive it.
    pub(crate) fn write(&self, value: R) -> bool {
        let mut state = self.state.lock();
        if state.written {
            warn!(event = self.event, "Reply already set, ignoring additional reply");
            return false;
        }
        state.written = true;

        match std::mem::replace(&mut state.sink, Sink::Closed) {
            Sink::Collect => {
                state.value = Some(value);
                state.sink = Sink::Collect;
                true
            }
            Sink::Closed => {
                warn!(
                    event = self.event,
                    "Reply arrived after the poster returned, dropping it"
                );
                false
            }
            Sink::Continuation(continuation) => {
                // The continuation may post again; never run it under the lock
                drop(state);
                continuation(value);
                true
            }
            Sink::Channel(tx) => {
                if tx.send(value).is_err() {
                    debug!(event = self.event, "Pending reply was dropped before the reply arrived");
                }
                true
            }
        }
    }

    /// Collect the reply and close the slot to further deliveries.
    pub(crate) fn take(&self) -> Option<R> {
        let mut state = self.state.lock();
        if matches!(state.sink, Sink::Collect) {
            state.sink = Sink::Closed;
        }
        state.value.take()
    }

    pub(crate) fn is_written(&self) -> bool {
        self.state.lock().written
    }

    fn peek(&self) -> Option<R>
    where
        R: Clone,
    {
        self.state.lock().value.clone()
    }
}

/// A posted event as seen by its handlers.
///
/// Dereferences to the event itself, so payload fields read directly:
/// `envelope.environment.name`.
pub struct Envelope<E: Event> {
    body: E,
    reply: ReplySlot<E::Reply>,
}

impl<E: Event> Envelope<E> {
    pub(crate) fn new(body: E, reply: ReplySlot<E::Reply>) -> Self {
        Self { body, reply }
    }

    /// The posted event
    pub fn body(&self) -> &E {
        &self.body
    }

    /// Convention of the posted event
    pub fn kind(&self) -> EventKind {
        E::kind()
    }

    /// Check if any handler has already replied during this dispatch
    pub fn is_replied(&self) -> bool {
        self.reply.is_written()
    }
}

impl<E: Trigger> Envelope<E> {
    /// Reply to the poster.
    ///
    /// Only the first reply per dispatch is accepted. Returns false, and
    /// logs a warning, when a reply was already written.
    pub fn reply(&self, value: E::Reply) -> bool {
        self.reply.write(value)
    }

    /// The reply written so far, if it is still held by the envelope.
    ///
    /// Replies posted with a continuation or as a request are handed off
    /// immediately; use [`Envelope::is_replied`] to check for those.
    pub fn reply_so_far(&self) -> Option<E::Reply>
    where
        E::Reply: Clone,
    {
        self.reply.peek()
    }

    /// Detach a handle that can reply after the handler has returned.
    ///
    /// Used by components that answer later, such as a dialog that replies
    /// once the user closes it.
    pub fn responder(&self) -> Responder<E::Reply> {
        Responder {
            slot: self.reply.clone(),
        }
    }
}

impl<E: Event> Deref for Envelope<E> {
    type Target = E;

    fn deref(&self) -> &E {
        &self.body
    }
}

impl<E: Event + std::fmt::Debug> std::fmt::Debug for Envelope<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("event", &self.body)
            .field("replied", &self.is_replied())
            .finish()
    }
}

/// Deferred reply handle for a trigger event.
///
/// Shares the envelope's reply slot, so first-writer-wins still holds
/// across handlers and responders.
pub struct Responder<R> {
    slot: ReplySlot<R>,
}

impl<R: Send + 'static> Responder<R> {
    /// Deliver the reply. Returns false if it was refused.
    pub fn reply(self, value: R) -> bool {
        self.slot.write(value)
    }

    /// Check if the event has been replied to, by anyone
    pub fn is_replied(&self) -> bool {
        self.slot.is_written()
    }

    /// Name of the event this responder answers
    pub fn event_name(&self) -> &'static str {
        self.slot.event
    }
}

impl<R> std::fmt::Debug for Responder<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Responder")
            .field("event", &self.slot.event)
            .finish()
    }
}

/// Reply of a trigger posted with [`EventBus::request`](super::EventBus::request).
///
/// Resolves when a handler or responder replies; resolves to `None` once
/// every envelope and responder for the event is gone without replying.
#[derive(Debug)]
pub struct PendingReply<R> {
    rx: oneshot::Receiver<R>,
}

impl<R> PendingReply<R> {
    /// Take the reply if it has arrived, without blocking.
    ///
    /// Meant for polling once per frame from a UI loop.
    pub fn try_take(&mut self) -> Option<R> {
        self.rx.try_recv().ok()
    }

    /// Wait for the reply
    pub async fn wait(self) -> Option<R> {
        self.rx.await.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_first_write_wins() {
        let slot = ReplySlot::collecting("Test");
        assert!(!slot.is_written());
        assert!(slot.write("ok".to_string()));
        assert!(!slot.write("other".to_string()));
        assert!(slot.is_written());
        assert_eq!(slot.take().as_deref(), Some("ok"));
    }

    #[test]
    fn test_write_after_take_is_dropped() {
        let slot: ReplySlot<u32> = ReplySlot::collecting("Test");
        assert_eq!(slot.take(), None);
        assert!(!slot.write(7));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_continuation_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let slot = ReplySlot::with_continuation("Test", move |value: usize| {
            seen.fetch_add(value, Ordering::SeqCst);
        });

        assert!(slot.write(5));
        assert!(!slot.write(9));
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_pending_reply_try_take() {
        let (slot, mut pending) = ReplySlot::pending("Test");
        assert_eq!(pending.try_take(), None);
        assert!(slot.write(3u8));
        assert_eq!(pending.try_take(), Some(3));
    }
}
