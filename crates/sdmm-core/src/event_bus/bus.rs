//! Event Bus implementation.
//!
//! Provides the core EventBus struct and global instance for
//! application-wide event distribution.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace, warn};

use super::config::EventBusConfig;
use super::envelope::{Envelope, PendingReply, ReplySlot};
use super::event::{Event, Trigger};
use super::registry::{Handler, Registry, SubscriptionId};
use super::subscription::SubscriptionGuard;
use crate::error::{DispatchError, Error, Result};

thread_local! {
    /// Posts currently on this thread's stack, per registry
    static DISPATCH_DEPTH: RefCell<HashMap<usize, usize>> = RefCell::new(HashMap::new());
}

/// Counts one level of nested dispatch on one registry for as long as it lives
struct DepthGuard {
    registry: usize,
}

impl DepthGuard {
    fn enter(registry: usize, limit: usize) -> Option<Self> {
        DISPATCH_DEPTH.with_borrow_mut(|depths| {
            let depth = depths.get(&registry).copied().unwrap_or(0);
            if depth >= limit {
                return None;
            }
            depths.insert(registry, depth + 1);
            Some(DepthGuard { registry })
        })
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DISPATCH_DEPTH.with_borrow_mut(|depths| {
            if let Some(depth) = depths.get_mut(&self.registry) {
                *depth -= 1;
                if *depth == 0 {
                    depths.remove(&self.registry);
                }
            }
        });
    }
}

/// Central event bus for application-wide event distribution.
///
/// Cloning is cheap and every clone shares one registry, so a bus can be
/// handed to each component at construction. Dispatch is synchronous: all
/// handlers have run by the time a post call returns.
#[derive(Clone)]
pub struct EventBus {
    /// Registered handlers, keyed by event type
    registry: Arc<Registry>,
    /// Configuration
    config: Arc<EventBusConfig>,
}

impl EventBus {
    /// Create a new event bus with default configuration
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    /// Create a new event bus with custom configuration
    pub fn with_config(config: EventBusConfig) -> Self {
        Self {
            registry: Arc::new(Registry::new()),
            config: Arc::new(config),
        }
    }

    /// Subscribe a handler to events of type `E`.
    ///
    /// Handlers run in the order they were signed. Signing the same
    /// handler twice registers it twice.
    pub fn sign<E, F>(&self, handler: F) -> SubscriptionId
    where
        E: Event,
        F: Fn(&Envelope<E>) + Send + Sync + 'static,
    {
        self.try_sign::<E, _>(move |envelope: &Envelope<E>| {
            handler(envelope);
            Ok(())
        })
    }

    /// Subscribe a handler that can fail.
    ///
    /// An error aborts the rest of the dispatch and is returned to the
    /// poster.
    pub fn try_sign<E, F>(&self, handler: F) -> SubscriptionId
    where
        E: Event,
        F: Fn(&Envelope<E>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let handler: Handler<E> = Box::new(handler);
        let (id, count) = self.registry.insert(handler);

        if count > self.config.subscriber_warn_threshold {
            warn!(
                event = E::name(),
                subscribers = count,
                "Event has an unusually high number of subscribers, check for missing unsign calls"
            );
        }

        id
    }

    /// Subscribe a handler for as long as the returned guard lives
    pub fn sign_scoped<E, F>(&self, handler: F) -> SubscriptionGuard
    where
        E: Event,
        F: Fn(&Envelope<E>) + Send + Sync + 'static,
    {
        let id = self.sign::<E, F>(handler);
        self.guard(id)
    }

    /// Wrap an existing subscription in a guard that unsigns it on drop
    pub fn guard(&self, id: SubscriptionId) -> SubscriptionGuard {
        SubscriptionGuard::new(id, Arc::downgrade(&self.registry))
    }

    /// Unsubscribe a handler
    ///
    /// Returns true if the subscription was found and removed. Unsigning an
    /// already removed subscription does nothing.
    pub fn unsign(&self, id: SubscriptionId) -> bool {
        self.registry.remove(id)
    }

    /// Post an event to every handler signed for its type.
    ///
    /// Returns the first reply written by a handler, or `None` when nobody
    /// replied, including when nobody is subscribed at all.
    pub fn post<E: Event>(&self, event: E) -> std::result::Result<Option<E::Reply>, DispatchError> {
        let slot = ReplySlot::collecting(E::name());
        let outcome = self.dispatch(Envelope::new(event, slot.clone()));
        let reply = slot.take();
        outcome.map(|()| reply)
    }

    /// Post a trigger and hand its reply to `continuation`.
    ///
    /// The continuation runs at most once: during dispatch if a handler
    /// replies there, or later if a handler kept a
    /// [`Responder`](super::Responder) and replies after this call returns.
    ///
    /// The reply goes straight to the continuation, so later handlers in
    /// the same dispatch see [`Envelope::is_replied`] turn true while
    /// [`Envelope::reply_so_far`] stays `None`.
    pub fn post_with<E, F>(&self, event: E, continuation: F) -> std::result::Result<(), DispatchError>
    where
        E: Trigger,
        F: FnOnce(E::Reply) + Send + 'static,
    {
        let slot = ReplySlot::with_continuation(E::name(), continuation);
        self.dispatch(Envelope::new(event, slot))
    }

    /// Post a trigger and get an awaitable handle on its reply
    ///
    /// As with [`EventBus::post_with`], handlers can only see that a reply
    /// was written through [`Envelope::is_replied`].
    pub fn request<E: Trigger>(
        &self,
        event: E,
    ) -> std::result::Result<PendingReply<E::Reply>, DispatchError> {
        let (slot, pending) = ReplySlot::pending(E::name());
        self.dispatch(Envelope::new(event, slot))?;
        Ok(pending)
    }

    fn dispatch<E: Event>(&self, envelope: Envelope<E>) -> std::result::Result<(), DispatchError> {
        let limit = self.config.max_dispatch_depth;
        let registry = Arc::as_ptr(&self.registry) as usize;
        let _depth = DepthGuard::enter(registry, limit).ok_or(DispatchError::DepthExceeded {
            event: E::name(),
            limit,
        })?;

        // Handlers may sign or unsign while we iterate, so work on a copy
        let handlers = self.registry.snapshot::<E>();
        if handlers.is_empty() {
            trace!(event = E::name(), kind = %E::kind(), "No subscribers for event");
            return Ok(());
        }

        if self.config.trace_dispatch {
            debug!(event = E::name(), kind = %E::kind(), handlers = handlers.len(), "Dispatching event");
        } else {
            trace!(event = E::name(), kind = %E::kind(), handlers = handlers.len(), "Dispatching event");
        }

        for (index, handler) in handlers.iter().enumerate() {
            if let Err(err) = handler(&envelope) {
                debug!(
                    event = E::name(),
                    handler = index,
                    error = %err,
                    "Handler failed, skipping remaining handlers"
                );
                return Err(DispatchError::Handler(err));
            }
        }

        Ok(())
    }

    /// Get the number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.registry.len()
    }

    /// Get the number of handlers signed for `E`
    pub fn subscriber_count_for<E: Event>(&self) -> usize {
        self.registry.len_for::<E>()
    }

    /// Check if anything listens for `E`
    pub fn has_subscribers<E: Event>(&self) -> bool {
        self.subscriber_count_for::<E>() > 0
    }

    /// Check if a subscription is still registered
    pub fn is_signed(&self, id: SubscriptionId) -> bool {
        self.registry.contains(id)
    }

    /// Get the current configuration
    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("config", &self.config)
            .finish()
    }
}

/// Global event bus instance
static EVENT_BUS: OnceLock<EventBus> = OnceLock::new();

/// Get or initialize the global event bus
///
/// Convenient for call sites far from any component that could carry a
/// bus; tests should build their own [`EventBus`] instead.
pub fn event_bus() -> &'static EventBus {
    EVENT_BUS.get_or_init(EventBus::new)
}

/// Initialize the global event bus with custom configuration
///
/// Must be called before any calls to `event_bus()`.
pub fn init_event_bus(config: EventBusConfig) -> Result<&'static EventBus> {
    config.validate()?;

    let mut created = false;
    let bus = EVENT_BUS.get_or_init(|| {
        created = true;
        EventBus::with_config(config)
    });

    if created {
        Ok(bus)
    } else {
        Err(Error::AlreadyInitialized)
    }
}

/// Post an event on the global event bus
#[macro_export]
macro_rules! post {
    ($event:expr) => {
        $crate::event_bus::event_bus().post($event)
    };
}

/// Sign a handler on the global event bus
#[macro_export]
macro_rules! sign {
    ($event:ty, $handler:expr) => {
        $crate::event_bus::event_bus().sign::<$event, _>($handler)
    };
}
