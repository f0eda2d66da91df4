//! Scoped subscriptions.
//!
//! A component that is torn down without unsigning leaves a stale handler
//! behind. Guards tie a registration to a value's lifetime instead.

use std::sync::Weak;

use super::bus::EventBus;
use super::envelope::Envelope;
use super::event::Event;
use super::registry::{Registry, SubscriptionId};

/// Unsigns its subscription when dropped.
///
/// Holds only a weak reference to the registry, so a guard never keeps a
/// bus alive.
#[must_use = "dropping the guard unsigns the handler immediately"]
pub struct SubscriptionGuard {
    id: SubscriptionId,
    registry: Weak<Registry>,
}

impl SubscriptionGuard {
    pub(crate) fn new(id: SubscriptionId, registry: Weak<Registry>) -> Self {
        Self { id, registry }
    }

    /// The guarded subscription
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Check if the handler is still registered
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.contains(self.id))
    }

    /// Keep the subscription registered past the guard's lifetime.
    pub fn disarm(mut self) -> SubscriptionId {
        self.registry = Weak::new();
        self.id
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}

impl std::fmt::Debug for SubscriptionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionGuard")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

/// The set of subscriptions owned by one component.
///
/// Event controllers usually sign several handlers when built; collecting
/// them here unsigns all of them when the component is dropped.
#[derive(Debug)]
pub struct Subscriptions {
    bus: EventBus,
    guards: Vec<SubscriptionGuard>,
}

impl Subscriptions {
    /// Create an empty set bound to `bus`
    pub fn new(bus: &EventBus) -> Self {
        Self {
            bus: bus.clone(),
            guards: Vec::new(),
        }
    }

    /// Sign a handler and keep its guard
    pub fn sign<E, F>(&mut self, handler: F) -> &mut Self
    where
        E: Event,
        F: Fn(&Envelope<E>) + Send + Sync + 'static,
    {
        let guard = self.bus.sign_scoped::<E, F>(handler);
        self.guards.push(guard);
        self
    }

    /// Sign a fallible handler and keep its guard
    pub fn try_sign<E, F>(&mut self, handler: F) -> &mut Self
    where
        E: Event,
        F: Fn(&Envelope<E>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let id = self.bus.try_sign::<E, F>(handler);
        self.guards.push(self.bus.guard(id));
        self
    }

    /// Take ownership of an existing guard
    pub fn push(&mut self, guard: SubscriptionGuard) {
        self.guards.push(guard);
    }

    /// Ids of the subscriptions held, in signing order
    pub fn ids(&self) -> Vec<SubscriptionId> {
        self.guards.iter().map(SubscriptionGuard::id).collect()
    }

    /// Number of subscriptions held
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// Check if no subscriptions are held
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Unsign everything now
    pub fn clear(&mut self) {
        self.guards.clear();
    }
}
