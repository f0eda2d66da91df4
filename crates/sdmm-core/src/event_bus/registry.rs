//! Subscription registry.
//!
//! Maps each event type to the handlers listening for it, in subscription
//! order. One mutex guards both the per-type lists and the id index; it is
//! only held while copying a snapshot, never while a handler runs.

use parking_lot::Mutex;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::envelope::Envelope;
use super::event::Event;

/// Subscription handle for unsigning a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new unique subscription ID
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Type-erased handler for event type `E`
pub(crate) type Handler<E> = Box<dyn Fn(&Envelope<E>) -> anyhow::Result<()> + Send + Sync>;

struct Entry {
    id: SubscriptionId,
    /// Always an `Arc<Handler<E>>` for the `E` this entry is filed under.
    handler: Arc<dyn Any + Send + Sync>,
}

#[derive(Default)]
struct RegistryState {
    by_type: HashMap<TypeId, Vec<Entry>>,
    owners: HashMap<SubscriptionId, (TypeId, &'static str)>,
}

#[derive(Default)]
pub(crate) struct Registry {
    state: Mutex<RegistryState>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a handler for `E`. Returns its id and the number of handlers
    /// now registered for `E`.
    pub(crate) fn insert<E: Event>(&self, handler: Handler<E>) -> (SubscriptionId, usize) {
        let id = SubscriptionId::new();
        let mut state = self.state.lock();
        state.owners.insert(id, (TypeId::of::<E>(), E::name()));

        let entries = state.by_type.entry(TypeId::of::<E>()).or_default();
        entries.push(Entry {
            id,
            handler: Arc::new(handler),
        });
        let count = entries.len();

        tracing::debug!("Subscription {} added for {}", id, E::name());
        (id, count)
    }

    /// Remove exactly one registration. Returns false if it was already gone.
    pub(crate) fn remove(&self, id: SubscriptionId) -> bool {
        let mut state = self.state.lock();
        let Some((type_id, name)) = state.owners.remove(&id) else {
            return false;
        };

        if let Some(entries) = state.by_type.get_mut(&type_id) {
            entries.retain(|entry| entry.id != id);
            if entries.is_empty() {
                state.by_type.remove(&type_id);
            }
        }

        tracing::debug!("Subscription {} removed from {}", id, name);
        true
    }

    /// Copy of the handlers for `E`, in subscription order.
    pub(crate) fn snapshot<E: Event>(&self) -> Vec<Arc<Handler<E>>> {
        let state = self.state.lock();
        let Some(entries) = state.by_type.get(&TypeId::of::<E>()) else {
            return Vec::new();
        };

        entries
            .iter()
            .filter_map(|entry| Arc::clone(&entry.handler).downcast::<Handler<E>>().ok())
            .collect()
    }

    pub(crate) fn contains(&self, id: SubscriptionId) -> bool {
        self.state.lock().owners.contains_key(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.state.lock().owners.len()
    }

    pub(crate) fn len_for<E: Event>(&self) -> usize {
        self.state
            .lock()
            .by_type
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }
}
