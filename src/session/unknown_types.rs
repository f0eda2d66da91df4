//! Unknown types dialog controller.
//!
//! Opened when a map references types the environment does not declare.
//! The poster is answered only once the dialog is closed, so the handler
//! keeps a responder instead of replying during dispatch.

use sdmm_core::event_bus::events::model::{Environment, UnknownType};
use sdmm_core::event_bus::events::reaction::environment::EnvironmentChanged;
use sdmm_core::event_bus::events::trigger::ui::UnknownTypesDialogOpen;
use sdmm_core::{thread_safe, EventBus, Responder, Subscriptions, ThreadSafe};
use std::collections::BTreeSet;

#[derive(Default)]
struct State {
    unknown_types: BTreeSet<UnknownType>,
    event_to_reply: Option<Responder<()>>,
    current_environment: Option<Environment>,
}

/// Event side of the unknown types dialog
pub struct UnknownTypesDialog {
    state: ThreadSafe<State>,
    _subscriptions: Subscriptions,
}

impl UnknownTypesDialog {
    pub fn new(bus: &EventBus) -> Self {
        let state = thread_safe(State::default());
        let mut subscriptions = Subscriptions::new(bus);

        let s = state.clone();
        subscriptions.sign::<UnknownTypesDialogOpen, _>(move |event| {
            let mut state = s.lock();
            if state.event_to_reply.is_some() {
                tracing::warn!("Unknown types dialog is already open, replacing its contents");
            }
            state.unknown_types = event.0.clone();
            state.event_to_reply = Some(event.responder());
        });

        let s = state.clone();
        subscriptions.sign::<EnvironmentChanged, _>(move |event| {
            s.lock().current_environment = Some(event.0.clone());
        });

        Self {
            state,
            _subscriptions: subscriptions,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().event_to_reply.is_some()
    }

    /// Types listed in the dialog
    pub fn unknown_types(&self) -> BTreeSet<UnknownType> {
        self.state.lock().unknown_types.clone()
    }

    /// Close the dialog and answer whoever opened it
    pub fn close(&self) -> bool {
        let responder = {
            let mut state = self.state.lock();
            state.unknown_types.clear();
            state.event_to_reply.take()
        };

        // Reply outside the lock; the opener's continuation may post again
        responder.is_some_and(|responder| responder.reply(()))
    }

    /// Name of the environment the dialog was opened against
    pub fn environment_name(&self) -> Option<String> {
        self.state
            .lock()
            .current_environment
            .as_ref()
            .map(|env| env.name.clone())
    }
}
