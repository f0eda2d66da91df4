//! Layers filter panel controller.
//!
//! Tracks which environment items are hidden by the layers filter. When the
//! filter changes it asks the environment service for the open environment
//! and maps the filtered type paths to item ids.

use sdmm_core::event_bus::events::model::Environment;
use sdmm_core::event_bus::events::reaction::environment::{EnvironmentChanged, EnvironmentReset};
use sdmm_core::event_bus::events::reaction::layers_filter::LayersFilterRefreshed;
use sdmm_core::event_bus::events::trigger::environment::FetchOpenedEnvironment;
use sdmm_core::event_bus::events::trigger::ui::LayersFilterPanelOpen;
use sdmm_core::{thread_safe, EventBus, Subscriptions, ThreadSafe};
use std::collections::BTreeSet;

#[derive(Debug, Default)]
struct State {
    is_opened: bool,
    current_environment: Option<Environment>,
    filtered_type_ids: BTreeSet<u64>,
}

/// Event side of the layers filter panel
pub struct LayersFilterPanel {
    state: ThreadSafe<State>,
    _subscriptions: Subscriptions,
}

impl LayersFilterPanel {
    pub fn new(bus: &EventBus) -> Self {
        let state = thread_safe(State::default());
        let mut subscriptions = Subscriptions::new(bus);

        let s = state.clone();
        subscriptions.sign::<LayersFilterPanelOpen, _>(move |_| {
            s.lock().is_opened = true;
        });

        let s = state.clone();
        subscriptions.sign::<EnvironmentReset, _>(move |_| {
            let mut state = s.lock();
            state.current_environment = None;
            state.filtered_type_ids.clear();
        });

        let s = state.clone();
        subscriptions.sign::<EnvironmentChanged, _>(move |event| {
            s.lock().current_environment = Some(event.0.clone());
        });

        let s = state.clone();
        let fetcher = bus.clone();
        subscriptions.try_sign::<LayersFilterRefreshed, _>(move |event| {
            let filtered_types = event.0.clone();
            let s = s.clone();
            fetcher.post_with(FetchOpenedEnvironment, move |environment| {
                let ids = environment.ids_of_types(&filtered_types);
                tracing::debug!("Layers filter hides {} items", ids.len());
                s.lock().filtered_type_ids = ids;
            })?;
            Ok(())
        });

        Self {
            state,
            _subscriptions: subscriptions,
        }
    }

    pub fn is_opened(&self) -> bool {
        self.state.lock().is_opened
    }

    /// Name of the environment the panel last heard about
    pub fn environment_name(&self) -> Option<String> {
        self.state
            .lock()
            .current_environment
            .as_ref()
            .map(|env| env.name.clone())
    }

    /// Ids of the items currently hidden
    pub fn filtered_type_ids(&self) -> BTreeSet<u64> {
        self.state.lock().filtered_type_ids.clone()
    }
}
