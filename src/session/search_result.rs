//! Search result panel controller.
//!
//! Holds the last search result until the environment or selected map
//! changes underneath it.

use sdmm_core::event_bus::events::model::SearchResult;
use sdmm_core::event_bus::events::reaction::environment::EnvironmentReset;
use sdmm_core::event_bus::events::reaction::map_holder::{SelectedMapChanged, SelectedMapClosed};
use sdmm_core::event_bus::events::trigger::ui::SearchResultPanelOpen;
use sdmm_core::{thread_safe, EventBus, Subscriptions, ThreadSafe};

#[derive(Debug, Default)]
struct State {
    is_open: bool,
    search_result: Option<SearchResult>,
}

impl State {
    fn dispose(&mut self) {
        self.is_open = false;
        self.search_result = None;
    }
}

/// Event side of the search result panel
pub struct SearchResultPanel {
    state: ThreadSafe<State>,
    _subscriptions: Subscriptions,
}

impl SearchResultPanel {
    pub fn new(bus: &EventBus) -> Self {
        let state = thread_safe(State::default());
        let mut subscriptions = Subscriptions::new(bus);

        let s = state.clone();
        subscriptions.sign::<EnvironmentReset, _>(move |_| s.lock().dispose());
        let s = state.clone();
        subscriptions.sign::<SelectedMapChanged, _>(move |_| s.lock().dispose());
        let s = state.clone();
        subscriptions.sign::<SelectedMapClosed, _>(move |_| s.lock().dispose());

        let s = state.clone();
        subscriptions.sign::<SearchResultPanelOpen, _>(move |event| {
            let mut state = s.lock();
            state.is_open = true;
            state.search_result = Some(event.0.clone());
        });

        Self {
            state,
            _subscriptions: subscriptions,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().is_open
    }

    /// Number of matches shown
    pub fn match_count(&self) -> usize {
        self.state
            .lock()
            .search_result
            .as_ref()
            .map_or(0, |result| result.positions.len())
    }
}
