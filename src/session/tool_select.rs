//! Tool select panel controller.

use sdmm_core::event_bus::events::trigger::tool_select::ToolSelected;
use sdmm_core::{thread_safe_rw, EventBus, Subscriptions, ThreadSafeRw};

/// Tools offered when nothing else is configured
pub const DEFAULT_TOOLS: [&str; 3] = ["add", "fill", "pick"];

#[derive(Debug)]
struct State {
    tools: Vec<String>,
    selected: String,
}

/// Event side of the tool select panel.
///
/// Replies to [`ToolSelected`] with the tool that is active afterwards. An
/// unknown tool leaves the selection unchanged.
pub struct ToolSelectPanel {
    state: ThreadSafeRw<State>,
    _subscriptions: Subscriptions,
}

impl ToolSelectPanel {
    pub fn new(bus: &EventBus) -> Self {
        let tools: Vec<String> = DEFAULT_TOOLS.iter().map(|tool| tool.to_string()).collect();
        let state = thread_safe_rw(State {
            selected: tools[0].clone(),
            tools,
        });
        let mut subscriptions = Subscriptions::new(bus);

        let s = state.clone();
        subscriptions.sign::<ToolSelected, _>(move |event| {
            let selected = {
                let mut state = s.write();
                if state.tools.contains(&event.tool) {
                    state.selected = event.tool.clone();
                } else {
                    tracing::warn!("Unknown tool requested: {}", event.tool);
                }
                state.selected.clone()
            };
            event.reply(selected);
        });

        Self {
            state,
            _subscriptions: subscriptions,
        }
    }

    /// Tool currently active
    pub fn selected(&self) -> String {
        self.state.read().selected.clone()
    }
}
