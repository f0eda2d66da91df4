//! Headless editor session.
//!
//! Wires a handful of editor components to one bus. They only ever talk
//! through events; the session itself just builds them and drives a short
//! scripted run.

mod environment;
mod layers_filter;
mod search_result;
mod tool_select;
mod unknown_types;

pub use environment::EnvironmentService;
pub use layers_filter::LayersFilterPanel;
pub use search_result::SearchResultPanel;
pub use tool_select::{ToolSelectPanel, DEFAULT_TOOLS};
pub use unknown_types::UnknownTypesDialog;

use anyhow::Context;
use sdmm_core::event_bus::events::model::{Environment, MapPosition, SearchResult, UnknownType};
use sdmm_core::event_bus::events::reaction::layers_filter::LayersFilterRefreshed;
use sdmm_core::event_bus::events::reaction::map_holder::SelectedMapChanged;
use sdmm_core::event_bus::events::trigger::environment::FetchOpenedEnvironment;
use sdmm_core::event_bus::events::trigger::tool_select::ToolSelected;
use sdmm_core::event_bus::events::trigger::ui::{
    LayersFilterPanelOpen, SearchResultPanelOpen, UnknownTypesDialogOpen,
};
use sdmm_core::EventBus;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The components of one editor session
pub struct Session {
    bus: EventBus,
    pub environment: EnvironmentService,
    pub layers_filter: LayersFilterPanel,
    pub search_result: SearchResultPanel,
    pub tool_select: ToolSelectPanel,
    pub unknown_types: UnknownTypesDialog,
}

/// What a scripted run observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub environment: Option<String>,
    pub selected_tool: Option<String>,
    pub filtered_items: usize,
    pub search_matches: usize,
    pub unknown_types_acknowledged: bool,
    pub subscriptions: usize,
}

impl Session {
    /// Build every component against `bus`
    pub fn new(bus: &EventBus) -> Self {
        Self {
            bus: bus.clone(),
            environment: EnvironmentService::new(bus),
            layers_filter: LayersFilterPanel::new(bus),
            search_result: SearchResultPanel::new(bus),
            tool_select: ToolSelectPanel::new(bus),
            unknown_types: UnknownTypesDialog::new(bus),
        }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Drive a short session: open an environment, filter layers, search,
    /// switch tools and acknowledge unknown types.
    pub fn run_headless(&self) -> anyhow::Result<SessionReport> {
        let bus = &self.bus;

        if bus.post(FetchOpenedEnvironment)?.is_none() {
            tracing::info!("No environment open yet");
        }

        self.environment
            .open(sample_environment())
            .context("opening the sample environment")?;

        bus.post(LayersFilterPanelOpen)?;
        bus.post(LayersFilterRefreshed(BTreeSet::from([
            "/turf/floor".to_string(),
            "/obj/structure/table".to_string(),
        ])))?;

        bus.post(SearchResultPanelOpen(SearchResult {
            query: "/obj/structure/table".to_string(),
            positions: vec![
                MapPosition { x: 4, y: 7, z: 1 },
                MapPosition { x: 5, y: 7, z: 1 },
            ],
        }))?;
        let search_matches = self.search_result.match_count();

        let selected_tool = bus.post(ToolSelected::new("fill"))?;
        tracing::info!("Active tool: {}", selected_tool.as_deref().unwrap_or("<none>"));

        let acknowledged = Arc::new(AtomicBool::new(false));
        let flag = acknowledged.clone();
        bus.post_with(
            UnknownTypesDialogOpen(BTreeSet::from([UnknownType {
                type_path: "/obj/legacy_machine".to_string(),
                occurrences: 2,
            }])),
            move |()| flag.store(true, Ordering::SeqCst),
        )?;
        self.unknown_types.close();

        // Switching maps drops the stale search result
        bus.post(SelectedMapChanged {
            map_path: "maps/second.dmm".into(),
        })?;

        Ok(SessionReport {
            environment: self.environment.current_name(),
            selected_tool,
            filtered_items: self.layers_filter.filtered_type_ids().len(),
            search_matches,
            unknown_types_acknowledged: acknowledged.load(Ordering::SeqCst),
            subscriptions: bus.subscriber_count(),
        })
    }
}

fn sample_environment() -> Environment {
    Environment::new("station", "station.dme")
        .with_type("/area/station")
        .with_type("/turf/floor")
        .with_type("/turf/wall")
        .with_type("/obj/structure/table")
        .with_type("/mob/living/carbon")
}
