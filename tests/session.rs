use sdmm::session::{Session, DEFAULT_TOOLS};
use sdmm::{Config, EventBus};
use sdmm_core::event_bus::events::model::{Environment, UnknownType};
use sdmm_core::event_bus::events::reaction::layers_filter::LayersFilterRefreshed;
use sdmm_core::event_bus::events::trigger::environment::FetchOpenedEnvironment;
use sdmm_core::event_bus::events::trigger::tool_select::ToolSelected;
use sdmm_core::event_bus::events::trigger::ui::UnknownTypesDialogOpen;
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::sync::Arc;

fn environment() -> Environment {
    Environment::new("envA", "envA.dme")
        .with_type("/turf/floor")
        .with_type("/obj/item")
        .with_type("/turf/floor/plating")
}

#[test]
fn test_headless_run_report() {
    let bus = EventBus::new();
    let session = Session::new(&bus);

    let report = session.run_headless().expect("Should run");
    assert_eq!(report.environment.as_deref(), Some("station"));
    assert_eq!(report.selected_tool.as_deref(), Some("fill"));
    assert_eq!(report.filtered_items, 2);
    assert_eq!(report.search_matches, 2);
    assert!(report.unknown_types_acknowledged);
    assert_eq!(report.subscriptions, 12);

    // The map switch at the end disposed the search result
    assert!(!session.search_result.is_open());
    assert!(session.layers_filter.is_opened());
}

#[test]
fn test_fetch_before_and_after_open() {
    let bus = EventBus::new();
    let session = Session::new(&bus);

    assert!(bus.post(FetchOpenedEnvironment).expect("Should post").is_none());

    session.environment.open(environment()).expect("Should open");
    let fetched = bus.post(FetchOpenedEnvironment).expect("Should post");
    assert_eq!(fetched.map(|env| env.name).as_deref(), Some("envA"));
    assert_eq!(session.layers_filter.environment_name().as_deref(), Some("envA"));
    assert_eq!(session.unknown_types.environment_name().as_deref(), Some("envA"));

    session.environment.close().expect("Should close");
    assert!(bus.post(FetchOpenedEnvironment).expect("Should post").is_none());
    assert!(session.layers_filter.environment_name().is_none());
}

#[test]
fn test_layers_filter_without_environment_stays_empty() {
    let bus = EventBus::new();
    let session = Session::new(&bus);

    bus.post(LayersFilterRefreshed(BTreeSet::from(["/turf/floor".to_string()])))
        .expect("Should post");
    assert!(session.layers_filter.filtered_type_ids().is_empty());

    session.environment.open(environment()).expect("Should open");
    bus.post(LayersFilterRefreshed(BTreeSet::from(["/turf/floor".to_string()])))
        .expect("Should post");
    assert_eq!(session.layers_filter.filtered_type_ids(), BTreeSet::from([1]));
}

#[test]
fn test_unknown_tool_keeps_selection() {
    let bus = EventBus::new();
    let session = Session::new(&bus);

    let reply = bus.post(ToolSelected::new("teleport")).expect("Should post");
    assert_eq!(reply.as_deref(), Some(DEFAULT_TOOLS[0]));
    assert_eq!(session.tool_select.selected(), DEFAULT_TOOLS[0]);
}

#[test]
fn test_unknown_types_dialog_replies_on_close() {
    let bus = EventBus::new();
    let session = Session::new(&bus);

    let types = BTreeSet::from([UnknownType {
        type_path: "/obj/gone".to_string(),
        occurrences: 1,
    }]);
    let mut reply = bus
        .request(UnknownTypesDialogOpen(types.clone()))
        .expect("Should post");

    assert!(session.unknown_types.is_open());
    assert_eq!(session.unknown_types.unknown_types(), types);
    assert!(reply.try_take().is_none());

    assert!(session.unknown_types.close());
    assert_eq!(reply.try_take(), Some(()));
    assert!(!session.unknown_types.is_open());

    // Closing again has no one to answer
    assert!(!session.unknown_types.close());
}

#[test]
fn test_dropping_session_unsigns_everything() {
    let bus = EventBus::new();
    let session = Session::new(&bus);
    assert!(bus.subscriber_count() > 0);

    drop(session);
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn test_config_file_drives_bus() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[bus]\nmax_dispatch_depth = 2\n").expect("write");

    let config = Config::load_from_file(&path).expect("Should load");
    let bus = EventBus::with_config(config.bus);
    assert_eq!(bus.config().max_dispatch_depth, 2);
}

#[test]
fn test_continuation_can_ask_the_same_component_again() {
    let bus = EventBus::new();
    let session = Session::new(&bus);
    session.environment.open(environment()).expect("Should open");

    let again = Arc::new(Mutex::new(None));
    let (inner, slot) = (bus.clone(), again.clone());
    bus.post_with(FetchOpenedEnvironment, move |first| {
        let second = inner.post(FetchOpenedEnvironment).expect("Should post");
        *slot.lock() = Some((first.name, second.map(|env| env.name)));
    })
    .expect("Should post");
    assert_eq!(
        *again.lock(),
        Some(("envA".to_string(), Some("envA".to_string())))
    );

    let tools = Arc::new(Mutex::new(None));
    let (inner, slot) = (bus.clone(), tools.clone());
    bus.post_with(ToolSelected::new("fill"), move |first| {
        let second = inner.post(ToolSelected::new("pick")).expect("Should post");
        *slot.lock() = Some((first, second));
    })
    .expect("Should post");
    assert_eq!(
        *tools.lock(),
        Some(("fill".to_string(), Some("pick".to_string())))
    );
    assert_eq!(session.tool_select.selected(), "pick");
}
