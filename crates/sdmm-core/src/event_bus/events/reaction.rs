//! Reaction events: notifications that something already happened.
//!
//! Posting a reaction never yields a reply.

/// Environment service notifications
pub mod environment {
    use serde::{Deserialize, Serialize};

    use crate::event_bus::events::model::Environment;

    /// A new environment finished loading and is now current.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct EnvironmentChanged(pub Environment);

    /// The current environment was closed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct EnvironmentReset;

    crate::reaction!(EnvironmentChanged, EnvironmentReset);
}

/// Open-map holder notifications
pub mod map_holder {
    use serde::{Deserialize, Serialize};
    use std::path::PathBuf;

    /// Another open map became the selected one.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SelectedMapChanged {
        /// Path of the newly selected map.
        pub map_path: PathBuf,
    }

    /// The selected map was closed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct SelectedMapClosed;

    crate::reaction!(SelectedMapChanged, SelectedMapClosed);
}

/// Layers filter notifications
pub mod layers_filter {
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeSet;

    /// The set of filtered type paths changed.
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct LayersFilterRefreshed(pub BTreeSet<String>);

    crate::reaction!(LayersFilterRefreshed);
}

#[cfg(test)]
mod tests {
    use super::environment::{EnvironmentChanged, EnvironmentReset};
    use super::map_holder::SelectedMapChanged;
    use crate::event_bus::events::model::Environment;
    use crate::event_bus::{Event, EventKind};

    #[test]
    fn test_reactions_are_reactions() {
        assert_eq!(EnvironmentChanged::kind(), EventKind::Reaction);
        assert_eq!(EnvironmentReset::kind(), EventKind::Reaction);
        assert_eq!(SelectedMapChanged::kind(), EventKind::Reaction);
        assert_eq!(EnvironmentChanged::name(), "EnvironmentChanged");
    }

    #[test]
    fn test_event_serialization() {
        let event = EnvironmentChanged(Environment::new("station", "station.dme").with_type("/area"));
        let json = serde_json::to_string(&event).expect("Should serialize");
        let parsed: EnvironmentChanged = serde_json::from_str(&json).expect("Should deserialize");
        assert_eq!(parsed, event);
    }
}
