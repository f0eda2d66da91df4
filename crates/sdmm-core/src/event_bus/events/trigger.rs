//! Trigger events: requests for another component to act.
//!
//! A trigger may have no listener at all. Callers treat a missing reply as
//! a normal outcome.

/// Requests served by the environment service
pub mod environment {
    use serde::{Deserialize, Serialize};

    use crate::event_bus::events::model::Environment;

    /// Ask for the currently open environment. No reply means none is open.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct FetchOpenedEnvironment;

    crate::trigger!(FetchOpenedEnvironment => Environment);
}

/// Requests served by the tool selection panel
pub mod tool_select {
    use serde::{Deserialize, Serialize};

    /// Select a tool by name. The reply is the name of the tool now active.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ToolSelected {
        /// Requested tool.
        pub tool: String,
    }

    impl ToolSelected {
        /// Request the named tool
        pub fn new(tool: impl Into<String>) -> Self {
            Self { tool: tool.into() }
        }
    }

    crate::trigger!(ToolSelected => String);
}

/// Requests that open panels and dialogs
pub mod ui {
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeSet;

    use crate::event_bus::events::model::{SearchResult, UnknownType};

    /// Open the layers filter panel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct LayersFilterPanelOpen;

    /// Open the search result panel showing a result.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SearchResultPanelOpen(pub SearchResult);

    /// Open the unknown types dialog. Replied to once the dialog closes.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct UnknownTypesDialogOpen(pub BTreeSet<UnknownType>);

    crate::trigger!(
        LayersFilterPanelOpen => (),
        SearchResultPanelOpen => (),
        UnknownTypesDialogOpen => (),
    );
}
