use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::WidgetResult;

/// MIME type of the saved widget-state document.
pub const WIDGET_STATE_MIME: &str = "application/vnd.jupyter.widget-state+json";
/// MIME type of the display reference to a widget model.
pub const WIDGET_VIEW_MIME: &str = "application/vnd.jupyter.widget-view+json";

const SCHEMA_VERSION_MAJOR: u32 = 2;
const SCHEMA_VERSION_MINOR: u32 = 0;

/// State of one widget model inside a saved notebook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedWidgetState {
    pub model_name: String,
    pub model_module: String,
    pub model_module_version: String,
    pub state: Map<String, Value>,
}

/// Widget-state document keyed by model id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedManifest {
    pub version_major: u32,
    pub version_minor: u32,
    pub state: IndexMap<String, EmbeddedWidgetState>,
}

impl Default for EmbedManifest {
    fn default() -> Self {
        Self {
            version_major: SCHEMA_VERSION_MAJOR,
            version_minor: SCHEMA_VERSION_MINOR,
            state: IndexMap::new(),
        }
    }
}

impl EmbedManifest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a model. Returns the replaced entry.
    pub fn insert(
        &mut self,
        model_id: impl Into<String>,
        state: EmbeddedWidgetState,
    ) -> Option<EmbeddedWidgetState> {
        self.state.insert(model_id.into(), state)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn to_json_pretty(&self) -> WidgetResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Display reference placed in a cell output next to `text/plain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetView {
    pub version_major: u32,
    pub version_minor: u32,
    pub model_id: String,
}

impl WidgetView {
    #[must_use]
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            version_major: SCHEMA_VERSION_MAJOR,
            version_minor: SCHEMA_VERSION_MINOR,
            model_id: model_id.into(),
        }
    }
}
