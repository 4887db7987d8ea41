use serde::{Deserialize, Serialize};

use crate::error::WidgetResult;
use crate::version::package_version;

/// Default front-end module resolving `ChartModel` / `ChartView`.
pub const DEFAULT_FRONTEND_MODULE: &str = "@visa/charts-python";
pub const DEFAULT_MODEL_NAME: &str = "ChartModel";
pub const DEFAULT_VIEW_NAME: &str = "ChartView";
/// Comm target the notebook frontend registers for widget models.
pub const WIDGET_COMM_TARGET: &str = "jupyter.widget";

/// Identifiers the front-end uses to resolve the model and view classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendModule {
    pub module: String,
    pub module_version: String,
    pub model_name: String,
    pub view_name: String,
}

impl Default for FrontendModule {
    fn default() -> Self {
        Self {
            module: DEFAULT_FRONTEND_MODULE.to_owned(),
            module_version: package_version(),
            model_name: DEFAULT_MODEL_NAME.to_owned(),
            view_name: DEFAULT_VIEW_NAME.to_owned(),
        }
    }
}

impl FrontendModule {
    #[must_use]
    pub fn with_module(mut self, module: impl Into<String>, version: impl Into<String>) -> Self {
        self.module = module.into();
        self.module_version = version.into();
        self
    }

    #[must_use]
    pub fn with_names(mut self, model_name: impl Into<String>, view_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self.view_name = view_name.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetOptions {
    /// Comm id to use; a random one is generated when absent.
    pub comm_id: Option<String>,
    pub target_name: String,
    pub frontend: FrontendModule,
    /// Send `comm_open` as soon as the widget is constructed.
    pub auto_open: bool,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            comm_id: None,
            target_name: WIDGET_COMM_TARGET.to_owned(),
            frontend: FrontendModule::default(),
            auto_open: true,
        }
    }
}

impl WidgetOptions {
    #[must_use]
    pub fn with_comm_id(mut self, comm_id: impl Into<String>) -> Self {
        self.comm_id = Some(comm_id.into());
        self
    }

    #[must_use]
    pub fn with_target_name(mut self, target_name: impl Into<String>) -> Self {
        self.target_name = target_name.into();
        self
    }

    #[must_use]
    pub fn with_frontend(mut self, frontend: FrontendModule) -> Self {
        self.frontend = frontend;
        self
    }

    #[must_use]
    pub fn with_auto_open(mut self, auto_open: bool) -> Self {
        self.auto_open = auto_open;
        self
    }

    /// Reads options from JSON; missing keys keep their defaults.
    pub fn from_json_str(input: &str) -> WidgetResult<Self> {
        Ok(serde_json::from_str(input)?)
    }
}
