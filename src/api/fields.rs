//! Synchronized field names shared with the front-end model.

pub const MODEL_NAME: &str = "_model_name";
pub const MODEL_MODULE: &str = "_model_module";
pub const MODEL_MODULE_VERSION: &str = "_model_module_version";
pub const VIEW_NAME: &str = "_view_name";
pub const VIEW_MODULE: &str = "_view_module";
pub const VIEW_MODULE_VERSION: &str = "_view_module_version";

pub const CHART_TYPE: &str = "chartType";

pub const DATA: &str = "data";
pub const LINK_DATA: &str = "linkData";
pub const NODE_DATA: &str = "nodeData";

pub const MAIN_TITLE: &str = "mainTitle";
pub const SUB_TITLE: &str = "subTitle";
pub const ACCESSIBILITY: &str = "accessibility";
pub const CONFIG: &str = "config";

/// Fields every widget declares besides its data fields and accessors.
pub const RESERVED: [&str; 11] = [
    MODEL_NAME,
    MODEL_MODULE,
    MODEL_MODULE_VERSION,
    VIEW_NAME,
    VIEW_MODULE,
    VIEW_MODULE_VERSION,
    CHART_TYPE,
    MAIN_TITLE,
    SUB_TITLE,
    ACCESSIBILITY,
    CONFIG,
];
