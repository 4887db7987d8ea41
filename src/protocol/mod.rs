//! Jupyter widget message protocol as seen from the host side.
//!
//! Messages are plain serde types; transports live behind `sink::StateSink`.

pub mod embed;
pub mod messages;

pub use embed::{
    EmbedManifest, EmbeddedWidgetState, WIDGET_STATE_MIME, WIDGET_VIEW_MIME, WidgetView,
};
pub use messages::{CommMessage, CommPayload, OpenMetadata, StatePatch};
