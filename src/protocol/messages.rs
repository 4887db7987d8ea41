use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{WidgetError, WidgetResult};

/// Partial or full widget state, as carried by `update` and `comm_open`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatePatch {
    pub state: Map<String, Value>,
    #[serde(default)]
    pub buffer_paths: Vec<Vec<Value>>,
}

impl StatePatch {
    #[must_use]
    pub fn new(state: Map<String, Value>) -> Self {
        Self {
            state,
            buffer_paths: Vec::new(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.state.keys().map(String::as_str)
    }
}

/// Body of a `comm_msg`, discriminated by `method`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum CommPayload {
    Update(StatePatch),
    EchoUpdate(StatePatch),
    RequestState,
    Custom { content: Value },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenMetadata {
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "msg_type", rename_all = "snake_case")]
pub enum CommMessage {
    CommOpen {
        comm_id: String,
        target_name: String,
        data: StatePatch,
        metadata: OpenMetadata,
    },
    CommMsg {
        comm_id: String,
        data: CommPayload,
    },
    CommClose {
        comm_id: String,
        #[serde(default)]
        data: Map<String, Value>,
    },
}

impl CommMessage {
    #[must_use]
    pub fn comm_id(&self) -> &str {
        match self {
            Self::CommOpen { comm_id, .. }
            | Self::CommMsg { comm_id, .. }
            | Self::CommClose { comm_id, .. } => comm_id,
        }
    }

    #[must_use]
    pub fn update(comm_id: impl Into<String>, state: Map<String, Value>) -> Self {
        Self::CommMsg {
            comm_id: comm_id.into(),
            data: CommPayload::Update(StatePatch::new(state)),
        }
    }

    /// State carried by `comm_open` or an `update`, if any.
    #[must_use]
    pub fn state(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::CommOpen { data, .. } => Some(&data.state),
            Self::CommMsg {
                data: CommPayload::Update(patch) | CommPayload::EchoUpdate(patch),
                ..
            } => Some(&patch.state),
            _ => None,
        }
    }

    pub fn to_json_string(&self) -> WidgetResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json_str(input: &str) -> WidgetResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| WidgetError::InvalidMessage(format!("failed to parse comm message: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_message_uses_protocol_field_names() {
        let mut state = Map::new();
        state.insert("mainTitle".to_owned(), json!("Revenue"));
        let message = CommMessage::update("abc", state);

        let value = serde_json::to_value(&message).expect("serialize");
        assert_eq!(
            value,
            json!({
                "msg_type": "comm_msg",
                "comm_id": "abc",
                "data": {
                    "method": "update",
                    "state": {"mainTitle": "Revenue"},
                    "buffer_paths": []
                }
            })
        );
    }

    #[test]
    fn request_state_parses_without_state() {
        let message = CommMessage::from_json_str(
            r#"{"msg_type":"comm_msg","comm_id":"abc","data":{"method":"request_state"}}"#,
        )
        .expect("parse");
        assert!(matches!(
            message,
            CommMessage::CommMsg {
                data: CommPayload::RequestState,
                ..
            }
        ));
        assert!(message.state().is_none());
    }

    #[test]
    fn unknown_method_is_an_invalid_message() {
        let err = CommMessage::from_json_str(
            r#"{"msg_type":"comm_msg","comm_id":"abc","data":{"method":"explode"}}"#,
        )
        .expect_err("unknown method");
        assert!(matches!(err, WidgetError::InvalidMessage(_)));
    }
}
