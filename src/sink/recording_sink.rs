use serde_json::{Map, Value};

use crate::error::WidgetResult;
use crate::protocol::{CommMessage, CommPayload};

use super::StateSink;

/// Keeps every message in send order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    messages: Vec<CommMessage>,
}

impl RecordingSink {
    #[must_use]
    pub fn messages(&self) -> &[CommMessage] {
        &self.messages
    }

    #[must_use]
    pub fn last(&self) -> Option<&CommMessage> {
        self.messages.last()
    }

    /// States of the `update` messages sent so far, in order.
    pub fn updates(&self) -> impl Iterator<Item = &Map<String, Value>> {
        self.messages.iter().filter_map(|message| match message {
            CommMessage::CommMsg {
                data: CommPayload::Update(patch),
                ..
            } => Some(&patch.state),
            _ => None,
        })
    }

    pub fn drain(&mut self) -> Vec<CommMessage> {
        std::mem::take(&mut self.messages)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl StateSink for RecordingSink {
    fn send(&mut self, message: &CommMessage) -> WidgetResult<()> {
        self.messages.push(message.clone());
        Ok(())
    }
}
