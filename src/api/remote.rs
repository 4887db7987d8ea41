use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{WidgetError, WidgetResult};
use crate::protocol::{CommMessage, CommPayload};
use crate::sink::StateSink;

use super::ChartWidget;
use super::data_controller::coerce_field;
use super::observer::ChangeOrigin;
use super::widget::CommState;

impl<S: StateSink> ChartWidget<S> {
    /// Parses and handles one message from the front-end.
    pub fn handle_comm_json(&mut self, input: &str) -> WidgetResult<()> {
        let message = CommMessage::from_json_str(input)?;
        self.handle_comm_message(message)
    }

    /// Handles one message from the front-end.
    pub fn handle_comm_message(&mut self, message: CommMessage) -> WidgetResult<()> {
        if message.comm_id() != self.comm_id {
            return Err(WidgetError::InvalidMessage(format!(
                "message for comm `{}` delivered to comm `{}`",
                message.comm_id(),
                self.comm_id
            )));
        }

        match message {
            CommMessage::CommMsg { data, .. } => match data {
                CommPayload::Update(patch) => self.apply_remote_state(patch.state),
                CommPayload::RequestState => {
                    let state = self.state();
                    let message = CommMessage::update(self.comm_id.clone(), state);
                    self.send_if_open(&message);
                    Ok(())
                }
                CommPayload::Custom { content } => {
                    for observer in &mut self.observers {
                        observer.on_custom(&content);
                    }
                    Ok(())
                }
                CommPayload::EchoUpdate(patch) => {
                    debug!(
                        comm_id = %self.comm_id,
                        fields = patch.state.len(),
                        "ignoring echo_update from front-end"
                    );
                    Ok(())
                }
            },
            CommMessage::CommClose { .. } => {
                debug!(comm_id = %self.comm_id, "front-end closed comm");
                self.comm = CommState::Closed;
                Ok(())
            }
            CommMessage::CommOpen { .. } => Err(WidgetError::InvalidMessage(
                "comm_open is only sent by the host".to_owned(),
            )),
        }
    }

    /// Writes a remote state patch back into local fields.
    ///
    /// Every key is validated before any field changes, so a rejected patch
    /// leaves the widget untouched. Unknown, read-only and local-only keys are
    /// skipped. Values that validation altered are sent back to the peer.
    pub fn apply_remote_state(&mut self, state: Map<String, Value>) -> WidgetResult<()> {
        let mut accepted = Vec::with_capacity(state.len());
        for (name, raw) in state {
            let Some(spec) = self.registry.get(&name) else {
                warn!(comm_id = %self.comm_id, field = %name, "ignoring remote update for unknown field");
                continue;
            };
            if spec.read_only || !spec.is_synced() {
                warn!(comm_id = %self.comm_id, field = %name, "ignoring remote update for non-writable field");
                continue;
            }
            let value = coerce_field(&name, spec.kind, raw.clone())?;
            accepted.push((name, raw, value));
        }

        let mut corrected = Vec::new();
        for (name, raw, value) in accepted {
            let altered = value.to_json() != raw;
            self.commit(&name, value, ChangeOrigin::Remote);
            if altered {
                corrected.push(name);
            }
        }
        if !corrected.is_empty() {
            debug!(comm_id = %self.comm_id, fields = ?corrected, "echoing normalized remote values");
            self.push_fields(corrected.iter().map(String::as_str));
        }
        Ok(())
    }
}
