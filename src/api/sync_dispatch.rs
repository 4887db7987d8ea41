use indexmap::IndexSet;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::protocol::{CommMessage, CommPayload, OpenMetadata, StatePatch};
use crate::sink::StateSink;
use crate::version::PROTOCOL_VERSION;

use super::observer::{ChangeOrigin, FieldChange};
use super::value::FieldValue;
use super::widget::CommState;
use super::ChartWidget;

impl<S: StateSink> ChartWidget<S> {
    /// Sends `comm_open` with the full synchronized state.
    ///
    /// No-op unless the widget is still pending.
    pub fn open(&mut self) {
        if self.comm != CommState::Pending {
            trace!(comm_id = %self.comm_id, state = ?self.comm, "open ignored");
            return;
        }
        let message = CommMessage::CommOpen {
            comm_id: self.comm_id.clone(),
            target_name: self.options.target_name.clone(),
            data: StatePatch::new(self.state()),
            metadata: OpenMetadata {
                version: PROTOCOL_VERSION.to_owned(),
            },
        };
        self.comm = CommState::Open;
        self.send(&message);
    }

    /// Sends `comm_close`, detaches every observer and releases the widget,
    /// returning its sink.
    pub fn close(mut self) -> S {
        if self.comm == CommState::Open {
            let message = CommMessage::CommClose {
                comm_id: self.comm_id.clone(),
                data: serde_json::Map::new(),
            };
            self.send(&message);
        }
        self.comm = CommState::Closed;
        self.detach_observers();
        debug!(comm_id = %self.comm_id, "closed chart widget");
        self.sink
    }

    /// Runs `f` with pushes deferred, then sends one update with every
    /// field changed meanwhile. Nested calls flush at the outermost one.
    pub fn hold_sync<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let outermost = self.held.is_none();
        if outermost {
            self.held = Some(IndexSet::new());
        }
        let result = f(self);
        if outermost {
            if let Some(pending) = self.held.take() {
                if !pending.is_empty() {
                    self.push_fields(pending.iter().map(String::as_str));
                }
            }
        }
        result
    }

    /// Sends custom content to the front-end view.
    pub fn send_custom(&mut self, content: Value) {
        let message = CommMessage::CommMsg {
            comm_id: self.comm_id.clone(),
            data: CommPayload::Custom { content },
        };
        self.send_if_open(&message);
    }

    /// Stores a validated value, notifies observers and schedules the push.
    ///
    /// Returns `false` when the value equals the current one.
    pub(super) fn commit(&mut self, name: &str, value: FieldValue, origin: ChangeOrigin) -> bool {
        if self.values.get(name) == Some(&value) {
            trace!(comm_id = %self.comm_id, field = name, ?origin, "assignment left field unchanged");
            return false;
        }
        let old = self.values.insert(name.to_owned(), value);
        debug!(comm_id = %self.comm_id, field = name, ?origin, "field changed");

        if let Some(new) = self.values.get(name) {
            let change = FieldChange {
                name,
                old: old.as_ref(),
                new,
                origin,
            };
            for observer in &mut self.observers {
                observer.on_change(&change);
            }
        }

        let synced = self
            .registry
            .get(name)
            .is_some_and(|spec| spec.is_synced());
        if synced && origin == ChangeOrigin::Local {
            self.schedule_push(name);
        }
        true
    }

    pub(super) fn schedule_push(&mut self, name: &str) {
        match self.held.as_mut() {
            Some(pending) => {
                pending.insert(name.to_owned());
            }
            None => self.push_fields([name]),
        }
    }

    pub(super) fn push_fields<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        let state = self.state_of(names);
        if state.is_empty() {
            return;
        }
        let message = CommMessage::update(self.comm_id.clone(), state);
        self.send_if_open(&message);
    }

    pub(super) fn send_if_open(&mut self, message: &CommMessage) {
        if self.comm != CommState::Open {
            debug!(comm_id = %self.comm_id, state = ?self.comm, "comm not open; message not sent");
            return;
        }
        self.send(message);
    }

    fn send(&mut self, message: &CommMessage) {
        if let Err(err) = self.sink.send(message) {
            warn!(
                comm_id = %self.comm_id,
                error = %err,
                "failed to send widget message"
            );
        }
    }
}
