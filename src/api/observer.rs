use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{WidgetError, WidgetResult};
use crate::sink::StateSink;

use super::ChartWidget;
use super::value::FieldValue;

/// Side that produced a field change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOrigin {
    Local,
    Remote,
}

/// Applied change passed to observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldChange<'a> {
    pub name: &'a str,
    pub old: Option<&'a FieldValue>,
    pub new: &'a FieldValue,
    pub origin: ChangeOrigin,
}

/// Hook notified after every applied field change.
///
/// Observers see the committed value; they cannot veto or rewrite it.
pub trait FieldObserver {
    fn id(&self) -> &str;
    fn on_change(&mut self, change: &FieldChange<'_>);

    /// Custom (non-state) content sent by the front-end.
    fn on_custom(&mut self, _content: &Value) {}

    /// Called once when the observer leaves the widget, either through
    /// `unregister_observer` or because the widget was closed.
    fn on_detach(&mut self) {}
}

impl<S: StateSink> ChartWidget<S> {
    /// Attaches an observer. Observers are notified in attach order.
    ///
    /// Ids must be non-empty and unique per widget.
    pub fn register_observer(&mut self, observer: Box<dyn FieldObserver>) -> WidgetResult<()> {
        match observer.id() {
            "" => {
                return Err(WidgetError::InvalidObserver(
                    "observer id must not be empty".to_owned(),
                ));
            }
            id if self.has_observer(id) => {
                return Err(WidgetError::InvalidObserver(format!(
                    "comm `{}` already has an observer `{id}`",
                    self.comm_id
                )));
            }
            id => debug!(comm_id = %self.comm_id, observer = id, "observer attached"),
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Detaches the observer with `id` and hands it back to the caller.
    pub fn unregister_observer(&mut self, id: &str) -> Option<Box<dyn FieldObserver>> {
        let index = self.observers.iter().position(|observer| observer.id() == id)?;
        let mut observer = self.observers.remove(index);
        observer.on_detach();
        debug!(comm_id = %self.comm_id, observer = id, "observer detached");
        Some(observer)
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, id: &str) -> bool {
        self.observers.iter().any(|observer| observer.id() == id)
    }

    /// Observer ids in notification order.
    pub fn observer_ids(&self) -> impl Iterator<Item = &str> {
        self.observers.iter().map(|observer| observer.id())
    }

    pub(super) fn detach_observers(&mut self) {
        for mut observer in self.observers.drain(..) {
            observer.on_detach();
        }
    }
}
