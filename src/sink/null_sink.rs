use crate::error::WidgetResult;
use crate::protocol::CommMessage;

use super::StateSink;

/// Sink for widgets with no attached front-end.
///
/// It only counts what it drops.
#[derive(Debug, Default)]
pub struct NullSink {
    pub dropped: usize,
}

impl StateSink for NullSink {
    fn send(&mut self, _message: &CommMessage) -> WidgetResult<()> {
        self.dropped += 1;
        Ok(())
    }
}
