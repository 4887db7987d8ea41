mod null_sink;
mod recording_sink;
mod writer_sink;

pub use null_sink::NullSink;
pub use recording_sink::RecordingSink;
pub use writer_sink::WriterSink;

use crate::error::WidgetResult;
use crate::protocol::CommMessage;

/// Transport carrying widget messages to the front-end.
///
/// Sends are fire-and-forget from the widget's point of view: a failed send is
/// logged and local state is kept.
pub trait StateSink {
    fn send(&mut self, message: &CommMessage) -> WidgetResult<()>;
}

impl<S: StateSink + ?Sized> StateSink for &mut S {
    fn send(&mut self, message: &CommMessage) -> WidgetResult<()> {
        (**self).send(message)
    }
}

impl<S: StateSink + ?Sized> StateSink for Box<S> {
    fn send(&mut self, message: &CommMessage) -> WidgetResult<()> {
        (**self).send(message)
    }
}
