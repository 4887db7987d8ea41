use std::io::Write;

use crate::error::WidgetResult;
use crate::protocol::CommMessage;

use super::StateSink;

/// Writes each message as one line of JSON.
///
/// Suited to a kernel bridge reading newline-delimited messages from a pipe.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> StateSink for WriterSink<W> {
    fn send(&mut self, message: &CommMessage) -> WidgetResult<()> {
        serde_json::to_writer(&mut self.writer, message)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
