use std::io::Write;

use super::types::{WriterError, WriterState};
use crate::http::response::headers::{is_valid_name, is_valid_value};
use crate::http::response::ResponseStatusLine;

/// Streams an HTTP response to the underlying sink.
///
/// Every call writes through immediately, so the sink sees the status line,
/// then each header, then the blank line, then body bytes in that order.
pub struct HttpWriter<'a> {
    stream: &'a mut dyn Write,
    state: WriterState,
    content_written: usize,
    omit_content: bool,
}

impl<'a> HttpWriter<'a> {
    /// Creates a new HttpWriter
    pub fn new(stream: &'a mut dyn Write) -> Self {
        HttpWriter {
            stream,
            state: WriterState::Initial,
            content_written: 0,
            omit_content: false,
        }
    }

    /// Drops body bytes instead of sending them, as a HEAD response requires
    pub fn omit_content(&mut self) {
        self.omit_content = true;
    }

    pub fn state(&self) -> WriterState {
        self.state
    }

    /// Number of body bytes written so far
    pub fn content_written(&self) -> usize {
        self.content_written
    }

    /// Writes the status line to the HTTP response
    pub fn write_status_line(&mut self, status_line: &ResponseStatusLine) -> Result<(), WriterError> {
        if self.state != WriterState::Initial {
            return Err(self.fail("Can only write Status Line in Initial state"));
        }

        self.guard(|stream| write!(stream, "{}\r\n", status_line))?;
        self.state = WriterState::StatusWritten;

        Ok(())
    }

    /// Writes a header to the HTTP response
    pub fn write_header(&mut self, name: &[u8], value: &[u8]) -> Result<(), WriterError> {
        if self.state != WriterState::StatusWritten && self.state != WriterState::HeadersOpen {
            return Err(self.fail("Can only write headers in StatusWritten or HeadersOpen state"));
        }

        if !is_valid_name(name) {
            self.state = WriterState::Failed;
            return Err(WriterError::InvalidHeader(format!(
                "invalid header name {:?}",
                String::from_utf8_lossy(name)
            )));
        }
        if !is_valid_value(value) {
            self.state = WriterState::Failed;
            return Err(WriterError::InvalidHeader(format!(
                "invalid value for header {:?}",
                String::from_utf8_lossy(name)
            )));
        }

        self.guard(|stream| {
            stream.write_all(name)?;
            stream.write_all(b": ")?;
            stream.write_all(value)?;
            stream.write_all(b"\r\n")
        })?;
        self.state = WriterState::HeadersOpen;

        Ok(())
    }

    /// Finishes the headers section of the HTTP response, acts as a barrier to writing body
    pub fn finish_headers(&mut self) -> Result<(), WriterError> {
        if self.state != WriterState::HeadersOpen && self.state != WriterState::StatusWritten {
            return Err(self.fail("Can only finish headers in HeadersOpen or StatusWritten state"));
        }

        self.guard(|stream| stream.write_all(b"\r\n"))?;
        self.state = WriterState::HeadersClosed;

        Ok(())
    }

    /// Writes raw body bytes; may be called any number of times once headers are finished
    pub fn write_content(&mut self, content: &[u8]) -> Result<(), WriterError> {
        if self.state != WriterState::HeadersClosed && self.state != WriterState::BodyWritten {
            return Err(self.fail("Can only write content after headers are finished"));
        }

        if !self.omit_content {
            self.guard(|stream| stream.write_all(content))?;
            self.content_written += content.len();
        }
        self.state = WriterState::BodyWritten;

        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), WriterError> {
        if self.state == WriterState::Failed {
            return Err(WriterError::InvalidState("Cannot flush a failed writer"));
        }

        self.guard(|stream| stream.flush())
    }

    fn fail(&mut self, msg: &'static str) -> WriterError {
        self.state = WriterState::Failed;
        WriterError::InvalidState(msg)
    }

    /// Runs an I/O operation against the sink, failing the writer on error
    fn guard<F>(&mut self, op: F) -> Result<(), WriterError>
    where
        F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
    {
        op(&mut *self.stream).map_err(|e| {
            self.state = WriterState::Failed;
            WriterError::Io(e)
        })
    }

    /// Logs WriterError with specific context for each error variant
    pub fn log_writer_error(error: &WriterError, context: &str) {
        match error {
            WriterError::InvalidState(msg) => {
                tracing::error!(context = %context, "state machine violation: {}", msg);
            }
            WriterError::InvalidHeader(msg) => {
                tracing::error!(context = %context, "invalid header format: {}", msg);
            }
            WriterError::Io(io_err) => {
                tracing::warn!(
                    context = %context,
                    "network/io error: {} - connection may be broken",
                    io_err
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::HttpStatusCode;

    #[test]
    fn writes_parts_in_order() {
        let mut sink: Vec<u8> = Vec::new();
        let mut writer = HttpWriter::new(&mut sink);

        writer.write_status_line(&ResponseStatusLine::default()).unwrap();
        writer.write_header(b"Age", b"90000").unwrap();
        writer.finish_headers().unwrap();
        writer.write_content(b"Bo").unwrap();
        writer.write_content(b"dy").unwrap();
        writer.flush().unwrap();
        assert_eq!(writer.content_written(), 4);

        assert_eq!(sink, b"HTTP/1.1 200 OK\r\nAge: 90000\r\n\r\nBody".to_vec());
    }

    #[test]
    fn content_before_headers_fails() {
        let mut sink: Vec<u8> = Vec::new();
        let mut writer = HttpWriter::new(&mut sink);

        writer.write_status_line(&ResponseStatusLine::default()).unwrap();
        let err = writer.write_content(b"Body").unwrap_err();
        assert!(matches!(err, WriterError::InvalidState(_)));
        assert_eq!(writer.state(), WriterState::Failed);

        // once failed, nothing else is accepted
        assert!(writer.finish_headers().is_err());
        assert!(writer.flush().is_err());
    }

    #[test]
    fn header_after_body_fails() {
        let mut sink: Vec<u8> = Vec::new();
        let mut writer = HttpWriter::new(&mut sink);

        writer
            .write_status_line(&ResponseStatusLine {
                status: HttpStatusCode::NotFound,
                ..ResponseStatusLine::default()
            })
            .unwrap();
        writer.finish_headers().unwrap();
        writer.write_content(b"x").unwrap();
        assert!(writer.write_header(b"Age", b"1").is_err());
    }

    #[test]
    fn status_line_only_once() {
        let mut sink: Vec<u8> = Vec::new();
        let mut writer = HttpWriter::new(&mut sink);

        writer.write_status_line(&ResponseStatusLine::default()).unwrap();
        assert!(writer.write_status_line(&ResponseStatusLine::default()).is_err());
    }

    #[test]
    fn rejects_header_injection() {
        let mut sink: Vec<u8> = Vec::new();
        let mut writer = HttpWriter::new(&mut sink);

        writer.write_status_line(&ResponseStatusLine::default()).unwrap();
        let err = writer.write_header(b"Age", b"1\r\nX-Evil: 1").unwrap_err();
        assert!(matches!(err, WriterError::InvalidHeader(_)));

        let mut sink: Vec<u8> = Vec::new();
        let mut writer = HttpWriter::new(&mut sink);
        writer.write_status_line(&ResponseStatusLine::default()).unwrap();
        assert!(writer.write_header(b"", b"1").is_err());
    }

    #[test]
    fn omitted_content_is_not_sent() {
        let mut sink: Vec<u8> = Vec::new();
        let mut writer = HttpWriter::new(&mut sink);
        writer.omit_content();

        writer.write_status_line(&ResponseStatusLine::default()).unwrap();
        writer.write_header(b"Age", b"90000").unwrap();
        writer.finish_headers().unwrap();
        writer.write_content(b"Body").unwrap();
        assert_eq!(writer.content_written(), 0);
        assert_eq!(writer.state(), WriterState::BodyWritten);

        assert_eq!(sink, b"HTTP/1.1 200 OK\r\nAge: 90000\r\n\r\n".to_vec());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn io_errors_propagate() {
        let mut sink = BrokenPipe;
        let mut writer = HttpWriter::new(&mut sink);

        let err = writer
            .write_status_line(&ResponseStatusLine::default())
            .unwrap_err();
        assert!(matches!(err, WriterError::Io(ref e) if e.kind() == std::io::ErrorKind::BrokenPipe));
        assert_eq!(writer.state(), WriterState::Failed);
    }
}
