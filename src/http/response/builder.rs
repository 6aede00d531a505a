use std::io::Write;

use bytes::Bytes;

use super::headers::ResponseHeaders;
use super::types::{HttpStatusCode, ResponseStatusLine};
use crate::http::request::{HttpMethod, HttpRequest, HttpVersion};
use crate::http::writer::{HttpWriter, WriterError};

/// Value sent in the `Server` header when a handler does not set one
pub const SERVER_NAME: &str = concat!("old-page-fixture/", env!("CARGO_PKG_VERSION"));

/// The response object handed to fixture handlers.
///
/// Handlers fill in `headers` (and optionally the status), call
/// [`Response::write_status_headers`], then stream the body through `writer`.
/// Header changes made after the headers were written are not sent.
pub struct Response<'a> {
    pub status_line: ResponseStatusLine,
    pub headers: ResponseHeaders,
    pub writer: HttpWriter<'a>,
}

impl<'a> Response<'a> {
    /// Creates a `HTTP/1.1 200 OK` response writing to `stream`
    pub fn new(stream: &'a mut dyn Write) -> Self {
        Response {
            status_line: ResponseStatusLine::default(),
            headers: ResponseHeaders::new(),
            writer: HttpWriter::new(stream),
        }
    }

    /// Creates a response answering with the request's protocol version
    pub fn with_version(stream: &'a mut dyn Write, version: HttpVersion) -> Self {
        let mut response = Response::new(stream);
        response.status_line.version = version;
        response
    }

    /// Creates a response matched to `request`: same protocol version, and
    /// no body bytes on the wire when answering HEAD
    pub fn for_request(stream: &'a mut dyn Write, request: &HttpRequest) -> Self {
        let mut response = Response::with_version(stream, request.status_line.version);
        if request.status_line.method == HttpMethod::Head {
            response.writer.omit_content();
        }
        response
    }

    pub fn set_status(&mut self, status: HttpStatusCode) {
        self.status_line.status = status;
    }

    /// Emits the status line, the handler's headers in insertion order, the
    /// harness defaults the handler did not set, and the blank line.
    pub fn write_status_headers(&mut self) -> Result<(), WriterError> {
        self.writer.write_status_line(&self.status_line)?;

        for (name, value) in self.headers.iter() {
            self.writer.write_header(name, value)?;
        }
        for (name, value) in default_headers() {
            if !self.headers.contains(&name) {
                self.writer.write_header(&name, &value)?;
            }
        }

        self.writer.finish_headers()
    }
}

/// Headers every response carries unless the handler overrides them
fn default_headers() -> [(Bytes, Bytes); 2] {
    [
        (Bytes::from_static(b"Server"), Bytes::from_static(SERVER_NAME.as_bytes())),
        (Bytes::from_static(b"Connection"), Bytes::from_static(b"close")),
    ]
}
