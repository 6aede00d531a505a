use bytes::Bytes;

use crate::http::request::HttpRequest;
use crate::http::response::Response;
use crate::http::writer::WriterError;

pub const AGE: &[u8] = b"90000";
pub const LAST_MODIFIED: &[u8] = b"Wed, 21 Oct 2015 07:28:00 GMT";
pub const BODY: &[u8] = b"Body";

/// Serves a page that looks to HTTP caches like it was cached long ago.
///
/// The request is ignored; every call produces the same response.
pub fn old_page(_request: &HttpRequest, response: &mut Response<'_>) -> Result<(), WriterError> {
    response
        .headers
        .set(Bytes::from_static(b"Age"), Bytes::from_static(AGE));
    response.headers.set(
        Bytes::from_static(b"Last-Modified"),
        Bytes::from_static(LAST_MODIFIED),
    );
    response.write_status_headers()?;
    response.writer.write_content(BODY)
}
