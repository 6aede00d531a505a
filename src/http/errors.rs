use crate::http::response::{HttpStatusCode, Response};
use crate::http::writer::WriterError;

/// Writes a plain-text error response carrying `message` as its body
pub fn send_error(
    response: &mut Response<'_>,
    status: HttpStatusCode,
    message: &str,
) -> Result<(), WriterError> {
    response.set_status(status);
    response.headers.set("Content-Type", "text/plain");
    response
        .headers
        .set("Content-Length", message.len().to_string());
    response.write_status_headers()?;
    response.writer.write_content(message.as_bytes())
}
