use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::http::errors::send_error;
use crate::http::request::HttpRequest;
use crate::http::response::{HttpStatusCode, Response};
use crate::http::routes::Router;
use crate::http::writer::HttpWriter;

/// Upper bound on request head lines read from one client
const MAX_HEAD_LINES: usize = 100;

/// Upper bound on the bytes of a single request head line, terminator included
const MAX_LINE_BYTES: usize = 8 * 1024;

/// Why a request head could not be read
#[derive(Debug, Error)]
pub enum HeadError {
    #[error("request head too large")]
    TooLarge,
    #[error("error reading request head: {0}")]
    Io(#[from] io::Error),
}

/// Accepts connections forever, handling each on its own thread
pub fn serve(listener: TcpListener, router: Arc<Router>, read_timeout: Duration) {
    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                let router = Arc::clone(&router);
                thread::spawn(move || handle_client(stream, &router, read_timeout));
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to accept connection");
            }
        }
    }
}

/// Handles one client connection: reads the request head, dispatches, closes
pub fn handle_client(mut stream: TcpStream, router: &Router, read_timeout: Duration) {
    let peer = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    tracing::debug!(%peer, "accepted connection");

    if let Err(e) = stream.set_read_timeout(Some(read_timeout)) {
        tracing::error!(%peer, error = %e, "failed to set read timeout");
        return;
    }

    let head = match stream.try_clone() {
        Ok(read_half) => read_request_head(read_half),
        Err(e) => {
            tracing::error!(%peer, error = %e, "failed to clone stream");
            return;
        }
    };

    match head {
        Ok(request_lines) => respond(&request_lines, &mut stream, router, &peer),
        Err(HeadError::TooLarge) => {
            tracing::warn!(%peer, "request head too large");
            let mut response = Response::new(&mut stream);
            let result = send_error(
                &mut response,
                HttpStatusCode::RequestHeaderFieldsTooLarge,
                "Request header fields too large",
            )
            .and_then(|_| response.writer.flush());
            if let Err(e) = result {
                HttpWriter::log_writer_error(&e, "handle_client - head too large");
            }
        }
        Err(HeadError::Io(e)) => {
            tracing::warn!(%peer, error = %e, "error reading request head");
        }
    }

    tracing::debug!(%peer, "connection closed");
}

/// Reads lines up to the blank line that ends the request head.
///
/// Fails with [`HeadError::TooLarge`] instead of truncating an oversized head.
pub fn read_request_head<R: Read>(stream: R) -> Result<Vec<String>, HeadError> {
    let mut request_lines: Vec<String> = Vec::new();
    let mut reader = BufReader::new(stream);

    loop {
        let mut buf = Vec::new();
        let read = (&mut reader)
            .take(MAX_LINE_BYTES as u64)
            .read_until(b'\n', &mut buf)?;
        if read == 0 {
            break;
        }
        if !buf.ends_with(b"\n") && read == MAX_LINE_BYTES {
            return Err(HeadError::TooLarge);
        }

        while buf.last().is_some_and(|&b| b == b'\n' || b == b'\r') {
            buf.pop();
        }
        if buf.is_empty() {
            break;
        }
        if request_lines.len() >= MAX_HEAD_LINES {
            return Err(HeadError::TooLarge);
        }
        request_lines.push(String::from_utf8_lossy(&buf).into_owned());
    }

    Ok(request_lines)
}

/// Parses `request_lines` and writes the routed response to `sink`
pub fn respond(request_lines: &[String], sink: &mut dyn Write, router: &Router, peer: &str) {
    match HttpRequest::parse(request_lines) {
        Ok(request) => {
            let mut response = Response::for_request(sink, &request);
            let result = router
                .route(&request, &mut response)
                .and_then(|_| response.writer.flush());
            tracing::info!(
                %peer,
                method = %request.status_line.method,
                path = %request.status_line.path,
                status = response.status_line.status.code(),
                "request served"
            );
            if let Err(e) = result {
                HttpWriter::log_writer_error(&e, "respond - routed request");
            }
        }
        Err(err) => {
            tracing::warn!(%peer, error = %err, "error parsing request");

            let mut response = Response::with_version(sink, err.version);
            if err.status == HttpStatusCode::MethodNotAllowed {
                response.headers.set("Allow", "GET, HEAD");
            }
            let result = send_error(&mut response, err.status, err.reason)
                .and_then(|_| response.writer.flush());
            if let Err(e) = result {
                HttpWriter::log_writer_error(&e, "respond - parse error");
            }
        }
    }
}
