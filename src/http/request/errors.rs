use thiserror::Error;

use super::types::HttpVersion;
use crate::http::response::HttpStatusCode;

/// Represents an error that occurred while parsing an HTTP request
#[derive(Debug, Clone, PartialEq, Error)]
#[error("ParseError: {status} ({reason})")]
pub struct ParseError {
    pub status: HttpStatusCode,
    pub version: HttpVersion,
    pub reason: &'static str,
}

impl ParseError {
    pub fn new(status: HttpStatusCode, version: HttpVersion, reason: &'static str) -> Self {
        ParseError {
            status,
            version,
            reason,
        }
    }
}
