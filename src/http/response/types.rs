#![allow(dead_code)]
use std::fmt;

use crate::http::request::HttpVersion;

/// HTTP response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpStatusCode {
    Ok = 200,
    NoContent = 204,
    BadRequest = 400,
    NotFound = 404,
    MethodNotAllowed = 405,
    RequestHeaderFieldsTooLarge = 431,
}

impl HttpStatusCode {
    pub fn code(self) -> u16 {
        self as u16
    }
}

/// Formats HttpStatus for display
impl fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpStatusCode::Ok => write!(f, "200 OK"),
            HttpStatusCode::NoContent => write!(f, "204 No Content"),
            HttpStatusCode::BadRequest => write!(f, "400 Bad Request"),
            HttpStatusCode::NotFound => write!(f, "404 Not Found"),
            HttpStatusCode::MethodNotAllowed => write!(f, "405 Method Not Allowed"),
            HttpStatusCode::RequestHeaderFieldsTooLarge => {
                write!(f, "431 Request Header Fields Too Large")
            }
        }
    }
}

/// Status line of an HTTP response
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseStatusLine {
    pub version: HttpVersion,
    pub status: HttpStatusCode,
}

impl Default for ResponseStatusLine {
    fn default() -> Self {
        ResponseStatusLine {
            version: HttpVersion::Http1_1,
            status: HttpStatusCode::Ok,
        }
    }
}

impl fmt::Display for ResponseStatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.version, self.status)
    }
}
