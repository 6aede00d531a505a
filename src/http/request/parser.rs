use std::collections::HashMap;

use super::errors::ParseError;
use super::types::{HttpMethod, HttpVersion, RequestStatusLine};
use crate::http::response::HttpStatusCode;

/// A parsed request head. The body, if any, is never read.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub status_line: RequestStatusLine,
    pub headers: HashMap<String, String>,
}

impl HttpRequest {
    /// Parses the request line and headers, stopping at the first empty line
    pub fn parse(request: &[String]) -> Result<Self, ParseError> {
        let default_version = HttpVersion::default();
        let first = request.first().ok_or_else(|| {
            ParseError::new(
                HttpStatusCode::BadRequest,
                default_version,
                "empty request",
            )
        })?;

        let request_line: Vec<&str> = first.split_whitespace().collect();
        if request_line.len() != 3 {
            return Err(ParseError::new(
                HttpStatusCode::BadRequest,
                default_version,
                "malformed request line",
            ));
        }

        let version = HttpVersion::from_token(request_line[2]).ok_or_else(|| {
            ParseError::new(
                HttpStatusCode::BadRequest,
                default_version,
                "unsupported HTTP version",
            )
        })?;

        let method = HttpMethod::from_token(request_line[0]).ok_or_else(|| {
            ParseError::new(
                HttpStatusCode::MethodNotAllowed,
                version,
                "unsupported method",
            )
        })?;

        let path = request_line[1].to_string();
        if !path.starts_with('/') {
            return Err(ParseError::new(
                HttpStatusCode::BadRequest,
                version,
                "request target must be an absolute path",
            ));
        }

        let mut headers: HashMap<String, String> = HashMap::new();
        for line in &request[1..] {
            if line.is_empty() {
                break;
            }

            match line.split_once(':') {
                Some((key, value)) if !key.trim().is_empty() => {
                    headers.insert(key.trim().to_string(), value.trim().to_string());
                }
                _ => {
                    return Err(ParseError::new(
                        HttpStatusCode::BadRequest,
                        version,
                        "malformed header line",
                    ))
                }
            }
        }

        Ok(HttpRequest {
            status_line: RequestStatusLine {
                method,
                path,
                version,
            },
            headers,
        })
    }

    /// Looks up a header value case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn parses_get_with_headers() {
        let request = HttpRequest::parse(&lines(&[
            "GET /old_page.py HTTP/1.1",
            "Host: localhost:8000",
            "user-agent: wpt",
        ]))
        .unwrap();

        assert_eq!(request.status_line.method, HttpMethod::Get);
        assert_eq!(request.status_line.path, "/old_page.py");
        assert_eq!(request.status_line.version, HttpVersion::Http1_1);
        assert_eq!(request.header("User-Agent"), Some("wpt"));
        assert_eq!(request.header("host"), Some("localhost:8000"));
    }

    #[test]
    fn stops_at_blank_line() {
        let request = HttpRequest::parse(&lines(&[
            "GET / HTTP/1.0",
            "Accept: */*",
            "",
            "not a header",
        ]))
        .unwrap();

        assert_eq!(request.status_line.version, HttpVersion::Http1_0);
        assert_eq!(request.headers.len(), 1);
    }

    #[test]
    fn unknown_method_is_405() {
        let err = HttpRequest::parse(&lines(&["BREW /pot HTTP/1.1"])).unwrap_err();
        assert_eq!(err.status, HttpStatusCode::MethodNotAllowed);
    }

    #[test]
    fn malformed_request_line_is_400() {
        let err = HttpRequest::parse(&lines(&["GET /old_page.py"])).unwrap_err();
        assert_eq!(err.status, HttpStatusCode::BadRequest);

        let err = HttpRequest::parse(&lines(&["GET /old_page.py HTTP/2"])).unwrap_err();
        assert_eq!(err.status, HttpStatusCode::BadRequest);

        let err = HttpRequest::parse(&[]).unwrap_err();
        assert_eq!(err.status, HttpStatusCode::BadRequest);
    }

    #[test]
    fn header_without_colon_is_400() {
        let err =
            HttpRequest::parse(&lines(&["GET / HTTP/1.1", "garbage"])).unwrap_err();
        assert_eq!(err.status, HttpStatusCode::BadRequest);
        assert_eq!(err.version, HttpVersion::Http1_1);
    }

    #[test]
    fn route_path_drops_query() {
        let request =
            HttpRequest::parse(&lines(&["GET /old_page.py?cache=1 HTTP/1.1"])).unwrap();
        assert_eq!(request.status_line.route_path(), "/old_page.py");
    }
}
