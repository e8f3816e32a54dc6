use std::fmt::Display;

pub mod error;
pub mod parser;
pub mod request;
pub mod response;

pub use error::MalformedRequestError;
pub use parser::{Decoder, Limits, decode};
pub use request::{Request, RequestHead};
pub use response::Response;

/// Request method token.
///
/// Well-known methods get their own variant; any other token is kept as-is.
/// Matching is case-sensitive, so `as_str` always returns the token exactly
/// as it appeared on the request line.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Connect,
    Options,
    Trace,
    Patch,
    Extension(String),
}

impl Method {
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Connect => "CONNECT",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Patch => "PATCH",
            Method::Extension(token) => token,
        }
    }
}

impl From<&str> for Method {
    fn from(s: &str) -> Self {
        match s {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "HEAD" => Method::Head,
            "CONNECT" => Method::Connect,
            "OPTIONS" => Method::Options,
            "TRACE" => Method::Trace,
            "PATCH" => Method::Patch,
            other => Method::Extension(other.to_string()),
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Version {
    HTTP1_1,
}

impl Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Version::HTTP1_1 => write!(f, "HTTP/1.1"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusCode {
    OK = 200,
    BadRequest = 400,
    PayloadTooLarge = 413,
    InternalServerError = 500,
}

impl StatusCode {
    pub fn reason_phrase(&self) -> &str {
        match self {
            StatusCode::OK => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::PayloadTooLarge => "Payload Too Large",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_str() {
        assert_eq!(Method::from("GET"), Method::Get);
        assert_eq!(Method::from("POST"), Method::Post);
        assert_eq!(Method::from("PUT"), Method::Put);
        assert_eq!(Method::from("DELETE"), Method::Delete);
        assert_eq!(Method::from("HEAD"), Method::Head);
        assert_eq!(Method::from("CONNECT"), Method::Connect);
        assert_eq!(Method::from("OPTIONS"), Method::Options);
        assert_eq!(Method::from("TRACE"), Method::Trace);
        assert_eq!(Method::from("PATCH"), Method::Patch);
    }

    #[test]
    fn test_method_unknown_token_is_kept() {
        let method = Method::from("PROPFIND");
        assert_eq!(method, Method::Extension("PROPFIND".to_string()));
        assert_eq!(method.as_str(), "PROPFIND");
    }

    #[test]
    fn test_status_line_parts() {
        assert_eq!(Version::HTTP1_1.to_string(), "HTTP/1.1");
        assert_eq!(StatusCode::PayloadTooLarge as u16, 413);
        assert_eq!(
            StatusCode::InternalServerError.reason_phrase(),
            "Internal Server Error"
        );
    }

    #[test]
    fn test_method_is_case_sensitive() {
        let method = Method::from("get");
        assert_eq!(method, Method::Extension("get".to_string()));
        assert_eq!(method.to_string(), "get");
    }
}
