use std::collections::HashMap;

use super::{StatusCode, Version};

#[derive(Debug, Clone)]
pub struct Response {
    pub version: Version,
    pub status_code: StatusCode,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    /// Creates a new `Response` with the given status code.
    ///
    /// The response is HTTP/1.1, carries `Server`, `Date` and
    /// `Connection: close` headers, and has an empty body.
    pub fn new(status_code: StatusCode) -> Response {
        let mut headers = HashMap::new();
        headers.insert("Server".to_string(), "http-request-decoder".to_string());
        headers.insert(
            "Date".to_string(),
            format!("{}", chrono::Utc::now().format("%a, %d %b %Y %H:%M:%S GMT")),
        );
        headers.insert("Connection".to_string(), "close".to_string());

        Response {
            version: Version::HTTP1_1,
            status_code,
            headers,
            body: Vec::new(),
        }
    }

    /// Plain-text response, used for errors.
    pub fn text(status_code: StatusCode, body: &str) -> Response {
        let mut response = Response::new(status_code);
        response.set_content_type("text/plain");
        response.set_body(body.as_bytes().to_vec());
        response
    }

    /// Sets the body of the response and updates the "Content-Length" header.
    pub fn set_body(&mut self, body: Vec<u8>) {
        self.body = body;
        self.headers
            .insert("Content-Length".to_string(), self.body.len().to_string());
    }

    pub fn set_content_type(&mut self, content_type: &str) {
        self.headers
            .insert("Content-Type".to_string(), content_type.to_string());
    }

    /// Converts the response to the bytes sent over the connection: status
    /// line, headers, blank line, body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut response = Vec::new();

        let status_line = format!(
            "{} {} {}\r\n",
            self.version,
            self.status_code as u16,
            self.status_code.reason_phrase()
        );
        response.extend_from_slice(status_line.as_bytes());

        for (key, value) in &self.headers {
            let header_line = format!("{}: {}\r\n", key, value);
            response.extend_from_slice(header_line.as_bytes());
        }

        response.extend_from_slice(b"\r\n");
        response.extend_from_slice(&self.body);

        response
    }
}
