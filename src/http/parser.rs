use std::collections::HashMap;
use std::io::{BufRead, Read};

use tracing::{debug, trace};

use super::{MalformedRequestError, Method, Request, RequestHead};

/// Bounds applied while reading the request line and header block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Longest accepted line, line terminator excluded.
    pub max_line_len: usize,
    /// Most header lines accepted before the blank separator line.
    pub max_headers: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_line_len: 8 * 1024,
            max_headers: 100,
        }
    }
}

/// Stateless HTTP/1.x request decoder.
///
/// Holds nothing but its limits, so one value can be copied into any number
/// of connection threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    limits: Limits,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: Limits) -> Self {
        Decoder { limits }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Decodes the request line and header block from `stream`.
    ///
    /// # Arguments
    ///
    /// * `stream` - A buffered reader positioned at the start of a request.
    ///   Pass `&mut reader` to keep ownership of the underlying stream.
    ///
    /// # Returns
    ///
    /// The decoded `Request`, whose body is `stream` positioned right after
    /// the blank line that ends the headers, or a `MalformedRequestError`.
    /// No body byte is read.
    pub fn decode<B: BufRead>(&self, mut stream: B) -> Result<Request<B>, MalformedRequestError> {
        match self.decode_head(&mut stream) {
            Ok(head) => Ok(Request::new(head, stream)),
            Err(e) => {
                debug!(error = %e, "rejected request");
                Err(e)
            }
        }
    }

    fn decode_head<B: BufRead>(&self, stream: &mut B) -> Result<RequestHead, MalformedRequestError> {
        let request_line = self
            .read_line(stream)?
            .ok_or(MalformedRequestError::MissingRequestLine)?;
        let (method, target) = split_request_line(&request_line)?;
        trace!(%method, request_target = target, "request line");

        let (path, query_params) = split_target(target);

        let mut headers = HashMap::new();
        let mut count = 0;
        loop {
            let line = self
                .read_line(stream)?
                .ok_or(MalformedRequestError::UnterminatedHeaders)?;
            if line.is_empty() {
                break;
            }

            count += 1;
            if count > self.limits.max_headers {
                return Err(MalformedRequestError::TooManyHeaders {
                    limit: self.limits.max_headers,
                });
            }

            let (name, value) = split_header(&line)?;
            headers.insert(name.to_string(), value.to_string());
        }

        Ok(RequestHead {
            method,
            path,
            headers,
            query_params,
        })
    }

    /// Reads one `\n` or `\r\n` terminated line with the terminator removed.
    ///
    /// Returns `None` when the stream ends before a terminator.
    fn read_line<B: BufRead>(&self, stream: &mut B) -> Result<Option<String>, MalformedRequestError> {
        let max = self.limits.max_line_len;
        let cap = (max as u64).saturating_add(2);
        let mut buf = Vec::new();
        Read::take(&mut *stream, cap).read_until(b'\n', &mut buf)?;

        if buf.last() != Some(&b'\n') {
            if buf.len() as u64 >= cap {
                return Err(MalformedRequestError::LineTooLong { limit: max });
            }
            return Ok(None);
        }

        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        if buf.len() > max {
            return Err(MalformedRequestError::LineTooLong { limit: max });
        }

        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

/// Decodes a request from `stream` with the default [`Limits`].
pub fn decode<B: BufRead>(stream: B) -> Result<Request<B>, MalformedRequestError> {
    Decoder::new().decode(stream)
}

// The protocol version is required but not kept.
fn split_request_line(line: &str) -> Result<(Method, &str), MalformedRequestError> {
    let parts: Vec<&str> = line.split(' ').collect();
    match parts.as_slice() {
        [method, target, _version] => Ok((Method::from(*method), *target)),
        _ => Err(MalformedRequestError::RequestLine {
            line: line.to_string(),
        }),
    }
}

fn split_target(target: &str) -> (String, HashMap<String, Vec<String>>) {
    let Some((path, query)) = target.split_once('?') else {
        return (target.to_string(), HashMap::new());
    };

    let mut query_params: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in form_urlencoded::parse(query.as_bytes()) {
        query_params
            .entry(name.into_owned())
            .or_default()
            .push(value.into_owned());
    }

    (path.to_string(), query_params)
}

fn split_header(line: &str) -> Result<(&str, &str), MalformedRequestError> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| MalformedRequestError::HeaderLine {
            line: line.to_string(),
        })?;
    Ok((name, value.trim_start_matches([' ', '\t'])))
}
