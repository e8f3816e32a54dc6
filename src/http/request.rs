use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};

use super::Method;

/// Everything a decoded request carries apart from its body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestHead {
    pub method: Method,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub query_params: HashMap<String, Vec<String>>,
}

/// A decoded HTTP/1.x request.
///
/// `B` is the stream the request was decoded from, positioned at the first
/// body byte. Decode from `&mut reader` to keep ownership of the stream with
/// the connection handler; the request never closes it.
pub struct Request<B> {
    head: RequestHead,
    body: B,
}

impl<B> Request<B> {
    pub(crate) fn new(head: RequestHead, body: B) -> Self {
        Request { head, body }
    }

    pub fn method(&self) -> &Method {
        &self.head.method
    }

    /// Request path without the query string.
    pub fn path(&self) -> &str {
        &self.head.path
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.head.headers
    }

    /// Looks up a header by its exact, case-sensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.headers.get(name).map(String::as_str)
    }

    pub fn query_params(&self) -> &HashMap<String, Vec<String>> {
        &self.head.query_params
    }

    /// All values given for `name`, in query-string order.
    pub fn query_values(&self, name: &str) -> &[String] {
        self.head
            .query_params
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First value given for `name`.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_values(name).first().map(String::as_str)
    }

    pub fn head(&self) -> &RequestHead {
        &self.head
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    pub fn into_body(self) -> B {
        self.body
    }

    pub fn into_parts(self) -> (RequestHead, B) {
        (self.head, self.body)
    }
}

impl<B> fmt::Debug for Request<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.head.method)
            .field("path", &self.head.path)
            .field("headers", &self.head.headers)
            .field("query_params", &self.head.query_params)
            .finish_non_exhaustive()
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
