//! Single-pass decoder for HTTP/1.x requests.
//!
//! [`http::decode`] reads the request line and header block from a buffered
//! stream and returns a [`http::Request`] whose body is the same stream,
//! positioned at the first body byte. The [`server`] module is a small
//! thread-per-connection echo server built on top of it.

pub mod config;
pub mod http;
pub mod server;
