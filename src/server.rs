use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::http::{Decoder, MalformedRequestError, RequestHead, Response, StatusCode};

// Unread request bytes discarded after replying, so closing the socket does
// not reset the connection before the client has read the response.
const DRAIN_LIMIT: u64 = 64 * 1024;

/// Thread-per-connection server that answers each request with a JSON echo
/// of what the decoder saw.
pub struct Server {
    config: Config,
    decoder: Decoder,
}

#[derive(Serialize)]
struct Echo<'a> {
    #[serde(flatten)]
    head: &'a RequestHead,
    body_len: usize,
}

impl Server {
    pub fn new(config: Config) -> Self {
        let decoder = Decoder::with_limits(config.limits());
        Server { config, decoder }
    }

    pub fn listen(&self) -> io::Result<()> {
        let listener = TcpListener::bind(&self.config.address)?;
        info!(address = %listener.local_addr()?, "listening for connections");
        self.serve(listener)
    }

    pub fn serve(&self, listener: TcpListener) -> io::Result<()> {
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let decoder = self.decoder;
                    let max_body_bytes = self.config.max_body_bytes;
                    let read_timeout = self.config.read_timeout();

                    thread::spawn(move || {
                        if let Err(e) =
                            handle_client(stream, &decoder, max_body_bytes, read_timeout)
                        {
                            warn!(error = %e, "error handling client");
                        }
                    });
                }
                Err(e) => {
                    warn!(error = %e, "connection failed");
                }
            }
        }

        Ok(())
    }
}

/// Serves a single request on `stream`, then shuts it down and lets it close.
pub fn handle_client(
    stream: TcpStream,
    decoder: &Decoder,
    max_body_bytes: u64,
    read_timeout: Duration,
) -> io::Result<()> {
    stream.set_read_timeout(Some(read_timeout))?;

    let mut reader = BufReader::new(&stream);
    let response = handle_request(decoder, max_body_bytes, &mut reader)?;

    let mut writer = &stream;
    writer.write_all(&response.to_bytes())?;
    writer.flush()?;

    stream.shutdown(Shutdown::Write)?;
    if let Err(e) = io::copy(&mut Read::take(&mut reader, DRAIN_LIMIT), &mut io::sink()) {
        debug!(error = %e, "stopped draining request");
    }
    Ok(())
}

/// Decodes one request from `stream` and builds the response for it.
///
/// Read failures are returned as errors so the connection can be dropped
/// without an answer; structural problems become `400 Bad Request`.
pub fn handle_request<B: BufRead>(
    decoder: &Decoder,
    max_body_bytes: u64,
    stream: B,
) -> io::Result<Response> {
    let mut request = match decoder.decode(stream) {
        Ok(request) => request,
        Err(MalformedRequestError::Io(e)) => return Err(e),
        Err(e) => {
            warn!(error = %e, "failed to decode request");
            return Ok(Response::text(StatusCode::BadRequest, &e.to_string()));
        }
    };

    let content_length = match request.header("Content-Length") {
        None => 0,
        Some(value) => match value.trim().parse::<u64>() {
            Ok(len) => len,
            Err(_) => {
                return Ok(Response::text(
                    StatusCode::BadRequest,
                    "invalid Content-Length",
                ));
            }
        },
    };
    if content_length > max_body_bytes {
        return Ok(Response::text(
            StatusCode::PayloadTooLarge,
            "request body too large",
        ));
    }

    let mut body = Vec::new();
    Read::take(request.body_mut(), content_length).read_to_end(&mut body)?;
    if (body.len() as u64) < content_length {
        return Ok(Response::text(StatusCode::BadRequest, "incomplete body"));
    }
    debug!(body_len = body.len(), "read request body");

    let echo = Echo {
        head: request.head(),
        body_len: body.len(),
    };
    let json = match serde_json::to_vec(&echo) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "failed to encode echo");
            return Ok(Response::text(
                StatusCode::InternalServerError,
                "Internal Server Error",
            ));
        }
    };

    info!(
        method = %request.method(),
        path = request.path(),
        status = StatusCode::OK as u16,
        "request"
    );

    let mut response = Response::new(StatusCode::OK);
    response.set_content_type("application/json");
    response.set_body(json);
    Ok(response)
}
