use thiserror::Error;

/// Why a request could not be decoded.
///
/// Every variant is fatal for the request being decoded. The caller decides
/// whether to answer with an error status or just drop the connection.
#[derive(Debug, Error)]
pub enum MalformedRequestError {
    /// The stream ended before a complete request line was read.
    #[error("stream ended before the request line")]
    MissingRequestLine,

    /// The request line did not split into method, target and version.
    #[error("invalid request line: {line:?}")]
    RequestLine { line: String },

    /// A header line had no colon.
    #[error("invalid header line: {line:?}")]
    HeaderLine { line: String },

    /// The stream ended inside the header block.
    #[error("stream ended before the end of the header block")]
    UnterminatedHeaders,

    #[error("line exceeds {limit} bytes")]
    LineTooLong { limit: usize },

    #[error("more than {limit} header lines")]
    TooManyHeaders { limit: usize },

    /// Reading from the underlying stream failed.
    #[error("failed to read request: {0}")]
    Io(#[from] std::io::Error),
}

impl MalformedRequestError {
    /// The offending line, when the failure is tied to one.
    pub fn line(&self) -> Option<&str> {
        match self {
            MalformedRequestError::RequestLine { line }
            | MalformedRequestError::HeaderLine { line } => Some(line),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_is_exposed_for_line_errors() {
        let err = MalformedRequestError::HeaderLine {
            line: "garbage".to_string(),
        };
        assert_eq!(err.line(), Some("garbage"));
        assert_eq!(err.to_string(), "invalid header line: \"garbage\"");
        assert_eq!(MalformedRequestError::UnterminatedHeaders.line(), None);
    }
}
