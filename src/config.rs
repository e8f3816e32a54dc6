use std::time::Duration;

use clap::Parser;

use crate::http::Limits;

/// Command line configuration for the echo server.
#[derive(Debug, Clone, Parser)]
#[command(name = "http-request-decoder")]
#[command(about = "Echoes decoded HTTP/1.x requests back as JSON", long_about = None)]
pub struct Config {
    /// Address to listen on.
    #[arg(short, long, default_value = "127.0.0.1:8000")]
    pub address: String,

    /// Seconds a connection may stay silent before its read fails.
    #[arg(long, default_value_t = 30)]
    pub read_timeout_secs: u64,

    /// Longest accepted request or header line, in bytes.
    #[arg(long, default_value_t = 8 * 1024)]
    pub max_line_len: usize,

    /// Most header lines accepted per request.
    #[arg(long, default_value_t = 100)]
    pub max_headers: usize,

    /// Largest body the server will read, in bytes.
    #[arg(long, default_value_t = 1024 * 1024)]
    pub max_body_bytes: u64,
}

impl Config {
    pub fn limits(&self) -> Limits {
        Limits {
            max_line_len: self.max_line_len,
            max_headers: self.max_headers,
        }
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            address: "127.0.0.1:8000".to_string(),
            read_timeout_secs: 30,
            max_line_len: 8 * 1024,
            max_headers: 100,
            max_body_bytes: 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_decoder_limits() {
        let config = Config::parse_from(["http-request-decoder"]);
        assert_eq!(config.limits(), Limits::default());
        assert_eq!(config.address, Config::default().address);
        assert_eq!(config.read_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = Config::parse_from([
            "http-request-decoder",
            "--address",
            "0.0.0.0:9000",
            "--max-headers",
            "5",
            "--max-body-bytes",
            "10",
        ]);
        assert_eq!(config.address, "0.0.0.0:9000");
        assert_eq!(config.limits().max_headers, 5);
        assert_eq!(config.max_body_bytes, 10);
    }
}
