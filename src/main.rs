use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use http_request_decoder::config::Config;
use http_request_decoder::server::Server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "http_request_decoder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();
    tracing::info!(
        address = %config.address,
        read_timeout_secs = config.read_timeout_secs,
        max_line_len = config.max_line_len,
        max_headers = config.max_headers,
        max_body_bytes = config.max_body_bytes,
        "configuration loaded"
    );

    let server = Server::new(config);
    server.listen()?;

    Ok(())
}
