//! Server configuration from flags and `FOLIO_*` environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use folio_core::ReaderConfig;

/// Seconds the request timeout must exceed the fetch timeout by.
const REQUEST_TIMEOUT_MARGIN: u64 = 5;

/// Output encoding for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Reader view HTTP server
#[derive(Debug, Clone, Parser)]
#[command(name = "folio-server", version, about, long_about = None)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "FOLIO_LISTEN", default_value = "127.0.0.1:8080")]
    pub listen: SocketAddr,

    /// Upstream fetch timeout in seconds
    #[arg(long, env = "FOLIO_FETCH_TIMEOUT", default_value_t = 30)]
    pub fetch_timeout: u64,

    /// Largest accepted upstream body in bytes
    #[arg(long, env = "FOLIO_MAX_BODY_BYTES", default_value_t = 5 * 1024 * 1024)]
    pub max_body_bytes: usize,

    /// User-Agent sent upstream
    #[arg(long, env = "FOLIO_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Whole-request timeout in seconds
    #[arg(long, env = "FOLIO_REQUEST_TIMEOUT", default_value_t = 45)]
    pub request_timeout: u64,

    /// Log output format
    #[arg(long, env = "FOLIO_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn reader_config(&self) -> ReaderConfig {
        let mut builder = ReaderConfig::builder()
            .timeout(self.fetch_timeout)
            .max_body_bytes(self.max_body_bytes);

        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        builder.build()
    }

    /// Whole-request budget, never below the fetch timeout plus a margin.
    pub fn request_timeout(&self) -> Duration {
        let floor = self.fetch_timeout.saturating_add(REQUEST_TIMEOUT_MARGIN);
        Duration::from_secs(self.request_timeout.max(floor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_args() {
        let config = ServerConfig::try_parse_from(["folio-server"]).unwrap();
        assert_eq!(config.listen.port(), 8080);
        assert_eq!(config.fetch_timeout, 30);
        assert_eq!(config.max_body_bytes, 5 * 1024 * 1024);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_flags_reach_reader_config() {
        let config = ServerConfig::try_parse_from([
            "folio-server",
            "--listen",
            "0.0.0.0:9000",
            "--fetch-timeout",
            "5",
            "--user-agent",
            "TestAgent/1.0",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(config.listen.port(), 9000);
        assert_eq!(config.log_format, LogFormat::Json);

        let reader = config.reader_config();
        assert_eq!(reader.fetch.timeout, 5);
        assert_eq!(reader.fetch.user_agent, "TestAgent/1.0");
    }

    #[test]
    fn test_request_timeout_stays_above_fetch_timeout() {
        let config = ServerConfig::try_parse_from(["folio-server"]).unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(45));

        let config = ServerConfig::try_parse_from([
            "folio-server",
            "--fetch-timeout",
            "30",
            "--request-timeout",
            "10",
        ])
        .unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(35));
    }

    #[test]
    fn test_invalid_listen_address() {
        assert!(ServerConfig::try_parse_from(["folio-server", "--listen", "nowhere"]).is_err());
    }
}
