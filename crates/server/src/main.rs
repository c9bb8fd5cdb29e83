use anyhow::Result;
use clap::Parser;
use folio_server::observability::init_logging;
use folio_server::{HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    init_logging(config.log_format, "info")?;

    HttpServer::new(config).run().await
}
