use clap::Parser;
use kv_server::logging::root_logger;
use kv_server::{KvServer, ServerConfig};
use slog::error;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = ServerConfig::parse();
    let logger = root_logger();

    if let Err(e) = KvServer::run(&config, logger.clone()).await {
        error!(logger, "server failed"; "error" => %e);
        return Err(e.into());
    }
    Ok(())
}
