mod http;
mod operations;
mod plane;
mod slack;
mod utils;

use std::sync::Arc;

use anyhow::Result;
use dotenv::dotenv;
use http::{server::run_http_server, server_environment::ServerEnvironment};
use log::{info, warn};
use utils::log::bootstrap_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv_result = dotenv();
    bootstrap_logging();
    if let Err(err) = dotenv_result {
        warn!("No .env loaded, using the process environment: {}", err);
    }
    let environment = Arc::new(ServerEnvironment::current()?);
    info!("Starting with {:?}.", environment);
    let socket_mode = environment.socket_mode();
    tokio::try_join!(run_http_server(environment.clone()), socket_mode.run())?;
    Ok(())
}
