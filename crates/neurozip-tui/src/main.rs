//! NeuroZip terminal client entry point.

use clap::Parser;
use neurozip_tui::{Args, Config, Runtime, TerminalDriver, logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_args(Args::parse())?;
    logging::init(&config)?;

    tracing::info!(server = %config.server, "NeuroZip client starting");

    let driver = TerminalDriver::new()?;
    let mut runtime = Runtime::new(driver, config.transport, config.server);
    runtime.run().await?;

    tracing::info!("NeuroZip client stopped");
    Ok(())
}
