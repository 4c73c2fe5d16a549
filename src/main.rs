mod command;
mod config;
mod device;
mod session;
mod transport;

use anyhow::Result;
use command::CommandExecutor;
use config::{Config, TransportConfig};
use session::Session;
use std::time::Duration;
use transport::{SerialConnector, TcpConnector, TransportConnector, TransportStream};

use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = Config::from_args_and_env()?;
    let emulator = &config.emulator;

    let mut executor = CommandExecutor::new(emulator);
    info!(
        "Emulated printer: extruder target {}, bed {}",
        executor.state().extruder_target,
        if executor.state().has_bed() {
            format!("target {}", executor.state().bed_target.unwrap_or_default())
        } else {
            "not installed".into()
        }
    );

    match &config.transport {
        TransportConfig::Serial { path, baud } => {
            let connector = SerialConnector::new(path.clone(), *baud, emulator.read_timeout);
            serve(&connector, &mut executor, emulator.read_timeout).await
        }
        TransportConfig::Tcp { address } => {
            let connector = TcpConnector::bind(address).await?;
            serve(&connector, &mut executor, emulator.read_timeout).await
        }
    }
}

/// Run the emulation loop for each host the connector hands out
///
/// A connector that serves a single host (a serial port) is reopened after
/// its session ends, so only external termination stops the emulator.
async fn serve<C: TransportConnector>(
    connector: &C,
    executor: &mut CommandExecutor,
    read_timeout: Duration,
) -> Result<()> {
    let reopen = !connector.accepts_more();
    let mut stream = connector.connect().await?;

    loop {
        let speed = if executor.run_slow() { "slow" } else { "fast" };
        info!("Initializing emulator on {} (Speed: {})", connector.name(), speed);

        let result = Session::new(&mut stream, executor, read_timeout)
            .retry_read_errors(reopen)
            .run()
            .await;
        if let Err(e) = stream.shutdown().await {
            warn!("Failed to close {}: {}", connector.name(), e);
        }

        match result {
            Ok(responses) => info!("Host left after {} responses", responses),
            Err(e) => warn!("Session ended: {}", e),
        }

        stream = if reopen {
            reconnect(connector, read_timeout).await
        } else {
            connector.connect().await?
        };
    }
}

/// Keep trying to reopen the transport, pausing between attempts
async fn reconnect<C: TransportConnector>(connector: &C, backoff: Duration) -> C::Stream {
    loop {
        tokio::time::sleep(backoff).await;
        match connector.connect().await {
            Ok(stream) => return stream,
            Err(e) => warn!("Reopening {} failed: {:#}", connector.name(), e),
        }
    }
}
