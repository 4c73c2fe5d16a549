//! Emulation loop
//!
//! Reads lines from the host, answers each one through the command executor
//! and writes the response back, strictly one command at a time.

use crate::command::CommandExecutor;
use anyhow::{anyhow, Result};
use printer_emulator_protocol::state_machine::{LoopEvent, PhaseMachine, TransitionResult};
use printer_emulator_protocol::{strip_line_endings, LineDecoder};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tracing::{debug, trace, warn};

/// One host conversation over an open transport
pub struct Session<'a, S> {
    stream: &'a mut S,
    executor: &'a mut CommandExecutor,
    read_timeout: Duration,
    decoder: LineDecoder,
    phase: PhaseMachine,
    retry_read_errors: bool,
}

impl<'a, S> Session<'a, S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: &'a mut S, executor: &'a mut CommandExecutor, read_timeout: Duration) -> Self {
        Self {
            stream,
            executor,
            read_timeout,
            decoder: LineDecoder::new(),
            phase: PhaseMachine::new(),
            retry_read_errors: false,
        }
    }

    /// Keep polling after a failed read instead of ending the session
    ///
    /// Each failure is logged and followed by a pause of one read timeout.
    pub fn retry_read_errors(mut self, retry: bool) -> Self {
        self.retry_read_errors = retry;
        self
    }

    /// Serve the host until it closes the stream
    ///
    /// Returns the number of responses written.
    pub async fn run(mut self) -> Result<u64> {
        let mut read_buf = vec![0u8; 1024];

        loop {
            // Answer every complete line before reading more
            match self.decoder.decode_next() {
                Ok(Some(line)) => {
                    self.answer(&line).await?;
                    continue;
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("Dropping input: {}", e);
                    continue;
                }
            }

            match timeout(self.read_timeout, self.stream.read(&mut read_buf)).await {
                Ok(Ok(0)) => {
                    debug!("Host closed the stream");
                    return Ok(self.phase.responses_written());
                }
                Ok(Ok(n)) => {
                    self.decoder.extend(&read_buf[..n]);
                }
                Ok(Err(e)) if self.retry_read_errors => {
                    warn!("Read error, polling again in {:?}: {}", self.read_timeout, e);
                    self.advance(LoopEvent::ReadTimedOut);
                    tokio::time::sleep(self.read_timeout).await;
                }
                Ok(Err(e)) => {
                    return Err(anyhow!("Read error: {}", e));
                }
                Err(_) => {
                    trace!("Read timed out, polling again");
                    self.advance(LoopEvent::ReadTimedOut);
                }
            }
        }
    }

    /// Process one line and write its response
    async fn answer(&mut self, line: &str) -> Result<()> {
        self.advance(LoopEvent::LineReceived);

        if strip_line_endings(line).is_empty() {
            self.advance(LoopEvent::LineIgnored);
            return Ok(());
        }

        let response = self.executor.execute(line);
        self.advance(LoopEvent::ResponseReady);

        if let Some(delay) = response.delay {
            tokio::time::sleep(delay).await;
        }

        self.stream.write_all(response.text.as_bytes()).await?;
        self.stream.flush().await?;
        self.advance(LoopEvent::ResponseWritten);

        Ok(())
    }

    fn advance(&mut self, event: LoopEvent) {
        if let TransitionResult::Invalid { from, event } = self.phase.process_event(event) {
            warn!("Ignoring {:?} while {:?}", event, from);
        }
    }
}
