//! Serial transport implementation for real or virtual (pty) serial ports

use crate::transport::traits::{TransportConnector, TransportStream};
use anyhow::{Context as _, Result};
use async_trait::async_trait;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio_serial::{SerialPortBuilderExt, SerialStream};

/// Serial stream wrapper implementing TransportStream
pub struct SerialTransportStream {
    inner: SerialStream,
}

impl SerialTransportStream {
    pub fn new(stream: SerialStream) -> Self {
        Self { inner: stream }
    }
}

impl AsyncRead for SerialTransportStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}

impl AsyncWrite for SerialTransportStream {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.inner).poll_write(cx, buf)
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_shutdown(cx)
    }
}

#[async_trait]
impl TransportStream for SerialTransportStream {
    async fn shutdown(&mut self) -> Result<()> {
        tokio::io::AsyncWriteExt::shutdown(&mut self.inner).await?;
        Ok(())
    }
}

/// Opens a serial device at a fixed baud rate
pub struct SerialConnector {
    path: String,
    baud: u32,
    timeout: Duration,
}

impl SerialConnector {
    /// Create a connector for the device at `path`
    pub fn new(path: impl Into<String>, baud: u32, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            baud,
            timeout,
        }
    }
}

#[async_trait]
impl TransportConnector for SerialConnector {
    type Stream = SerialTransportStream;

    async fn connect(&self) -> Result<Self::Stream> {
        let stream = tokio_serial::new(&self.path, self.baud)
            .timeout(self.timeout)
            .open_native_async()
            .with_context(|| format!("Failed to open serial port {}", self.path))?;
        Ok(SerialTransportStream::new(stream))
    }

    fn name(&self) -> String {
        format!("serial port {} @ {} baud", self.path, self.baud)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_connector_name() {
        let connector = SerialConnector::new("/dev/ttyS1", 250_000, Duration::from_secs(1));
        assert_eq!(connector.name(), "serial port /dev/ttyS1 @ 250000 baud");
        assert!(!connector.accepts_more());
    }

    #[tokio::test]
    async fn test_missing_device_fails() {
        let connector = SerialConnector::new(
            "/dev/printer-emulator-does-not-exist",
            250_000,
            Duration::from_secs(1),
        );
        assert!(connector.connect().await.is_err());
    }
}
