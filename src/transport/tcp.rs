//! TCP transport implementation for running without a serial device

use crate::transport::traits::{TransportConnector, TransportStream};
use anyhow::{Context as _, Result};
use async_trait::async_trait;
use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::{TcpListener, TcpStream};
use tracing::info;

/// TCP stream wrapper implementing TransportStream
pub struct TcpTransportStream {
    inner: TcpStream,
    peer_addr: SocketAddr,
}

impl TcpTransportStream {
    pub fn new(stream: TcpStream, peer_addr: SocketAddr) -> Self {
        Self {
            inner: stream,
            peer_addr,
        }
    }

    /// Get the connected host's address
    pub fn peer_address(&self) -> SocketAddr {
        self.peer_addr
    }
}

impl AsyncRead for TcpTransportStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}

impl AsyncWrite for TcpTransportStream {
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
impl TransportStream for TcpTransportStream {
    async fn shutdown(&mut self) -> Result<()> {
        tokio::io::AsyncWriteExt::shutdown(&mut self.inner).await?;
        Ok(())
    }
}

/// TCP connector that hands out one accepted host at a time
pub struct TcpConnector {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl TcpConnector {
    /// Bind a listener at `address`
    pub async fn bind(address: &str) -> Result<Self> {
        let listener = TcpListener::bind(address)
            .await
            .with_context(|| format!("Failed to listen on {}", address))?;
        let local_addr = listener.local_addr()?;
        Ok(Self {
            listener,
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

#[async_trait]
impl TransportConnector for TcpConnector {
    type Stream = TcpTransportStream;

    async fn connect(&self) -> Result<Self::Stream> {
        let (stream, peer_addr) = self.listener.accept().await?;
        stream.set_nodelay(true)?;
        let stream = TcpTransportStream::new(stream, peer_addr);
        info!("Host connected from {}", stream.peer_address());
        Ok(stream)
    }

    fn name(&self) -> String {
        format!("tcp {}", self.local_addr)
    }

    fn accepts_more(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn test_tcp_connector_accepts_host() {
        let connector = TcpConnector::bind("127.0.0.1:0").await.unwrap();
        let addr = connector.local_addr();
        assert_eq!(connector.name(), format!("tcp {}", addr));
        assert!(connector.accepts_more());

        let host = tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            stream.write_all(b"M105\n").await.unwrap();
            stream.local_addr().unwrap()
        });

        let mut stream = connector.connect().await.unwrap();
        let mut buf = [0u8; 5];
        stream.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"M105\n");

        let host_addr = host.await.unwrap();
        assert_eq!(stream.peer_address(), host_addr);
    }
}
