use std::net::TcpStream;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::info;

use telemux_frame::{FrameConfig, FrameWriter};
use telemux_transport::{TcpConnector, TransportError};

/// Connection lifecycle. `Uninitialized` exists only implicitly: before
/// `start` there is no `Connection` at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConnectionState {
    Disconnected,
    Connected,
}

/// The single outbound collector connection, owned by the worker thread.
///
/// `Disconnected` implies no live socket: the state is derived from
/// whether a writer is held, so the two can never disagree.
pub(crate) struct Connection {
    connector: TcpConnector,
    frame_config: FrameConfig,
    writer: Option<FrameWriter<TcpStream>>,
    attempts: Arc<AtomicU64>,
}

impl Connection {
    pub(crate) fn new(connector: TcpConnector, frame_config: FrameConfig) -> Self {
        Self {
            connector,
            frame_config,
            writer: None,
            attempts: Arc::new(AtomicU64::new(0)),
        }
    }

    pub(crate) fn state(&self) -> ConnectionState {
        if self.writer.is_some() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    /// One connect attempt. On failure the state stays `Disconnected`;
    /// the caller decides when to retry.
    pub(crate) fn try_connect(&mut self) -> Result<(), TransportError> {
        let attempt = self.attempts.fetch_add(1, Ordering::Relaxed) + 1;
        let stream = self.connector.connect()?;
        info!(collector = self.connector.host(), attempt, "connected");
        self.writer = Some(FrameWriter::with_config(stream, self.frame_config.clone()));
        Ok(())
    }

    /// The frame writer over the live socket, if connected.
    pub(crate) fn writer_mut(&mut self) -> Option<&mut FrameWriter<TcpStream>> {
        self.writer.as_mut()
    }

    /// Close the socket (if any) and return to `Disconnected`.
    pub(crate) fn disconnect(&mut self) {
        if self.writer.take().is_some() {
            info!(collector = self.connector.host(), "disconnected");
        }
    }

    /// Shared counter of connect attempts made so far.
    pub(crate) fn attempt_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.attempts)
    }
}
