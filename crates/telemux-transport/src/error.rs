use std::net::SocketAddr;

/// Errors that can occur while opening the collector connection.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The configured collector address did not resolve to any socket address.
    #[error("failed to resolve {host}: {reason}")]
    Resolve { host: String, reason: String },

    /// Failed to connect to the resolved address.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        source: std::io::Error,
    },

    /// An I/O error occurred on the transport stream.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;
