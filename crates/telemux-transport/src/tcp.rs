use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::debug;

use crate::error::{Result, TransportError};

/// Connector for the single outbound collector connection.
///
/// Holds the fixed `host:port` of the remote collector and a bounded
/// connect timeout. Each [`connect`](TcpConnector::connect) call resolves
/// the address fresh, so a DNS change is picked up on the next retry.
#[derive(Debug, Clone)]
pub struct TcpConnector {
    host: String,
    connect_timeout: Duration,
}

impl TcpConnector {
    /// Default bound on a single connect attempt.
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Create a connector for `host` ("collector.example:5555" or "10.0.0.1:5555").
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_timeout(host, Self::DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a connector with an explicit connect timeout.
    pub fn with_timeout(host: impl Into<String>, connect_timeout: Duration) -> Self {
        Self {
            host: host.into(),
            connect_timeout,
        }
    }

    /// Resolve the collector address and open a stream socket (blocking,
    /// bounded by the connect timeout).
    ///
    /// `TCP_NODELAY` is set on the returned stream; telemetry frames are
    /// small and latency-sensitive.
    pub fn connect(&self) -> Result<TcpStream> {
        let addr = self.resolve()?;

        let stream =
            TcpStream::connect_timeout(&addr, self.connect_timeout).map_err(|e| {
                TransportError::Connect { addr, source: e }
            })?;
        stream.set_nodelay(true)?;

        debug!(%addr, "connected to collector");
        Ok(stream)
    }

    fn resolve(&self) -> Result<SocketAddr> {
        let mut addrs = self
            .host
            .to_socket_addrs()
            .map_err(|e| TransportError::Resolve {
                host: self.host.clone(),
                reason: e.to_string(),
            })?;

        addrs.next().ok_or_else(|| TransportError::Resolve {
            host: self.host.clone(),
            reason: "no addresses returned".to_string(),
        })
    }

    /// The configured collector address string.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The configured connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;
    use std::net::TcpListener;

    use super::*;

    #[test]
    fn connects_to_local_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let connector = TcpConnector::new(addr.to_string());
        let stream = connector.connect().unwrap();
        assert!(stream.nodelay().unwrap());

        let (mut accepted, _) = listener.accept().unwrap();
        drop(stream);
        let mut buf = [0u8; 1];
        assert_eq!(accepted.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn connect_to_closed_port_fails() {
        // Bind then drop to get a port that is very likely closed.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let connector = TcpConnector::with_timeout(addr.to_string(), Duration::from_millis(500));
        let result = connector.connect();
        assert!(matches!(result, Err(TransportError::Connect { .. })));
    }

    #[test]
    fn unresolvable_host_fails() {
        let connector = TcpConnector::new("this-host-does-not-exist.invalid:5555");
        let result = connector.connect();
        assert!(matches!(result, Err(TransportError::Resolve { .. })));
    }

    #[test]
    fn accessors() {
        let connector = TcpConnector::with_timeout("10.0.0.1:5555", Duration::from_secs(3));
        assert_eq!(connector.host(), "10.0.0.1:5555");
        assert_eq!(connector.connect_timeout(), Duration::from_secs(3));
    }
}
