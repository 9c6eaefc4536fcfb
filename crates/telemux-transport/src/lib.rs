//! Outbound TCP transport for the telemux uplink.
//!
//! Provides a single primitive: [`TcpConnector`], which resolves a fixed
//! collector address and opens a stream socket with a bounded connect
//! timeout. Every failure here is retryable; the uplink worker decides
//! when to try again.
//!
//! This is the lowest layer of telemux. Everything else builds on top of
//! the plain `std::net::TcpStream` it hands out.

pub mod error;
pub mod tcp;

pub use error::{Result, TransportError};
pub use tcp::TcpConnector;
