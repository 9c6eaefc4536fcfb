//! Best-effort sensor telemetry uplink with channel multiplexing.
//!
//! telemux collects intermittent sensor records from independent producers
//! and forwards them, in arrival order per source, over a single long-lived
//! TCP connection to a remote collector, using a compact length-prefixed
//! binary framing protocol.
//!
//! # Crate Structure
//!
//! - [`transport`]: outbound TCP connector with bounded connect timeout
//! - [`frame`]: length-prefixed channel framing (the wire protocol)
//! - [`records`]: fixed-size binary codecs for the sensor families
//! - [`uplink`]: channel registry, connection state machine, multiplexer

/// Re-export transport types.
pub mod transport {
    pub use telemux_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use telemux_frame::*;
}

/// Re-export record codecs.
pub mod records {
    pub use telemux_records::*;
}

/// Re-export uplink types.
pub mod uplink {
    pub use telemux_uplink::*;
}
