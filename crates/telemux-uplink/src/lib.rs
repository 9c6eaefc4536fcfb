//! Channel registry, connection state machine and multiplexer for the
//! telemux uplink.
//!
//! This is the "just works" layer: register channels, start the worker,
//! push encoded records from any thread. One dedicated worker thread owns
//! the collector connection; producers only ever hold a [`ChannelHandle`]
//! backed by a bounded queue. A full queue drops the new record instead of
//! blocking; delivery is best-effort.
//!
//! ```no_run
//! use telemux_uplink::{UplinkBuilder, UplinkConfig};
//!
//! let mut builder = UplinkBuilder::new(UplinkConfig::new("collector.local:5555"));
//! let env = builder.register(0xFA30_FA42, "env-sensor-measurements", 24)?;
//! let worker = builder.start()?;
//!
//! env.push(vec![0u8; 24]); // encoded record, dropped if the queue is full
//! # worker.shutdown();
//! # Ok::<(), telemux_uplink::UplinkError>(())
//! ```

pub mod config;
pub mod error;
pub mod registry;
pub mod worker;

mod connection;
mod mux;

pub use config::UplinkConfig;
pub use error::{Result, UplinkError};
pub use registry::{ChannelHandle, UplinkBuilder};
pub use worker::UplinkWorker;
