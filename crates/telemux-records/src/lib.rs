//! Fixed-size binary record codecs for telemux sensor families.
//!
//! Each sensor family has one record type with a fixed wire size, a
//! well-known channel ID, and a channel name. Records encode to exactly
//! `SIZE` bytes with every multi-byte field little-endian regardless of
//! host order; the collector decodes them with the symmetric `decode`.
//!
//! Two families exist today:
//! - [`EnvironmentalRecord`]: temperature/humidity/battery sensor (24 bytes)
//! - [`MeterRecord`]: power-meter frames carried as an opaque raw block
//!   (21-byte header + 64-byte raw block)

pub mod addr;
pub mod environmental;
pub mod error;
pub mod meter;

pub use addr::SensorAddress;
pub use environmental::EnvironmentalRecord;
pub use error::{CodecError, Result};
pub use meter::{MeterRecord, METER_RAW_SIZE};

/// Format-version byte written after the address header in every record.
pub const FORMAT_VERSION: u8 = 0x01;
