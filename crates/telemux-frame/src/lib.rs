//! Length-prefixed channel framing for the telemux wire protocol.
//!
//! Every record sent to the collector is framed with:
//! - A 4-byte little-endian channel ID (routing key, assigned at registration)
//! - A 2-byte little-endian payload length
//!
//! There is no magic number, checksum, or in-band version negotiation; the
//! receiver knows each channel's payload layout out of band via the
//! registered channel ID. Channel `0` is reserved for control use and is
//! never emitted by the uplink.

pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{
    decode_frame, encode_frame, Frame, FrameConfig, CONTROL_CHANNEL, DEFAULT_MAX_PAYLOAD,
    HEADER_SIZE,
};
pub use error::{FrameError, Result};
pub use reader::FrameReader;
pub use writer::FrameWriter;
