use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// Frame header: channel id (4) + length (2) = 6 bytes.
pub const HEADER_SIZE: usize = 6;

/// Channel ID reserved for control use; never emitted by the uplink.
pub const CONTROL_CHANNEL: u32 = 0;

/// Default maximum payload size. The length field is a u16, so this is
/// also the hard ceiling.
pub const DEFAULT_MAX_PAYLOAD: usize = u16::MAX as usize;

/// A framed telemetry payload with channel routing.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The channel this payload belongs to.
    pub channel: u32,
    /// The payload bytes.
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame.
    pub fn new(channel: u32, payload: impl Into<Bytes>) -> Self {
        Self {
            channel,
            payload: payload.into(),
        }
    }

    /// The total wire size of this frame (header + payload).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }
}

/// Encode a frame into the wire format.
///
/// Wire format:
/// ```text
/// ┌───────────────┬──────────────┬─────────────────┐
/// │ Channel (4B)  │ Length (2B)  │ Payload          │
/// │ LE            │ LE           │ (Length bytes)   │
/// └───────────────┴──────────────┴─────────────────┘
/// ```
pub fn encode_frame(channel: u32, payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if channel == CONTROL_CHANNEL {
        return Err(FrameError::ReservedChannel);
    }
    if payload.len() > DEFAULT_MAX_PAYLOAD {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
            max: DEFAULT_MAX_PAYLOAD,
        });
    }
    dst.reserve(HEADER_SIZE + payload.len());
    dst.put_u32_le(channel);
    dst.put_u16_le(payload.len() as u16);
    dst.put_slice(payload);
    Ok(())
}

/// Decode a frame from a buffer (collector side, and tests).
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet.
/// On success, consumes the frame bytes from the buffer.
pub fn decode_frame(src: &mut BytesMut, max_payload: usize) -> Result<Option<Frame>> {
    if src.len() < HEADER_SIZE {
        return Ok(None); // Need more data
    }

    let channel = u32::from_le_bytes(src[0..4].try_into().unwrap());
    let payload_len = u16::from_le_bytes(src[4..6].try_into().unwrap()) as usize;

    if payload_len > max_payload {
        return Err(FrameError::PayloadTooLarge {
            size: payload_len,
            max: max_payload,
        });
    }

    let total = HEADER_SIZE + payload_len;
    if src.len() < total {
        return Ok(None); // Need more data
    }

    src.advance(HEADER_SIZE);
    let payload = src.split_to(payload_len).freeze();

    Ok(Some(Frame { channel, payload }))
}

/// Configuration for the frame codec.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum payload size in bytes. Default (and ceiling): 65535.
    pub max_payload_size: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
        }
    }
}
