use bytes::Bytes;

use crate::addr::SensorAddress;
use crate::error::{CodecError, Result};
use crate::FORMAT_VERSION;

/// Size of the opaque raw block carried by a meter record.
pub const METER_RAW_SIZE: usize = 64;

/// One frame captured from a power-meter sensor.
///
/// The measurement itself is an opaque raw block copied verbatim; only the
/// capture metadata is structured. Wire layout (85 bytes):
/// ```text
/// 0..6    address (reversed octet order)
/// 6       address type
/// 7       rssi (signed)
/// 8       format version (0x01)
/// 9..13   flags (u32 LE)
/// 13..21  timestamp (i64 LE, monotonic milliseconds)
/// 21..85  raw block, verbatim
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeterRecord {
    pub addr: SensorAddress,
    pub rssi: i8,
    /// Bit 0 marks a valid capture; remaining bits are reserved.
    pub flags: u32,
    /// Monotonic milliseconds since source boot.
    pub timestamp: i64,
    /// Raw meter frame, forwarded untouched.
    pub raw: [u8; METER_RAW_SIZE],
}

impl MeterRecord {
    /// Fixed wire size: 21-byte header plus the raw block.
    pub const SIZE: usize = 21 + METER_RAW_SIZE;

    /// Well-known channel ID for this family.
    pub const CHANNEL_ID: u32 = 0xCD1F_14BD;

    /// Channel name used at registration (display/debug only).
    pub const CHANNEL_NAME: &'static str = "meter-tic-measurements";

    /// Flag bit set when the capture is valid.
    pub const FLAG_VALID: u32 = 1 << 0;

    /// Encode into `buf`. Fails without writing anything if `buf` is
    /// smaller than [`Self::SIZE`]; returns the number of bytes written.
    pub fn encode_into(&self, buf: &mut [u8]) -> Result<usize> {
        if buf.len() < Self::SIZE {
            return Err(CodecError::BufferTooSmall {
                needed: Self::SIZE,
                got: buf.len(),
            });
        }
        self.write_fields(buf);
        Ok(Self::SIZE)
    }

    /// Encode into a freshly allocated exact-size buffer.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = vec![0u8; Self::SIZE];
        self.write_fields(&mut buf);
        Bytes::from(buf)
    }

    fn write_fields(&self, buf: &mut [u8]) {
        self.addr.write_wire(&mut buf[0..6]);
        buf[6] = self.addr.kind;
        buf[7] = self.rssi as u8;
        buf[8] = FORMAT_VERSION;
        buf[9..13].copy_from_slice(&self.flags.to_le_bytes());
        buf[13..21].copy_from_slice(&self.timestamp.to_le_bytes());
        buf[21..Self::SIZE].copy_from_slice(&self.raw);
    }

    /// Decode a record from its wire form (collector side, and tests).
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < Self::SIZE {
            return Err(CodecError::Truncated {
                needed: Self::SIZE,
                got: buf.len(),
            });
        }
        let mut raw = [0u8; METER_RAW_SIZE];
        raw.copy_from_slice(&buf[21..Self::SIZE]);
        Ok(Self {
            addr: SensorAddress::from_wire(&buf[0..6], buf[6]),
            rssi: buf[7] as i8,
            flags: u32::from_le_bytes(buf[9..13].try_into().unwrap()),
            timestamp: i64::from_le_bytes(buf[13..21].try_into().unwrap()),
            raw,
        })
    }

    /// Whether the valid flag is set.
    pub fn is_valid(&self) -> bool {
        self.flags & Self::FLAG_VALID != 0
    }
}
