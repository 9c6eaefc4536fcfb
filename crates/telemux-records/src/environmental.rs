use bytes::Bytes;

use crate::addr::SensorAddress;
use crate::error::{CodecError, Result};
use crate::FORMAT_VERSION;

/// One measurement from an environmental (temperature/humidity) sensor.
///
/// Wire layout (24 bytes, all multi-byte fields little-endian):
/// ```text
/// 0..6    address (reversed octet order)
/// 6       address type
/// 7       rssi (signed)
/// 8       format version (0x01)
/// 9..17   timestamp (i64, monotonic milliseconds)
/// 17..19  temperature (i16, unit 0.01 °C)
/// 19..21  humidity (u16, unit 0.01 %)
/// 21..23  battery voltage (u16, millivolts)
/// 23      battery level (percent)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentalRecord {
    pub addr: SensorAddress,
    /// Received signal strength at capture time.
    pub rssi: i8,
    /// Monotonic milliseconds since source boot.
    pub timestamp: i64,
    /// Unit 0.01 °C; 2050 means 20.50 °C.
    pub temperature: i16,
    /// Unit 0.01 %; 4510 means 45.10 %.
    pub humidity: u16,
    /// Battery voltage in millivolts.
    pub battery_mv: u16,
    /// Battery level, 0..=100 %.
    pub battery_level: u8,
}

impl EnvironmentalRecord {
    /// Fixed wire size of this record family.
    pub const SIZE: usize = 24;

    /// Well-known channel ID for this family.
    pub const CHANNEL_ID: u32 = 0xFA30_FA42;

    /// Channel name used at registration (display/debug only).
    pub const CHANNEL_NAME: &'static str = "env-sensor-measurements";

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
        buf[9..17].copy_from_slice(&self.timestamp.to_le_bytes());
        buf[17..19].copy_from_slice(&self.temperature.to_le_bytes());
        buf[19..21].copy_from_slice(&self.humidity.to_le_bytes());
        buf[21..23].copy_from_slice(&self.battery_mv.to_le_bytes());
        buf[23] = self.battery_level;
    }

    /// Decode a record from its wire form (collector side, and tests).
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < Self::SIZE {
            return Err(CodecError::Truncated {
                needed: Self::SIZE,
                got: buf.len(),
            });
        }
        Ok(Self {
            addr: SensorAddress::from_wire(&buf[0..6], buf[6]),
            rssi: buf[7] as i8,
            timestamp: i64::from_le_bytes(buf[9..17].try_into().unwrap()),
            temperature: i16::from_le_bytes(buf[17..19].try_into().unwrap()),
            humidity: u16::from_le_bytes(buf[19..21].try_into().unwrap()),
            battery_mv: u16::from_le_bytes(buf[21..23].try_into().unwrap()),
            battery_level: buf[23],
        })
    }
}
