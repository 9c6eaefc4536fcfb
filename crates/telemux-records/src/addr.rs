use std::fmt;

/// A 6-byte sensor device address plus an address-type discriminant.
///
/// Stored least-significant octet first (`bytes[0]` is the lowest octet),
/// matching how radio stacks hand addresses out. On the wire the octets
/// are written in reversed order, so the encoded form reads
/// most-significant first, same as the display form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SensorAddress {
    /// Address octets, least-significant first.
    pub bytes: [u8; 6],
    /// Address type (public/random; opaque to this crate).
    pub kind: u8,
}

impl SensorAddress {
    /// Construct from raw octets in least-significant-first order.
    pub fn new(bytes: [u8; 6], kind: u8) -> Self {
        Self { bytes, kind }
    }

    /// Construct from octets in display order ("AA:BB:CC:DD:EE:FF" gives
    /// `[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]`).
    pub fn from_display_octets(octets: [u8; 6], kind: u8) -> Self {
        let mut bytes = octets;
        bytes.reverse();
        Self { bytes, kind }
    }

    /// Write the address to `buf[0..6]` in wire order (reversed, i.e.
    /// most-significant octet first). `buf` must hold at least 6 bytes.
    pub(crate) fn write_wire(&self, buf: &mut [u8]) {
        for (i, b) in self.bytes.iter().rev().enumerate() {
            buf[i] = *b;
        }
    }

    /// Read an address back from wire order.
    pub(crate) fn from_wire(buf: &[u8], kind: u8) -> Self {
        let mut bytes = [0u8; 6];
        for (i, b) in buf[..6].iter().rev().enumerate() {
            bytes[i] = *b;
        }
        Self { bytes, kind }
    }
}

impl fmt::Display for SensorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.bytes;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            b[5], b[4], b[3], b[2], b[1], b[0]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_most_significant_first() {
        let addr = SensorAddress::from_display_octets([0xA4, 0xC1, 0x38, 0xEC, 0x1C, 0x6D], 0);
        assert_eq!(addr.to_string(), "A4:C1:38:EC:1C:6D");
        assert_eq!(addr.bytes[0], 0x6D);
        assert_eq!(addr.bytes[5], 0xA4);
    }

    #[test]
    fn wire_order_matches_display_order() {
        let addr = SensorAddress::from_display_octets([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF], 0);
        let mut buf = [0u8; 6];
        addr.write_wire(&mut buf);
        assert_eq!(buf, [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);

        let back = SensorAddress::from_wire(&buf, 0);
        assert_eq!(back, addr);
    }
}
