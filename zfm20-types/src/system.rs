//! System parameter block returned by `ReadSysPara`

use bitflags::bitflags;
use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, Result};

bitflags! {
    /// Status register bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusFlags: u16 {
        /// Module is executing a command
        const BUSY = 1 << 0;
        /// Module found a matching finger
        const PASS = 1 << 1;
        /// Handshake password was verified
        const PASSWORD_OK = 1 << 2;
        /// Image buffer holds a valid image
        const IMAGE_VALID = 1 << 3;
    }
}

/// System status and configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemParameters {
    /// Status register
    pub status: StatusFlags,

    /// System identifier code (datasheet constant 0x0009)
    pub system_id: u16,

    /// Finger library size
    pub library_size: u16,

    /// Security level [1-5]
    pub security_level: u16,

    /// Module address
    pub address: u32,

    /// Packet size code: 0 = 32, 1 = 64, 2 = 128, 3 = 256 bytes
    pub packet_size_code: u16,

    /// Baud multiplier; the rate is this times 9600
    pub baud_multiplier: u16,
}

impl SystemParameters {
    /// Size of the parameter block in bytes
    pub const SIZE: usize = 16;

    /// Parse the 16-byte parameter block
    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        if payload.len() < Self::SIZE {
            return Err(Error::Parse(format!(
                "system parameters need {} bytes, got {}",
                Self::SIZE,
                payload.len()
            )));
        }

        Ok(Self {
            status: StatusFlags::from_bits_retain(BigEndian::read_u16(&payload[0..2])),
            system_id: BigEndian::read_u16(&payload[2..4]),
            library_size: BigEndian::read_u16(&payload[4..6]),
            security_level: BigEndian::read_u16(&payload[6..8]),
            address: BigEndian::read_u32(&payload[8..12]),
            packet_size_code: BigEndian::read_u16(&payload[12..14]),
            baud_multiplier: BigEndian::read_u16(&payload[14..16]),
        })
    }

    /// Data packet size in bytes
    pub fn packet_size(&self) -> usize {
        32 << self.packet_size_code.min(3)
    }

    /// UART baud rate
    pub fn baud_rate(&self) -> u32 {
        u32::from(self.baud_multiplier) * 9600
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BLOCK: [u8; 16] = [
        0x00, 0x04, // status: password ok
        0x00, 0x09, // system id
        0x00, 0xA3, // library size
        0x00, 0x03, // security level
        0xFF, 0xFF, 0xFF, 0xFF, // address
        0x00, 0x02, // packet size code
        0x00, 0x06, // baud multiplier
    ];

    #[test]
    fn test_parse_parameters() {
        let params = SystemParameters::from_payload(&BLOCK).unwrap();

        assert_eq!(params.status, StatusFlags::PASSWORD_OK);
        assert_eq!(params.system_id, 9);
        assert_eq!(params.library_size, 163);
        assert_eq!(params.security_level, 3);
        assert_eq!(params.address, 0xFFFF_FFFF);
        assert_eq!(params.packet_size(), 128);
        assert_eq!(params.baud_rate(), 57_600);
    }

    #[test]
    fn test_parse_short_block() {
        assert!(SystemParameters::from_payload(&BLOCK[..10]).is_err());
    }
}
