//! ZFM20 packet structure and encoding/decoding

use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::fmt;

use crate::{
    checksum,
    command::Command,
    constants::START_CODE,
    error::{Error, Result},
};

/// Packet kind identifier (byte 6 of every frame)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PacketKind {
    /// Instruction sent to the module
    Command = 0x01,

    /// Data packet with more data to follow
    Data = 0x02,

    /// Acknowledgement sent by the module
    Ack = 0x07,

    /// Last data packet of a transfer
    EndData = 0x08,
}

impl From<PacketKind> for u8 {
    fn from(kind: PacketKind) -> u8 {
        kind as u8
    }
}

impl TryFrom<u8> for PacketKind {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x01 => Ok(Self::Command),
            0x02 => Ok(Self::Data),
            0x07 => Ok(Self::Ack),
            0x08 => Ok(Self::EndData),
            _ => Err(Error::UnknownPacketKind(value)),
        }
    }
}

/// ZFM20 protocol packet
///
/// # Packet Structure
///
/// ```text
/// ┌───────────┬───────────┬──────────┬───────────┬───────────┬───────────┐
/// │   Start   │  Address  │   Kind   │  Length   │  Payload  │ Checksum  │
/// │  2 bytes  │  4 bytes  │  1 byte  │  2 bytes  │  N bytes  │  2 bytes  │
/// │ (0xEF01)  │ (BE u32)  │          │ (N + 2)   │           │ (BE u16)  │
/// └───────────┴───────────┴──────────┴───────────┴───────────┴───────────┘
/// ```
///
/// All multi-byte values are big-endian.
///
/// # Examples
///
/// ```
/// use zfm20_core::{Command, Packet};
///
/// // Template count request to the default address
/// let packet = Packet::command(0xFFFF_FFFF, Command::TemplateCount, &[]);
/// let encoded = packet.encode().unwrap();
///
/// // Decode it back
/// let decoded = Packet::decode(encoded).unwrap();
/// assert_eq!(packet, decoded);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Packet {
    /// Module address
    pub address: u32,

    /// Packet kind
    pub kind: PacketKind,

    /// Packet payload (instruction or confirmation code first)
    pub payload: Bytes,
}

impl Packet {
    /// Bytes before the payload: start, address, kind, length
    pub const HEADER_SIZE: usize = 9;

    /// Trailing checksum size
    pub const CHECKSUM_SIZE: usize = 2;

    /// Smallest possible frame (empty payload)
    pub const MIN_SIZE: usize = Self::HEADER_SIZE + Self::CHECKSUM_SIZE;

    /// Maximum payload size the length field can describe
    pub const MAX_PAYLOAD_SIZE: usize = u16::MAX as usize - Self::CHECKSUM_SIZE;

    /// Create a packet with payload
    ///
    /// # Examples
    ///
    /// ```
    /// use zfm20_core::{Packet, PacketKind};
    ///
    /// let packet = Packet::with_payload(PacketKind::Data, 0xFFFF_FFFF, vec![1, 2, 3, 4]);
    /// assert_eq!(packet.payload.len(), 4);
    /// ```
    pub fn with_payload(kind: PacketKind, address: u32, payload: impl Into<Bytes>) -> Self {
        Self {
            address,
            kind,
            payload: payload.into(),
        }
    }

    /// Create a command packet: instruction code followed by its parameters
    pub fn command(address: u32, command: Command, params: &[u8]) -> Self {
        let mut payload = BytesMut::with_capacity(1 + params.len());
        payload.put_u8(command.into());
        payload.put_slice(params);

        Self::with_payload(PacketKind::Command, address, payload.freeze())
    }

    /// Value of the length field (payload plus checksum)
    pub fn length(&self) -> usize {
        self.payload.len() + Self::CHECKSUM_SIZE
    }

    /// Calculate checksum for this packet
    pub fn checksum(&self) -> u16 {
        checksum::calculate(self.kind.into(), self.length() as u16, &self.payload)
    }

    /// First payload byte, which carries the confirmation code in ACK packets
    pub fn confirmation_code(&self) -> Option<u8> {
        self.payload.first().copied()
    }

    /// Encode packet to bytes
    ///
    /// # Errors
    ///
    /// Returns [`Error::PayloadTooLarge`] if the payload does not fit the
    /// length field.
    ///
    /// # Examples
    ///
    /// ```
    /// use zfm20_core::{Command, Packet};
    ///
    /// let packet = Packet::command(0xFFFF_FFFF, Command::GenImage, &[]);
    /// let bytes = packet.encode().unwrap();
    /// assert_eq!(bytes.len(), 12);
    /// ```
    pub fn encode(&self) -> Result<BytesMut> {
        if self.payload.len() > Self::MAX_PAYLOAD_SIZE {
            return Err(Error::PayloadTooLarge {
                size: self.payload.len(),
                max: Self::MAX_PAYLOAD_SIZE,
            });
        }

        let mut buf = BytesMut::with_capacity(self.size());

        buf.put_u16(START_CODE);
        buf.put_u32(self.address);
        buf.put_u8(self.kind.into());
        buf.put_u16(self.length() as u16);
        buf.put_slice(&self.payload);
        buf.put_u16(self.checksum());

        Ok(buf)
    }

    /// Decode a complete frame
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Buffer is shorter than an empty frame
    /// - Start marker is wrong
    /// - Packet kind is unknown
    /// - Length field disagrees with the buffer size
    /// - Checksum verification fails
    pub fn decode(mut buf: BytesMut) -> Result<Self> {
        if buf.len() < Self::MIN_SIZE {
            return Err(Error::PacketTooShort {
                expected: Self::MIN_SIZE,
                actual: buf.len(),
            });
        }

        let total = buf.len();

        let start = buf.get_u16();
        if start != START_CODE {
            return Err(Error::InvalidStartCode { received: start });
        }

        let address = buf.get_u32();
        let kind = PacketKind::try_from(buf.get_u8())?;
        let length = buf.get_u16() as usize;

        if length < Self::CHECKSUM_SIZE || length != buf.remaining() {
            return Err(Error::LengthMismatch {
                declared: Self::HEADER_SIZE + length,
                actual: total,
            });
        }

        let payload = buf.split_to(length - Self::CHECKSUM_SIZE).freeze();
        let checksum_received = buf.get_u16();

        let packet = Self {
            address,
            kind,
            payload,
        };

        let checksum_calculated = packet.checksum();
        if checksum_calculated != checksum_received {
            return Err(Error::ChecksumMismatch {
                expected: checksum_calculated,
                received: checksum_received,
            });
        }

        Ok(packet)
    }

    /// Check only the start marker and kind byte of a raw frame
    ///
    /// This is the validation applied to replies by default; it does not look
    /// at the length field or the checksum.
    pub fn check_header(frame: &[u8], expected: PacketKind) -> Result<()> {
        if frame.len() < Self::HEADER_SIZE {
            return Err(Error::PacketTooShort {
                expected: Self::HEADER_SIZE,
                actual: frame.len(),
            });
        }

        let start = u16::from_be_bytes([frame[0], frame[1]]);
        if start != START_CODE {
            return Err(Error::InvalidStartCode { received: start });
        }

        if frame[6] != u8::from(expected) {
            return Err(Error::UnexpectedPacketKind {
                expected: expected.into(),
                actual: frame[6],
            });
        }

        Ok(())
    }

    /// Get total frame size
    pub fn size(&self) -> usize {
        Self::HEADER_SIZE + self.length()
    }
}

impl fmt::Debug for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Packet")
            .field("address", &format!("0x{:08X}", self.address))
            .field("kind", &self.kind)
            .field("checksum", &format!("0x{:04X}", self.checksum()))
            .field("payload", &hex::encode(&self.payload))
            .finish()
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Packet[{:?}](address=0x{:08X}, len={})",
            self.kind,
            self.address,
            self.payload.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_verify_password_frame() {
        let packet = Packet::command(0xFFFF_FFFF, Command::VerifyPassword, &0u32.to_be_bytes());
        let encoded = packet.encode().unwrap();

        assert_eq!(
            encoded.as_ref(),
            &[
                0xEF, 0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0x01, 0x00, 0x07, 0x13, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x1B
            ]
        );
    }

    #[test]
    fn test_packet_command() {
        let packet = Packet::command(0x1234_5678, Command::Store, &[0x01, 0x00, 0x2A]);

        assert_eq!(packet.kind, PacketKind::Command);
        assert_eq!(packet.payload.as_ref(), &[0x06, 0x01, 0x00, 0x2A]);
        assert_eq!(packet.length(), 6);
        assert_eq!(packet.size(), 15);
    }

    #[test]
    fn test_address_is_big_endian() {
        let encoded = Packet::command(0x0A0B_0C0D, Command::GenImage, &[])
            .encode()
            .unwrap();

        assert_eq!(&encoded[2..6], &[0x0A, 0x0B, 0x0C, 0x0D]);
    }

    #[test]
    fn test_packet_encode_decode() {
        let original = Packet::with_payload(PacketKind::Ack, 0xFFFF_FFFF, vec![0x00, 0x00, 0x05]);

        let decoded = Packet::decode(original.encode().unwrap()).unwrap();

        assert_eq!(original, decoded);
        assert_eq!(decoded.confirmation_code(), Some(0x00));
    }

    #[test]
    fn test_packet_checksum_verification() {
        let packet = Packet::command(0xFFFF_FFFF, Command::GenImage, &[]);
        let mut encoded = packet.encode().unwrap();

        let last = encoded.len() - 1;
        encoded[last] ^= 0xFF;

        match Packet::decode(encoded) {
            Err(Error::ChecksumMismatch { expected, received }) => assert_ne!(expected, received),
            other => panic!("Expected ChecksumMismatch error, got {:?}", other),
        }
    }

    #[test]
    fn test_packet_bad_start_code() {
        let mut encoded = Packet::command(0xFFFF_FFFF, Command::GenImage, &[])
            .encode()
            .unwrap();
        encoded[0] = 0xEE;

        assert!(matches!(
            Packet::decode(encoded),
            Err(Error::InvalidStartCode { received: 0xEE01 })
        ));
    }

    #[test]
    fn test_packet_unknown_kind() {
        let mut encoded = Packet::command(0xFFFF_FFFF, Command::GenImage, &[])
            .encode()
            .unwrap();
        encoded[6] = 0x05;

        assert!(matches!(
            Packet::decode(encoded),
            Err(Error::UnknownPacketKind(0x05))
        ));
    }

    #[test]
    fn test_packet_length_mismatch() {
        let mut encoded = Packet::command(0xFFFF_FFFF, Command::GenImage, &[])
            .encode()
            .unwrap();
        encoded.put_u8(0x00);

        assert!(matches!(
            Packet::decode(encoded),
            Err(Error::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_packet_too_short() {
        let buf = BytesMut::from(&[0xEF, 0x01, 0xFF][..]);

        assert!(matches!(
            Packet::decode(buf),
            Err(Error::PacketTooShort { .. })
        ));
    }

    #[test]
    fn test_packet_payload_too_large() {
        let packet = Packet::with_payload(
            PacketKind::Data,
            0,
            vec![0u8; Packet::MAX_PAYLOAD_SIZE + 1],
        );

        assert!(matches!(
            packet.encode(),
            Err(Error::PayloadTooLarge { .. })
        ));
    }

    #[test]
    fn test_check_header() {
        let ack = [0xEF, 0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0x07, 0x00, 0x03, 0x00, 0x00, 0x0A];
        assert!(Packet::check_header(&ack, PacketKind::Ack).is_ok());

        let mut wrong_kind = ack;
        wrong_kind[6] = 0x01;
        assert!(matches!(
            Packet::check_header(&wrong_kind, PacketKind::Ack),
            Err(Error::UnexpectedPacketKind { expected: 0x07, actual: 0x01 })
        ));

        let mut wrong_start = ack;
        wrong_start[1] = 0x02;
        assert!(matches!(
            Packet::check_header(&wrong_start, PacketKind::Ack),
            Err(Error::InvalidStartCode { received: 0xEF02 })
        ));
    }

    #[test]
    fn test_check_header_ignores_checksum() {
        let ack = [0xEF, 0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0x07, 0x00, 0x03, 0x00, 0xDE, 0xAD];
        assert!(Packet::check_header(&ack, PacketKind::Ack).is_ok());
    }

    fn packet_kind() -> impl Strategy<Value = PacketKind> {
        prop_oneof![
            Just(PacketKind::Command),
            Just(PacketKind::Data),
            Just(PacketKind::Ack),
            Just(PacketKind::EndData),
        ]
    }

    proptest! {
        #[test]
        fn prop_encoded_checksum_is_byte_sum(
            kind in packet_kind(),
            address in any::<u32>(),
            payload in proptest::collection::vec(any::<u8>(), 0..250),
        ) {
            let encoded = Packet::with_payload(kind, address, payload.clone()).encode().unwrap();

            let length = (payload.len() + 2) as u16;
            let [len_hi, len_lo] = length.to_be_bytes();
            let header_sum = u32::from(u8::from(kind)) + u32::from(len_hi) + u32::from(len_lo);
            let expected = payload
                .iter()
                .fold(header_sum, |sum, b| sum + u32::from(*b))
                % 0x1_0000;

            let n = encoded.len();
            let received = u16::from_be_bytes([encoded[n - 2], encoded[n - 1]]);
            prop_assert_eq!(u32::from(received), expected);

            let decoded = Packet::decode(encoded).unwrap();
            prop_assert_eq!(decoded.payload.as_ref(), payload.as_slice());
            prop_assert_eq!(decoded.address, address);
        }
    }
}
