//! Error types for zfm20-core

/// Result type alias for packet codec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Packet codec errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Frame is too short to be valid
    #[error("Packet too short: expected at least {expected} bytes, got {actual} bytes")]
    PacketTooShort {
        expected: usize,
        actual: usize,
    },

    /// Frame does not begin with the start marker
    #[error("Invalid start code: expected 0xEF01, received 0x{received:04X}")]
    InvalidStartCode {
        received: u16,
    },

    /// Packet kind byte is not a known kind
    #[error("Unknown packet kind: 0x{0:02X}")]
    UnknownPacketKind(u8),

    /// Packet kind byte is valid but not the one expected here
    #[error("Unexpected packet kind: expected 0x{expected:02X}, got 0x{actual:02X}")]
    UnexpectedPacketKind {
        expected: u8,
        actual: u8,
    },

    /// Length field disagrees with the number of bytes in the frame
    #[error("Length mismatch: header declares {declared} bytes, frame carries {actual} bytes")]
    LengthMismatch {
        declared: usize,
        actual: usize,
    },

    /// Checksum verification failed
    #[error("Checksum mismatch: expected 0x{expected:04X}, received 0x{received:04X}")]
    ChecksumMismatch {
        expected: u16,
        received: u16,
    },

    /// Payload does not fit the 16-bit length field
    #[error("Payload too large: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge {
        size: usize,
        max: usize,
    },
}
