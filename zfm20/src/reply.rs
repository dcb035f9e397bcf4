//! Raw reply frames

use byteorder::{BigEndian, ByteOrder};
use bytes::Bytes;

use zfm20_core::constants::CONFIRMATION_CODE_OFFSET;
use zfm20_types::ConfirmationCode;

/// A validated ACK frame of a known length
///
/// Fields are read at fixed offsets; the link guarantees the frame is as long
/// as the command's reply length before one is built.
#[derive(Debug, Clone)]
pub(crate) struct Reply {
    frame: Bytes,
}

impl Reply {
    pub(crate) fn new(frame: Bytes) -> Self {
        Self { frame }
    }

    /// Confirmation code at byte 9
    pub(crate) fn code(&self) -> ConfirmationCode {
        ConfirmationCode::from(self.frame[CONFIRMATION_CODE_OFFSET])
    }

    /// Big-endian `u16` at a frame offset
    pub(crate) fn u16_at(&self, offset: usize) -> u16 {
        BigEndian::read_u16(&self.frame[offset..offset + 2])
    }

    /// Bytes between two frame offsets
    pub(crate) fn slice(&self, start: usize, end: usize) -> &[u8] {
        &self.frame[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_fields() {
        let reply = Reply::new(Bytes::from_static(&[
            0xEF, 0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0x07, 0x00, 0x05, 0x00, 0x00, 0x05, 0x00, 0x11,
        ]));

        assert_eq!(reply.code(), ConfirmationCode::Ok);
        assert_eq!(reply.u16_at(10), 5);
        assert_eq!(reply.slice(2, 6), &[0xFF; 4]);
    }
}
