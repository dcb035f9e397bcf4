//! Confirmation codes returned by the module

use std::fmt;

/// Confirmation code found in byte 9 of every ACK frame
///
/// Conversion from `u8` is total: bytes without a datasheet meaning become
/// [`ConfirmationCode::Unknown`] and convert back to the same byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ConfirmationCode {
    /// Command executed
    Ok,
    /// Error receiving the command packet
    PacketRxError,
    /// No finger on the sensor
    NoFinger,
    /// Failed to enroll the finger image
    ImageFailed,
    /// Image too disorderly to extract features
    TooMessy,
    /// Too few feature points in the image
    FewFeatures,
    /// Fingers do not match
    NoMatch,
    /// No matching template in the library
    NotFound,
    /// Character files could not be combined
    EnrollMismatch,
    /// Page id beyond the library
    BadLocation,
    /// Error reading a template from the library
    DbReadError,
    /// Error uploading a template
    UploadFeatureFail,
    /// Module cannot receive the following data packets
    PacketResponseFail,
    /// Error uploading an image
    UploadFail,
    /// Failed to delete the template
    DeleteFail,
    /// Failed to clear the library
    DbClearFail,
    /// Wrong password
    InvalidPassword,
    /// No valid primary image in the buffer
    InvalidImage,
    /// Error writing flash
    FlashError,
    /// Invalid register number
    InvalidRegister,
    /// Address code error
    InvalidAddress,
    /// Password must be verified first
    PasswordVerify,
    /// Byte with no datasheet meaning
    Unknown(u8),
}

impl ConfirmationCode {
    /// True for [`ConfirmationCode::Ok`]
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }

    /// Short description of the code
    pub fn description(self) -> &'static str {
        match self {
            Self::Ok => "command executed",
            Self::PacketRxError => "error receiving packet",
            Self::NoFinger => "no finger on sensor",
            Self::ImageFailed => "failed to capture image",
            Self::TooMessy => "image too messy",
            Self::FewFeatures => "too few feature points",
            Self::NoMatch => "fingers do not match",
            Self::NotFound => "no matching template",
            Self::EnrollMismatch => "failed to combine character files",
            Self::BadLocation => "template id beyond library",
            Self::DbReadError => "error reading template",
            Self::UploadFeatureFail => "error uploading template",
            Self::PacketResponseFail => "cannot receive data packets",
            Self::UploadFail => "error uploading image",
            Self::DeleteFail => "failed to delete template",
            Self::DbClearFail => "failed to clear library",
            Self::InvalidPassword => "wrong password",
            Self::InvalidImage => "no valid primary image",
            Self::FlashError => "error writing flash",
            Self::InvalidRegister => "invalid register number",
            Self::InvalidAddress => "address code error",
            Self::PasswordVerify => "password must be verified",
            Self::Unknown(_) => "unknown code",
        }
    }
}

impl From<u8> for ConfirmationCode {
    fn from(byte: u8) -> Self {
        match byte {
            0x00 => Self::Ok,
            0x01 => Self::PacketRxError,
            0x02 => Self::NoFinger,
            0x03 => Self::ImageFailed,
            0x06 => Self::TooMessy,
            0x07 => Self::FewFeatures,
            0x08 => Self::NoMatch,
            0x09 => Self::NotFound,
            0x0A => Self::EnrollMismatch,
            0x0B => Self::BadLocation,
            0x0C => Self::DbReadError,
            0x0D => Self::UploadFeatureFail,
            0x0E => Self::PacketResponseFail,
            0x0F => Self::UploadFail,
            0x10 => Self::DeleteFail,
            0x11 => Self::DbClearFail,
            0x13 => Self::InvalidPassword,
            0x15 => Self::InvalidImage,
            0x18 => Self::FlashError,
            0x1A => Self::InvalidRegister,
            0x20 => Self::InvalidAddress,
            0x21 => Self::PasswordVerify,
            other => Self::Unknown(other),
        }
    }
}

impl From<ConfirmationCode> for u8 {
    fn from(code: ConfirmationCode) -> u8 {
        match code {
            ConfirmationCode::Ok => 0x00,
            ConfirmationCode::PacketRxError => 0x01,
            ConfirmationCode::NoFinger => 0x02,
            ConfirmationCode::ImageFailed => 0x03,
            ConfirmationCode::TooMessy => 0x06,
            ConfirmationCode::FewFeatures => 0x07,
            ConfirmationCode::NoMatch => 0x08,
            ConfirmationCode::NotFound => 0x09,
            ConfirmationCode::EnrollMismatch => 0x0A,
            ConfirmationCode::BadLocation => 0x0B,
            ConfirmationCode::DbReadError => 0x0C,
            ConfirmationCode::UploadFeatureFail => 0x0D,
            ConfirmationCode::PacketResponseFail => 0x0E,
            ConfirmationCode::UploadFail => 0x0F,
            ConfirmationCode::DeleteFail => 0x10,
            ConfirmationCode::DbClearFail => 0x11,
            ConfirmationCode::InvalidPassword => 0x13,
            ConfirmationCode::InvalidImage => 0x15,
            ConfirmationCode::FlashError => 0x18,
            ConfirmationCode::InvalidRegister => 0x1A,
            ConfirmationCode::InvalidAddress => 0x20,
            ConfirmationCode::PasswordVerify => 0x21,
            ConfirmationCode::Unknown(byte) => byte,
        }
    }
}

impl fmt::Display for ConfirmationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02X})", self.description(), u8::from(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_known_codes() {
        assert_eq!(ConfirmationCode::from(0x00), ConfirmationCode::Ok);
        assert_eq!(ConfirmationCode::from(0x02), ConfirmationCode::NoFinger);
        assert_eq!(ConfirmationCode::from(0x0A), ConfirmationCode::EnrollMismatch);
        assert_eq!(ConfirmationCode::from(0x13), ConfirmationCode::InvalidPassword);
        assert_eq!(ConfirmationCode::from(0x18), ConfirmationCode::FlashError);
        assert_eq!(ConfirmationCode::from(0x20), ConfirmationCode::InvalidAddress);
    }

    #[test]
    fn test_every_byte_converts_back() {
        for byte in 0..=u8::MAX {
            assert_eq!(u8::from(ConfirmationCode::from(byte)), byte);
        }
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(ConfirmationCode::from(0x04), ConfirmationCode::Unknown(0x04));
        assert!(!ConfirmationCode::Unknown(0x04).is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(ConfirmationCode::NoFinger.to_string(), "no finger on sensor(0x02)");
    }
}
