//! High-level error types

use zfm20_core::Command;
use zfm20_types::ConfirmationCode;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid packet: {0}")]
    InvalidPacket(#[from] zfm20_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] zfm20_transport::Error),

    #[error("Type error: {0}")]
    Types(#[from] zfm20_types::Error),

    #[error("Timed out waiting for response after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    #[error("Invalid character buffer {0}: must be 1 or 2")]
    InvalidSlot(u8),

    #[error("{command} failed: {code}")]
    Device {
        command: Command,
        code: ConfirmationCode,
    },
}

impl Error {
    /// Confirmation code reported by the module, if this is a device error
    pub fn confirmation_code(&self) -> Option<ConfirmationCode> {
        match self {
            Self::Device { code, .. } => Some(*code),
            _ => None,
        }
    }
}
