//! ZFM20 instruction codes

use std::fmt;

/// Instruction codes carried in the first payload byte of a command packet
///
/// Only the instructions this crate issues are listed. Names follow the
/// datasheet.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    /// Capture a finger image into the image buffer
    GenImage = 0x01,

    /// Extract features from the image buffer into a character buffer
    Img2Tz = 0x02,

    /// Compare the two character buffers
    Match = 0x03,

    /// Search the library with a character buffer
    Search = 0x04,

    /// Combine both character buffers into a template
    RegModel = 0x05,

    /// Store a character buffer into the library
    Store = 0x06,

    /// Load a library template into a character buffer
    LoadChar = 0x07,

    /// Delete templates from the library
    DeleteChar = 0x0C,

    /// Erase the whole library
    Empty = 0x0D,

    /// Read the system parameter block
    ReadSysPara = 0x0F,

    /// Change the module password
    SetPassword = 0x12,

    /// Handshake with the module password
    VerifyPassword = 0x13,

    /// Change the module address
    SetAddress = 0x15,

    /// Count the stored templates
    TemplateCount = 0x1D,
}

impl Command {
    /// Total length in bytes of the ACK frame the module sends back
    pub fn response_len(self) -> usize {
        match self {
            Self::ReadSysPara => 28,
            Self::Search => 16,
            Self::Match | Self::TemplateCount => 14,
            _ => 12,
        }
    }

    /// Get command name
    pub fn name(self) -> &'static str {
        match self {
            Self::GenImage => "GenImg",
            Self::Img2Tz => "Img2Tz",
            Self::Match => "Match",
            Self::Search => "Search",
            Self::RegModel => "RegModel",
            Self::Store => "Store",
            Self::LoadChar => "LoadChar",
            Self::DeleteChar => "DeletChar",
            Self::Empty => "Empty",
            Self::ReadSysPara => "ReadSysPara",
            Self::SetPassword => "SetPwd",
            Self::VerifyPassword => "VfyPwd",
            Self::SetAddress => "SetAdder",
            Self::TemplateCount => "TempleteNum",
        }
    }
}

impl From<Command> for u8 {
    fn from(cmd: Command) -> u8 {
        cmd as u8
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02X})", self.name(), *self as u8)
    }
}
