//! Protocol constants

/// Packet start marker, transmitted high byte first
pub const START_CODE: u16 = 0xEF01;

/// Default module address
pub const DEFAULT_ADDRESS: u32 = 0xFFFF_FFFF;

/// Default module password
pub const DEFAULT_PASSWORD: u32 = 0x0000_0000;

/// Default UART baud rate
pub const DEFAULT_BAUD_RATE: u32 = 57_600;

/// Maximum time to wait for a complete reply (milliseconds)
pub const DEFAULT_RESPONSE_TIMEOUT_MS: u64 = 5_000;

/// Wait per availability poll while collecting a reply (milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Offset of the confirmation code in every reply frame
pub const CONFIRMATION_CODE_OFFSET: usize = 9;

/// Template library search range used by `Search`
pub mod search {
    /// First page searched
    pub const START_PAGE: u16 = 0x0000;

    /// Number of pages searched
    pub const PAGE_COUNT: u16 = 0x00A3;
}

/// Character buffers available on the module
pub mod slots {
    /// First character buffer
    pub const FIRST: u8 = 1;

    /// Second character buffer
    pub const SECOND: u8 = 2;

    /// Returns true for a valid character buffer id
    pub fn is_valid(slot: u8) -> bool {
        slot == FIRST || slot == SECOND
    }
}
