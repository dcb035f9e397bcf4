//! Module identity
//!
//! The address is written into every outgoing frame and the password is
//! presented once per session with `VfyPwd`. Both live in the module's flash
//! and can be changed with `SetAdder` / `SetPwd`, after which the host copy
//! must follow.

use std::fmt;

use crate::constants::{DEFAULT_ADDRESS, DEFAULT_PASSWORD};

/// Address and password of a fingerprint module
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DeviceIdentity {
    address: u32,
    password: u32,
}

impl DeviceIdentity {
    /// Create an identity from an explicit address and password
    pub fn new(address: u32, password: u32) -> Self {
        Self { address, password }
    }

    /// Module address
    pub fn address(&self) -> u32 {
        self.address
    }

    /// Module password
    pub fn password(&self) -> u32 {
        self.password
    }

    /// Record a new address. Only call once the module has accepted it.
    pub fn set_address(&mut self, address: u32) {
        self.address = address;
    }

    /// Record a new password. Only call once the module has accepted it.
    pub fn set_password(&mut self, password: u32) {
        self.password = password;
    }
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS, DEFAULT_PASSWORD)
    }
}

// Keeps the password out of logs.
impl fmt::Debug for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceIdentity")
            .field("address", &format!("0x{:08X}", self.address))
            .field("password", &"****")
            .finish()
    }
}
