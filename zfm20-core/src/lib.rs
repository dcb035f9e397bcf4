//! # zfm20-core
//!
//! Core protocol implementation for ZFM20 family fingerprint modules.
//!
//! This crate provides the low-level protocol primitives:
//! - Packet structure and encoding/decoding
//! - Checksum calculation
//! - Instruction codes
//! - Module identity (address and password)
//! - Protocol constants

pub mod checksum;
pub mod command;
pub mod constants;
pub mod error;
pub mod identity;
pub mod packet;

pub use command::Command;
pub use error::{Error, Result};
pub use identity::DeviceIdentity;
pub use packet::{Packet, PacketKind};
