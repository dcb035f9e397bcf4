//! # zfm20
//!
//! Rust driver for ZFM20 family UART fingerprint modules (also R502, R503
//! and AS608 compatible parts).
//!
//! ## Features
//!
//! - Type-safe packet framing and checksums
//! - Async/await API using Tokio
//! - Bounded response waits with a configurable timeout
//! - Enrollment, search and library management
//!
//! ## Quick Start
//!
//! ```no_run
//! use zfm20::FingerprintLink;
//!
//! #[tokio::main]
//! async fn main() -> zfm20::Result<()> {
//!     // Open the module's serial port
//!     let mut link = FingerprintLink::open("/dev/ttyUSB0", 57_600)?;
//!
//!     // Handshake
//!     link.verify_password().await?;
//!
//!     // Query the library
//!     let count = link.template_count().await?;
//!     println!("{} templates stored", count);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod link;
mod reply;

// Re-exports
pub use config::LinkConfig;
pub use error::{Error, Result};
pub use link::FingerprintLink;

// Re-export protocol and transport types
pub use zfm20_core::{Command, DeviceIdentity, Packet, PacketKind};
pub use zfm20_transport::{SerialTransport, Transport};
pub use zfm20_types::{ConfirmationCode, MatchResult, SearchResult, StatusFlags, SystemParameters};
