//! Transport layer for the ZFM20 protocol
//!
//! Provides the byte transport a fingerprint link talks through.

pub mod error;
pub mod serial;

pub use error::{Error, Result};
pub use serial::SerialTransport;

use std::time::Duration;

use async_trait::async_trait;

/// Byte transport to a fingerprint module
///
/// The link owns its transport exclusively and issues one call at a time.
#[async_trait]
pub trait Transport: Send {
    /// Set up the transport for the given baud rate
    fn configure(&mut self, baud_rate: u32) -> Result<()>;

    /// Drop any bytes already received, returning how many were dropped
    fn discard_input(&mut self) -> Result<usize>;

    /// Write bytes, returning how many were accepted
    async fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Wait up to `wait` for at least one byte to become readable
    async fn data_available(&mut self, wait: Duration) -> Result<bool>;

    /// Read up to `buf.len()` bytes, returning how many were read
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Human readable transport name
    fn name(&self) -> String;
}
