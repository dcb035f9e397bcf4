//! ZFM20 packet checksum
//!
//! The checksum is the plain byte sum of the packet kind, both length bytes
//! and every payload byte, truncated to 16 bits. The start marker and the
//! address are not covered.

use tracing::trace;

/// Calculate the checksum for a packet
///
/// # Algorithm
///
/// ```text
/// sum = kind + len_hi + len_lo + payload[0] + ... + payload[n-1]
/// checksum = sum mod 0x10000
/// ```
///
/// `length` is the value carried in the length field (payload + 2).
///
/// # Examples
///
/// ```
/// use zfm20_core::checksum;
///
/// // VfyPwd with password 0
/// let checksum = checksum::calculate(0x01, 7, &[0x13, 0, 0, 0, 0]);
/// assert_eq!(checksum, 0x001B);
/// ```
pub fn calculate(kind: u8, length: u16, payload: &[u8]) -> u16 {
    let [len_hi, len_lo] = length.to_be_bytes();

    let checksum = [kind, len_hi, len_lo]
        .iter()
        .chain(payload)
        .fold(0u16, |sum, byte| sum.wrapping_add(u16::from(*byte)));

    trace!(
        kind = kind,
        length = length,
        payload_len = payload.len(),
        checksum = format!("0x{:04X}", checksum),
        "Calculated checksum"
    );

    checksum
}

/// Verify checksum
pub fn verify(kind: u8, length: u16, payload: &[u8], expected: u16) -> bool {
    calculate(kind, length, payload) == expected
}
