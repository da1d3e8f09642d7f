//! Additive payload checksum

/// Sum of the payload bytes, wrapping at 256
///
/// The payload is everything between the sentinel and the checksum field:
/// slave ID, command, address and the optional data field.
#[must_use]
pub fn checksum(payload: &[u8]) -> u8 {
    payload.iter().fold(0u8, |sum, &byte| sum.wrapping_add(byte))
}
