//! Uppercase ASCII hex conversion for single bytes

use super::DecodeError;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Encode a byte as two uppercase hex digits, high nibble first
#[must_use]
pub const fn byte_to_hex(value: u8) -> [u8; 2] {
    [
        HEX_DIGITS[(value >> 4) as usize],
        HEX_DIGITS[(value & 0x0F) as usize],
    ]
}

/// Decode two uppercase hex digits into a byte
///
/// # Errors
///
/// Returns [`DecodeError::InvalidHexDigit`] for anything outside `0-9` and
/// `A-F`. Lowercase digits are rejected.
pub const fn hex_to_byte(hi: u8, lo: u8) -> Result<u8, DecodeError> {
    let hi = match nibble(hi) {
        Ok(value) => value,
        Err(err) => return Err(err),
    };
    let lo = match nibble(lo) {
        Ok(value) => value,
        Err(err) => return Err(err),
    };
    Ok((hi << 4) | lo)
}

const fn nibble(digit: u8) -> Result<u8, DecodeError> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        _ => Err(DecodeError::InvalidHexDigit { digit }),
    }
}
