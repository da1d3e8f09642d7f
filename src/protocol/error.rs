//! Codec error types

use std::fmt;

use thiserror::Error;

use super::{Command, Direction};

/// Failure to decode a pair of ASCII hex digits
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Digit outside `0-9` / `A-F` (lowercase included)
    #[error("invalid hex digit: {digit:#04x}")]
    InvalidHexDigit {
        /// Offending byte
        digit: u8,
    },
}

/// Hex-encoded field of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HexField {
    /// Slave ID (offsets 1-2)
    SlaveId,
    /// Register address (offsets 4-5)
    Address,
    /// Data byte (offsets 6-7, when present)
    Data,
    /// Trailing checksum
    Checksum,
}

impl fmt::Display for HexField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SlaveId => "slave id",
            Self::Address => "address",
            Self::Data => "data",
            Self::Checksum => "checksum",
        };
        write!(f, "{name}")
    }
}

/// Frame validation errors, reported in the order the checks run
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Fewer characters than the shortest legal frame
    #[error("frame too short: {len} bytes (min 9)")]
    TooShort {
        /// Received length
        len: usize,
    },

    /// First character is neither `$` nor `:`
    #[error("invalid sentinel: {found:#04x}")]
    BadSentinel {
        /// Found first byte
        found: u8,
    },

    /// Last character is not `\n`
    #[error("missing line terminator: last byte {found:#04x}")]
    MissingTerminator {
        /// Found last byte
        found: u8,
    },

    /// Command character is neither `W` nor `R`
    #[error("invalid command: {found:#04x}")]
    BadCommand {
        /// Found command byte
        found: u8,
    },

    /// Length does not match the (sentinel, command) row
    #[error("shape mismatch: {direction} {command} frame cannot be {len} bytes")]
    ShapeMismatch {
        /// Direction from the sentinel
        direction: Direction,
        /// Decoded command
        command: Command,
        /// Received length
        len: usize,
    },

    /// Checksum field disagrees with the payload
    #[error("checksum mismatch: expected {expected:#04x}, got {found:#04x}")]
    ChecksumMismatch {
        /// Checksum computed over the payload
        expected: u8,
        /// Checksum carried by the frame
        found: u8,
    },

    /// A hex field could not be decoded
    #[error("invalid hex in {field} field: {source}")]
    InvalidHexField {
        /// Field that failed
        field: HexField,
        /// Underlying decode error
        #[source]
        source: DecodeError,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ParseError>;
