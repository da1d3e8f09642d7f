//! Command and direction vocabulary

use std::fmt;

use super::{MAX_FRAME_LEN, MIN_FRAME_LEN, REQUEST_SENTINEL, RESPONSE_SENTINEL};

/// Register operation carried by a frame
///
/// The discriminant is the ASCII command character on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Command {
    /// Store a byte into a register (`W`)
    Write = b'W',
    /// Fetch a byte from a register (`R`)
    Read = b'R',
}

impl Command {
    /// Convert from the wire character
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            b'W' => Some(Self::Write),
            b'R' => Some(Self::Read),
            _ => None,
        }
    }

    /// Convert to the wire character
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Write => "WRITE",
            Self::Read => "READ",
        };
        write!(f, "{name}")
    }
}

/// Which way a frame travels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Master to slave, sentinel `$`
    Request,
    /// Slave to master, sentinel `:`
    Response,
}

impl Direction {
    /// Sentinel character opening a frame in this direction
    #[must_use]
    pub const fn sentinel(self) -> u8 {
        match self {
            Self::Request => REQUEST_SENTINEL,
            Self::Response => RESPONSE_SENTINEL,
        }
    }

    /// Recover the direction from a sentinel character
    #[must_use]
    pub const fn from_sentinel(value: u8) -> Option<Self> {
        match value {
            REQUEST_SENTINEL => Some(Self::Request),
            RESPONSE_SENTINEL => Some(Self::Response),
            _ => None,
        }
    }

    /// Whether a frame with this direction and command carries a data field
    ///
    /// | direction | command | data |
    /// |-----------|---------|------|
    /// | Request   | Write   | yes  |
    /// | Request   | Read    | no   |
    /// | Response  | Write   | no   |
    /// | Response  | Read    | yes  |
    #[must_use]
    pub const fn carries_data(self, command: Command) -> bool {
        matches!(
            (self, command),
            (Self::Request, Command::Write) | (Self::Response, Command::Read)
        )
    }

    /// Exact frame length, terminator included
    #[must_use]
    pub const fn frame_len(self, command: Command) -> usize {
        if self.carries_data(command) {
            MAX_FRAME_LEN
        } else {
            MIN_FRAME_LEN
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Request => "request",
            Self::Response => "response",
        };
        write!(f, "{name}")
    }
}
