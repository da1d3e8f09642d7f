//! Frame codec
//!
//! This module provides the wire format, message types, hex and checksum
//! helpers, and the build/parse codec.

pub(crate) mod checksum;
mod codec;
mod error;
mod frame;
pub(crate) mod hex;
mod message;
mod types;

pub use checksum::checksum;
pub use codec::{build, parse, parse_with_direction};
pub use error::{DecodeError, HexField, ParseError, Result};
pub use frame::Frame;
pub use hex::{byte_to_hex, hex_to_byte};
pub use message::ProtocolMessage;
pub use types::{Command, Direction};

/// Sentinel opening a request (master to slave)
pub const REQUEST_SENTINEL: u8 = b'$';

/// Sentinel opening a response (slave to master)
pub const RESPONSE_SENTINEL: u8 = b':';

/// Frame terminator
pub const TERMINATOR: u8 = b'\n';

/// Shortest legal frame: read request or write ack
pub const MIN_FRAME_LEN: usize = 9;

/// Longest legal frame: write request or read response
pub const MAX_FRAME_LEN: usize = 11;

/// Checksum field width in hex characters
pub const CHECKSUM_LEN: usize = 2;

const SLAVE_ID_OFFSET: usize = 1;
const COMMAND_OFFSET: usize = 3;
const ADDRESS_OFFSET: usize = 4;
const DATA_OFFSET: usize = 6;
