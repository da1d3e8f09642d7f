//! Frame codec (build/parse)
//!
//! # Format
//!
//! ```text
//! <sentinel> <slave id:2> <command:1> <address:2> [<data:2>] <checksum:2> \n
//! ```
//!
//! All numeric fields are uppercase ASCII hex. The checksum covers the bytes
//! between the sentinel and the checksum field.

use tracing::trace;

use super::{
    ADDRESS_OFFSET, CHECKSUM_LEN, COMMAND_OFFSET, Command, DATA_OFFSET, Direction, Frame, HexField,
    MIN_FRAME_LEN, ParseError, ProtocolMessage, Result, SLAVE_ID_OFFSET, TERMINATOR,
    checksum::checksum,
    frame::FrameBuf,
    hex::hex_to_byte,
};

/// Build a frame from a message
///
/// Never fails: any message produces a well-formed frame. The data byte is
/// emitted only when `direction` and the command call for it.
#[must_use]
pub fn build(message: &ProtocolMessage, direction: Direction) -> Frame {
    let mut buf = FrameBuf::new();

    buf.push(direction.sentinel());
    buf.push_hex(message.slave_id);
    buf.push(message.command.as_u8());
    buf.push_hex(message.address);
    if direction.carries_data(message.command) {
        buf.push_hex(message.data);
    }

    // Everything after the sentinel
    let sum = checksum(buf.tail(1));
    buf.push_hex(sum);
    buf.push(TERMINATOR);

    let frame = buf.finish();
    trace!(%direction, command = %message.command, frame = frame.as_str().trim_end(), "built frame");
    frame
}

/// Parse and validate a frame
///
/// # Errors
///
/// Checks run in this order and the first failure wins:
/// - [`ParseError::TooShort`] below 9 bytes
/// - [`ParseError::BadSentinel`] when the first byte is not `$` or `:`
/// - [`ParseError::MissingTerminator`] when the last byte is not `\n`
/// - [`ParseError::BadCommand`] when offset 3 is not `W` or `R`
/// - [`ParseError::ShapeMismatch`] when the length does not fit the direction and command
/// - [`ParseError::ChecksumMismatch`] when the payload sum disagrees with the checksum field
/// - [`ParseError::InvalidHexField`] when any hex field holds a non-uppercase-hex digit
pub fn parse(frame: impl AsRef<[u8]>) -> Result<ProtocolMessage> {
    parse_with_direction(frame).map(|(_, message)| message)
}

/// Parse and validate a frame, also returning the direction its sentinel encodes
///
/// Runs exactly the checks of [`parse`].
pub fn parse_with_direction(frame: impl AsRef<[u8]>) -> Result<(Direction, ProtocolMessage)> {
    let buf = frame.as_ref();
    let len = buf.len();

    if len < MIN_FRAME_LEN {
        return Err(ParseError::TooShort { len });
    }

    let direction =
        Direction::from_sentinel(buf[0]).ok_or(ParseError::BadSentinel { found: buf[0] })?;

    let last = buf[len - 1];
    if last != TERMINATOR {
        return Err(ParseError::MissingTerminator { found: last });
    }

    let command = Command::from_u8(buf[COMMAND_OFFSET]).ok_or(ParseError::BadCommand {
        found: buf[COMMAND_OFFSET],
    })?;

    if len != direction.frame_len(command) {
        return Err(ParseError::ShapeMismatch {
            direction,
            command,
            len,
        });
    }

    let has_data = direction.carries_data(command);
    // Payload runs from offset 1 up to the checksum field
    let payload_end = len - CHECKSUM_LEN - 1;

    let expected = checksum(&buf[1..payload_end]);
    let found = decode_field(buf, payload_end, HexField::Checksum)?;
    if expected != found {
        return Err(ParseError::ChecksumMismatch { expected, found });
    }

    let slave_id = decode_field(buf, SLAVE_ID_OFFSET, HexField::SlaveId)?;
    let address = decode_field(buf, ADDRESS_OFFSET, HexField::Address)?;
    let data = if has_data {
        decode_field(buf, DATA_OFFSET, HexField::Data)?
    } else {
        0
    };

    trace!(%direction, %command, slave_id, address, data, "parsed frame");
    Ok((
        direction,
        ProtocolMessage::new(slave_id, command, address, data),
    ))
}

fn decode_field(buf: &[u8], offset: usize, field: HexField) -> Result<u8> {
    hex_to_byte(buf[offset], buf[offset + 1])
        .map_err(|source| ParseError::InvalidHexField { field, source })
}
