//! Master side: issue requests and validate the replies.

use std::io::Write;

use tracing::{debug, instrument, warn};

use super::{MasterError, Result, SessionStats};
use crate::protocol::{self, Direction, Frame, ProtocolMessage};

/// Issues register requests over a link and checks replies against them.
///
/// Only one request is tracked at a time. The outstanding slave ID starts at
/// `0x00` and is replaced by every request successfully written to the link;
/// a request that fails with [`MasterError::Link`] leaves it untouched.
/// Accepting a response does not clear it.
#[derive(Debug)]
pub struct MasterSession<W> {
    link: W,
    expected: u8,
    stats: SessionStats,
}

impl<W: Write> MasterSession<W> {
    /// Create a session writing requests to `link`
    #[must_use]
    pub fn new(link: W) -> Self {
        Self {
            link,
            expected: 0x00,
            stats: SessionStats::new(),
        }
    }

    /// Ask `slave_id` to store `data` at `address`
    ///
    /// Returns the frame that was written to the link.
    pub fn send_write(&mut self, slave_id: u8, address: u8, data: u8) -> Result<Frame> {
        self.send(ProtocolMessage::write(slave_id, address, data))
    }

    /// Ask `slave_id` for the value at `address`
    ///
    /// Returns the frame that was written to the link.
    pub fn send_read(&mut self, slave_id: u8, address: u8) -> Result<Frame> {
        self.send(ProtocolMessage::read(slave_id, address))
    }

    fn send(&mut self, message: ProtocolMessage) -> Result<Frame> {
        let frame = message.build(Direction::Request);

        self.link.write_all(frame.as_bytes())?;
        self.link.flush()?;
        self.expected = message.slave_id;
        self.stats.record_sent();

        debug!(
            command = %message.command,
            slave_id = message.slave_id,
            address = message.address,
            frame = frame.as_str().trim_end(),
            "sent request"
        );
        Ok(frame)
    }

    /// Validate a frame as the reply to the outstanding request
    ///
    /// # Errors
    ///
    /// - [`MasterError::Malformed`] if the codec rejects the frame
    /// - [`MasterError::UnexpectedSlave`] if it comes from another slave
    /// - [`MasterError::NotAResponse`] if it carries the request sentinel
    #[instrument(level = "debug", skip(self, frame), fields(expected = self.expected))]
    pub fn receive(&mut self, frame: impl AsRef<[u8]>) -> Result<ProtocolMessage> {
        let raw = frame.as_ref();
        let outcome = self.validate(raw);

        match &outcome {
            Ok(message) => {
                self.stats.record_accepted();
                debug!(
                    command = %message.command,
                    slave_id = message.slave_id,
                    address = message.address,
                    data = message.data,
                    "accepted response"
                );
            }
            Err(err) => {
                self.stats.record_rejected();
                warn!(error = %err, frame = %String::from_utf8_lossy(raw).trim_end(), "rejected frame");
            }
        }
        outcome
    }

    fn validate(&self, raw: &[u8]) -> Result<ProtocolMessage> {
        let (direction, message) = protocol::parse_with_direction(raw)?;

        if message.slave_id != self.expected {
            return Err(MasterError::UnexpectedSlave {
                got: message.slave_id,
                expected: self.expected,
            });
        }

        if direction != Direction::Response {
            return Err(MasterError::NotAResponse);
        }

        Ok(message)
    }

    /// Slave ID the next response must come from
    #[must_use]
    pub const fn expected_slave(&self) -> u8 {
        self.expected
    }

    /// Frame counters
    #[must_use]
    pub const fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Borrow the link
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.link
    }

    /// Mutably borrow the link
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.link
    }

    /// Consume the session, returning the link
    pub fn into_inner(self) -> W {
        self.link
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Command, ParseError};
    use std::io;

    fn master() -> MasterSession<Vec<u8>> {
        MasterSession::new(Vec::new())
    }

    #[test]
    fn test_send_write_emits_frame() {
        let mut master = master();
        let frame = master.send_write(0x01, 0x10, 0xAA).unwrap();

        assert_eq!(frame.as_str(), "$01W10AA9B\n");
        assert_eq!(master.get_ref().as_slice(), b"$01W10AA9B\n");
        assert_eq!(master.expected_slave(), 0x01);
        assert_eq!(master.stats().frames_sent, 1);
    }

    #[test]
    fn test_send_read_emits_frame() {
        let mut master = master();
        master.send_write(0x01, 0x10, 0xAA).unwrap();
        let frame = master.send_read(0x02, 0x10).unwrap();

        assert_eq!(frame.as_str(), "$02R1015\n");
        assert_eq!(master.into_inner(), b"$01W10AA9B\n$02R1015\n".to_vec());
    }

    #[test]
    fn test_marker_tracks_latest_request() {
        let mut master = master();
        assert_eq!(master.expected_slave(), 0x00);

        master.send_read(0x05, 0x00).unwrap();
        master.send_read(0x07, 0x00).unwrap();
        assert_eq!(master.expected_slave(), 0x07);
    }

    #[test]
    fn test_receive_ack() {
        let mut master = master();
        master.send_write(0x01, 0x10, 0xAA).unwrap();

        let msg = master.receive(":01W1019\n").unwrap();
        assert_eq!(msg, ProtocolMessage::new(0x01, Command::Write, 0x10, 0));
        assert_eq!(master.stats().frames_accepted, 1);
    }

    #[test]
    fn test_receive_read_value() {
        let mut master = master();
        master.send_read(0x01, 0x10).unwrap();

        let msg = master.receive(":01R100074\n").unwrap();
        assert_eq!(msg.command, Command::Read);
        assert_eq!(msg.data, 0x00);
    }

    #[test]
    fn test_receive_unexpected_slave() {
        let mut master = master();
        master.send_write(0x01, 0x10, 0xAA).unwrap();

        let err = master.receive(":02W101A\n").unwrap_err();
        assert!(matches!(
            err,
            MasterError::UnexpectedSlave {
                got: 0x02,
                expected: 0x01
            }
        ));
        assert_eq!(master.stats().frames_rejected, 1);
    }

    #[test]
    fn test_receive_request_rejected() {
        let mut master = master();
        master.send_write(0x01, 0x10, 0xAA).unwrap();

        // Our own request echoed back
        let err = master.receive("$01W10AA9B\n").unwrap_err();
        assert!(matches!(err, MasterError::NotAResponse));
    }

    #[test]
    fn test_slave_checked_before_direction() {
        let mut master = master();
        master.send_read(0x01, 0x10).unwrap();

        let err = master.receive("$02R1015\n").unwrap_err();
        assert!(matches!(err, MasterError::UnexpectedSlave { .. }));
    }

    #[test]
    fn test_receive_malformed() {
        let mut master = master();
        master.send_write(0x01, 0x10, 0xAA).unwrap();

        let err = master.receive(":01W100C\n").unwrap_err();
        assert!(matches!(
            err,
            MasterError::Malformed(ParseError::ChecksumMismatch {
                expected: 0x19,
                found: 0x0C
            })
        ));
    }

    #[test]
    fn test_marker_not_cleared_after_response() {
        let mut master = master();
        master.send_write(0x01, 0x10, 0xAA).unwrap();

        assert!(master.receive(":01W1019\n").is_ok());
        // A second, unsolicited reply from the same slave still passes
        assert!(master.receive(":01W1019\n").is_ok());
        assert_eq!(master.stats().frames_accepted, 2);
    }

    #[test]
    fn test_continues_after_rejection() {
        let mut master = master();
        master.send_read(0x01, 0x10).unwrap();

        assert!(master.receive("noise\n").is_err());
        assert!(master.receive(":01R100074\n").is_ok());
    }

    struct BrokenLink;

    impl Write for BrokenLink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "link down"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_link_failure_reported() {
        let mut master = MasterSession::new(BrokenLink);

        let err = master.send_read(0x01, 0x10).unwrap_err();
        assert!(matches!(err, MasterError::Link(_)));
        assert_eq!(master.stats().frames_sent, 0);
        assert_eq!(master.expected_slave(), 0x00);
    }

    /// Accepts a fixed number of writes, then fails.
    struct FlakyLink {
        remaining: usize,
    }

    impl Write for FlakyLink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "link down"));
            }
            self.remaining -= 1;
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_send_keeps_previous_marker() {
        let mut master = MasterSession::new(FlakyLink { remaining: 1 });
        master.send_read(0x01, 0x10).unwrap();

        assert!(matches!(
            master.send_read(0x02, 0x10),
            Err(MasterError::Link(_))
        ));
        assert_eq!(master.expected_slave(), 0x01);
        // The reply to the request that did go out is still accepted
        assert!(master.receive(":01R100074\n").is_ok());
    }
}
