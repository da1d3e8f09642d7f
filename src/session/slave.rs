//! Slave side: apply requests addressed to this slave and build the replies.

use std::io::{BufRead, Read, Write};

use tracing::{debug, instrument, warn};

use super::{SessionStats, SlaveStore};
use crate::protocol::{self, Command, Direction, Frame, ProtocolMessage};

/// One slave identity with its own register bank.
#[derive(Debug, Clone)]
pub struct SlaveSession {
    own_id: u8,
    store: SlaveStore,
    stats: SessionStats,
}

impl SlaveSession {
    /// Create a slave with a zeroed register bank
    #[must_use]
    pub const fn new(own_id: u8) -> Self {
        Self::with_store(own_id, SlaveStore::new())
    }

    /// Create a slave around an existing register bank
    #[must_use]
    pub const fn with_store(own_id: u8, store: SlaveStore) -> Self {
        Self {
            own_id,
            store,
            stats: SessionStats::new(),
        }
    }

    /// Process one frame, returning the reply if one is due
    ///
    /// Malformed frames and frames for other slaves produce no reply.
    #[instrument(level = "debug", skip(self, frame), fields(own_id = self.own_id))]
    pub fn handle(&mut self, frame: impl AsRef<[u8]>) -> Option<Frame> {
        let raw = frame.as_ref();

        let message = match protocol::parse(raw) {
            Ok(message) => message,
            Err(err) => {
                self.stats.record_rejected();
                warn!(error = %err, frame = %String::from_utf8_lossy(raw).trim_end(), "dropped malformed frame");
                return None;
            }
        };

        if message.slave_id != self.own_id {
            self.stats.record_rejected();
            debug!(slave_id = message.slave_id, "ignored frame for another slave");
            return None;
        }

        self.stats.record_accepted();
        let reply = match message.command {
            Command::Write => {
                self.store.write(message.address, message.data);
                debug!(address = message.address, data = message.data, "register written");
                ProtocolMessage::new(self.own_id, Command::Write, message.address, 0)
            }
            Command::Read => {
                let value = self.store.read(message.address);
                debug!(address = message.address, data = value, "register read");
                ProtocolMessage::new(self.own_id, Command::Read, message.address, value)
            }
        };

        let frame = reply.build(Direction::Response);
        self.stats.record_sent();
        Some(frame)
    }

    /// Answer every line from `reader` until EOF, writing replies to `writer`
    ///
    /// Lines are passed to [`handle`](Self::handle) with their terminator, so a
    /// final line without `\n` is dropped as malformed. Lines longer than
    /// [`MAX_FRAME_LEN`](protocol::MAX_FRAME_LEN) are discarded up to the next
    /// `\n` without being buffered. Returns the number of replies written.
    pub fn serve<R, W>(&mut self, mut reader: R, mut writer: W) -> std::io::Result<u64>
    where
        R: BufRead,
        W: Write,
    {
        // One byte past the longest frame is enough to tell it is oversized
        let limit = protocol::MAX_FRAME_LEN as u64 + 1;
        let mut line = Vec::with_capacity(protocol::MAX_FRAME_LEN + 1);
        let mut replies = 0;

        loop {
            line.clear();
            if (&mut reader)
                .take(limit)
                .read_until(protocol::TERMINATOR, &mut line)?
                == 0
            {
                break;
            }

            if line.len() > protocol::MAX_FRAME_LEN {
                let skipped = if line.last() == Some(&protocol::TERMINATOR) {
                    0
                } else {
                    reader.skip_until(protocol::TERMINATOR)?
                };
                self.stats.record_rejected();
                warn!(len = line.len() + skipped, "dropped oversized line");
                continue;
            }

            if let Some(reply) = self.handle(&line) {
                writer.write_all(reply.as_bytes())?;
                writer.flush()?;
                replies += 1;
            }
        }

        debug!(replies, "link closed");
        Ok(replies)
    }

    /// This slave's ID
    #[must_use]
    pub const fn own_id(&self) -> u8 {
        self.own_id
    }

    /// The register bank
    #[must_use]
    pub const fn store(&self) -> &SlaveStore {
        &self.store
    }

    /// Frame counters
    #[must_use]
    pub const fn stats(&self) -> &SessionStats {
        &self.stats
    }
}
