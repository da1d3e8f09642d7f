//! ASCII master/slave register protocol
//!
//! A master addresses a slave by ID and issues a register WRITE or READ; the
//! slave answers with an acknowledgement or the requested value. Frames are
//! single ASCII lines protected by an additive checksum.
//!
//! # Quick Start
//!
//! ```rust
//! use ascii_link::{MasterSession, SlaveSession};
//!
//! let mut master = MasterSession::new(Vec::new());
//! let mut slave = SlaveSession::new(0x01);
//!
//! let request = master.send_write(0x01, 0x10, 0xAA)?;
//! assert_eq!(request.as_str(), "$01W10AA9B\n");
//!
//! let reply = slave.handle(&request).expect("addressed to this slave");
//! let ack = master.receive(&reply)?;
//! assert_eq!(ack.address, 0x10);
//! # Ok::<(), ascii_link::MasterError>(())
//! ```
//!
//! # Wire Format
//!
//! ```text
//! $01W10AA9B\n   write request   (sentinel, id, command, address, data, checksum)
//! $01R1014\n     read request
//! :01W1019\n     write acknowledgement
//! :01R10AA96\n   read response
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod protocol;
pub mod session;

pub use protocol::{
    Command, DecodeError, Direction, Frame, MAX_FRAME_LEN, MIN_FRAME_LEN, ParseError,
    ProtocolMessage, build, parse,
};
pub use session::{MasterError, MasterSession, SessionStats, SlaveSession, SlaveStore};

/// Protocol version implemented by this crate
pub const VERSION: &str = "1.0";
