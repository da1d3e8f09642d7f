//! Session-level error types

use thiserror::Error;

use crate::protocol::ParseError;

/// Reasons the master rejects a frame or fails to emit one
#[derive(Error, Debug)]
pub enum MasterError {
    /// Frame failed codec validation
    #[error("malformed frame: {0}")]
    Malformed(#[from] ParseError),

    /// Response came from a slave other than the one last addressed
    #[error("unexpected slave id: {got:#04x} (expected {expected:#04x})")]
    UnexpectedSlave {
        /// Slave ID carried by the frame
        got: u8,
        /// Slave ID of the outstanding request
        expected: u8,
    },

    /// Frame carries the request sentinel
    #[error("not a response: frame starts with the request sentinel")]
    NotAResponse,

    /// The outbound link failed while emitting a request
    #[error("link error: {0}")]
    Link(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, MasterError>;
