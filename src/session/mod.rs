//! Master and slave roles
//!
//! Both sessions consume complete frames and never block; moving lines across
//! the physical link is left to the caller.

mod error;
mod master;
mod slave;
mod stats;
mod store;

pub use error::{MasterError, Result};
pub use master::MasterSession;
pub use slave::SlaveSession;
pub use stats::SessionStats;
pub use store::{REGISTER_COUNT, SlaveStore};
