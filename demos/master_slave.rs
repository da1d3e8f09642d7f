//! Master and slave exchanging frames over an in-memory link

use ascii_link::{MasterSession, SlaveSession};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut master = MasterSession::new(Vec::new());
    let mut slave = SlaveSession::new(0x01);

    let write = master.send_write(0x01, 0x10, 0xAA)?;
    info!(frame = write.as_str().trim_end(), "master sent WRITE");
    if let Some(ack) = slave.handle(&write) {
        info!(frame = ack.as_str().trim_end(), "slave replied ACK");
        let msg = master.receive(&ack)?;
        info!(slave_id = msg.slave_id, address = msg.address, "master received ACK");
    }

    let read = master.send_read(0x01, 0x10)?;
    info!(frame = read.as_str().trim_end(), "master sent READ");
    if let Some(value) = slave.handle(&read) {
        info!(frame = value.as_str().trim_end(), "slave replied READ");
        let msg = master.receive(&value)?;
        info!(
            slave_id = msg.slave_id,
            address = msg.address,
            data = msg.data,
            "master received value"
        );
    }

    // A frame for another slave gets no reply
    let foreign = master.send_write(0x02, 0x10, 0x55)?;
    if slave.handle(&foreign).is_none() {
        info!(frame = foreign.as_str().trim_end(), "slave 0x01 ignored frame");
    }

    let stats = master.stats();
    info!(
        sent = stats.frames_sent,
        accepted = stats.frames_accepted,
        rejected = stats.frames_rejected,
        "master done"
    );
    Ok(())
}
