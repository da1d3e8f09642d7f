/// Per-session frame counters.
///
/// Sessions are single-owner, so these are plain integers rather than atomics.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    /// Frames produced for the link.
    pub frames_sent: u64,
    /// Frames handed to the session for validation.
    pub frames_received: u64,
    /// Received frames the session acted on.
    pub frames_accepted: u64,
    /// Received frames dropped or rejected.
    pub frames_rejected: u64,
}

impl SessionStats {
    /// All counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frames_sent: 0,
            frames_received: 0,
            frames_accepted: 0,
            frames_rejected: 0,
        }
    }

    #[inline]
    pub(crate) fn record_sent(&mut self) {
        self.frames_sent += 1;
    }

    #[inline]
    pub(crate) fn record_accepted(&mut self) {
        self.frames_received += 1;
        self.frames_accepted += 1;
    }

    #[inline]
    pub(crate) fn record_rejected(&mut self) {
        self.frames_received += 1;
        self.frames_rejected += 1;
    }

    /// Share of received frames that were rejected, if any were received.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rejection_ratio(&self) -> Option<f64> {
        if self.frames_received == 0 {
            return None;
        }
        Some(self.frames_rejected as f64 / self.frames_received as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = SessionStats::default();
        assert_eq!(stats.rejection_ratio(), None);

        stats.record_sent();
        stats.record_accepted();
        stats.record_rejected();
        stats.record_rejected();
        stats.record_accepted();

        assert_eq!(stats.frames_sent, 1);
        assert_eq!(stats.frames_received, 4);
        assert_eq!(stats.frames_accepted, 2);
        assert_eq!(stats.frames_rejected, 2);
        assert_eq!(stats.rejection_ratio(), Some(0.5));
    }
}
