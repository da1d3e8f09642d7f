//! Register bank owned by one slave

/// Number of addressable registers
pub const REGISTER_COUNT: usize = 256;

/// 256 single-byte registers, all zero until written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlaveStore {
    bank: [u8; REGISTER_COUNT],
}

impl SlaveStore {
    /// Create a zeroed bank
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bank: [0; REGISTER_COUNT],
        }
    }

    /// Overwrite one register
    pub fn write(&mut self, address: u8, value: u8) {
        self.bank[usize::from(address)] = value;
    }

    /// Current value of one register
    #[must_use]
    pub fn read(&self, address: u8) -> u8 {
        self.bank[usize::from(address)]
    }

    /// The whole bank, indexed by address
    #[must_use]
    pub const fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.bank
    }
}

impl Default for SlaveStore {
    fn default() -> Self {
        Self::new()
    }
}
