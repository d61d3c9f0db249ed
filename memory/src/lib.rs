use std::fmt;

use log::debug;

#[derive(Debug, PartialEq, Eq)]
pub enum MemoryError {
    OverCapacity { address: u64, len: usize },
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryError::OverCapacity { address, len } => write!(
                f,
                "physical access of {} byte(s) at {:#06x} is out of bounds",
                len, address
            ),
        }
    }
}

impl std::error::Error for MemoryError {}

/// Byte-addressed emulated RAM of `CAPACITY` bytes, zeroed at creation.
#[derive(Clone)]
pub struct PhysicalMemory<const CAPACITY: usize> {
    buffer: Box<[u8]>,
}

impl<const CAPACITY: usize> PhysicalMemory<CAPACITY> {
    pub fn new() -> Self {
        assert!(
            CAPACITY.is_power_of_two(),
            "Capacity {} is not a power of 2",
            CAPACITY
        );
        Self {
            buffer: vec![0; CAPACITY].into_boxed_slice(),
        }
    }

    pub fn check_address(&self, address: u64, len: usize) -> Result<(), MemoryError> {
        let end = address.checked_add(len as u64);
        match end {
            Some(end) if end <= CAPACITY as u64 => Ok(()),
            _ => Err(MemoryError::OverCapacity { address, len }),
        }
    }

    pub fn read_u8(&self, address: u64) -> Result<u8, MemoryError> {
        self.check_address(address, 1)?;
        Ok(self.buffer[address as usize])
    }

    /// Copies `block` into memory starting at `address`.
    pub fn write_block(&mut self, address: u64, block: &[u8]) -> Result<(), MemoryError> {
        self.check_address(address, block.len())?;
        let start = address as usize;
        self.buffer[start..start + block.len()].copy_from_slice(block);
        debug!("Wrote {} bytes at {:#06x}", block.len(), address);
        Ok(())
    }
}

impl<const CAPACITY: usize> Default for PhysicalMemory<CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAPACITY: usize> fmt::Debug for PhysicalMemory<CAPACITY> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicalMemory")
            .field("capacity", &CAPACITY)
            .finish()
    }
}
