//! Flat byte memory, bounds-checked on every access.

use crate::error::{CpuError, Result};

/// Fixed-size byte buffer holding the program image.
///
/// The image is both code and data space. Its length is established once at
/// load and never changes afterwards; there is no resize and no zero-fill.
pub struct Memory {
    bytes: Vec<u8>,
}

impl Memory {
    /// Installs the program image. This is the only way memory size is
    /// established, and it happens exactly once per run.
    pub fn load(image: Vec<u8>) -> Self {
        Self { bytes: image }
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Reads the byte at `addr`, failing unless `addr` is inside the image.
    pub fn read(&self, addr: u64) -> Result<u8> {
        usize::try_from(addr)
            .ok()
            .and_then(|idx| self.bytes.get(idx))
            .copied()
            .ok_or(CpuError::OutOfBounds {
                addr,
                len: self.len(),
            })
    }

    /// Stores `value` at `addr`, same bounds contract as [`Memory::read`].
    ///
    /// No instruction in the current table writes memory; the operation is
    /// part of the contract and kept for instructions that will.
    pub fn write(&mut self, addr: u64, value: u8) -> Result<()> {
        let len = self.len();
        let slot = usize::try_from(addr)
            .ok()
            .and_then(|idx| self.bytes.get_mut(idx))
            .ok_or(CpuError::OutOfBounds { addr, len })?;
        *slot = value;
        Ok(())
    }
}
