//! Memory store - the emulated RAM.
//!
//! A fixed-capacity, zero-initialized byte buffer. The session owns it
//! exclusively for its whole lifetime; nothing ever resizes it. Every access
//! is range-checked: a request reaching past the end fails with
//! [`RamLinkError::OutOfRangeAccess`] instead of silently corrupting or
//! misreading memory.

use bytes::Bytes;

use crate::error::{RamLinkError, Result};

/// Default store capacity (1 MiB).
pub const DEFAULT_CAPACITY: usize = 1024 * 1024;

/// The emulated memory buffer.
pub struct MemoryStore {
    data: Vec<u8>,
}

impl MemoryStore {
    /// Create a store of `capacity` bytes, all zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
        }
    }

    /// Store capacity in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Validate that `[address, address + length)` lies inside the store.
    pub fn check_range(&self, address: u64, length: u64) -> Result<()> {
        let in_range = address
            .checked_add(length)
            .is_some_and(|end| end <= self.data.len() as u64);
        if in_range {
            Ok(())
        } else {
            Err(RamLinkError::OutOfRangeAccess {
                address,
                length,
                capacity: self.data.len(),
            })
        }
    }

    /// Copy `data` into the store starting at `address`.
    pub fn write_at(&mut self, address: u64, data: &[u8]) -> Result<()> {
        self.check_range(address, data.len() as u64)?;
        let start = address as usize;
        self.data[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Return a copy of `length` bytes starting at `address`.
    pub fn read_at(&self, address: u64, length: u64) -> Result<Bytes> {
        self.check_range(address, length)?;
        let start = address as usize;
        let end = start + length as usize;
        Ok(Bytes::copy_from_slice(&self.data[start..end]))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
