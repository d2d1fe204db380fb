use crate::error::{MemoryMapError, Table};
use std::ops::Range;

fn checked_range(
    table: Table,
    start: u16,
    quantity: u16,
    len: usize,
) -> Result<Range<usize>, MemoryMapError> {
    let start = usize::from(start);
    let end = start + usize::from(quantity);
    if quantity == 0 || end > len {
        return Err(MemoryMapError::AddressOutOfRange {
            table,
            address: end.saturating_sub(1).max(start),
            size: len,
        });
    }
    Ok(start..end)
}

/// Single-bit table: coils or discrete inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoilBank {
    table: Table,
    values: Vec<bool>,
}

impl CoilBank {
    pub fn new(table: Table, size: usize) -> Self {
        Self {
            table,
            values: vec![false; size],
        }
    }

    pub fn table(&self) -> Table {
        self.table
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Grows or shrinks the table; new entries start cleared.
    pub fn resize(&mut self, size: usize) {
        self.values.resize(size, false);
    }

    pub fn get(&self, address: u16) -> Option<bool> {
        self.values.get(usize::from(address)).copied()
    }

    pub fn set(&mut self, address: u16, value: bool) -> Result<(), MemoryMapError> {
        let size = self.values.len();
        let slot = self
            .values
            .get_mut(usize::from(address))
            .ok_or(MemoryMapError::AddressOutOfRange {
                table: self.table,
                address: usize::from(address),
                size,
            })?;
        *slot = value;
        Ok(())
    }

    pub fn read(&self, start: u16, quantity: u16) -> Result<&[bool], MemoryMapError> {
        let range = checked_range(self.table, start, quantity, self.values.len())?;
        Ok(&self.values[range])
    }

    /// Writes all of `values` or nothing.
    pub fn write(&mut self, start: u16, values: &[bool]) -> Result<(), MemoryMapError> {
        let quantity = u16::try_from(values.len())
            .map_err(|_| MemoryMapError::InvalidConfig("coil write longer than address space"))?;
        let range = checked_range(self.table, start, quantity, self.values.len())?;
        self.values[range].copy_from_slice(values);
        Ok(())
    }
}

/// 16-bit table: holding or input registers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterBank {
    table: Table,
    values: Vec<u16>,
}

impl RegisterBank {
    pub fn new(table: Table, size: usize) -> Self {
        Self {
            table,
            values: vec![0u16; size],
        }
    }

    pub fn table(&self) -> Table {
        self.table
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn resize(&mut self, size: usize) {
        self.values.resize(size, 0);
    }

    pub fn get(&self, address: u16) -> Option<u16> {
        self.values.get(usize::from(address)).copied()
    }

    pub fn set(&mut self, address: u16, value: u16) -> Result<(), MemoryMapError> {
        let size = self.values.len();
        let slot = self
            .values
            .get_mut(usize::from(address))
            .ok_or(MemoryMapError::AddressOutOfRange {
                table: self.table,
                address: usize::from(address),
                size,
            })?;
        *slot = value;
        Ok(())
    }

    pub fn read(&self, start: u16, quantity: u16) -> Result<&[u16], MemoryMapError> {
        let range = checked_range(self.table, start, quantity, self.values.len())?;
        Ok(&self.values[range])
    }

    /// Writes all of `values` or nothing.
    pub fn write(&mut self, start: u16, values: &[u16]) -> Result<(), MemoryMapError> {
        let quantity = u16::try_from(values.len()).map_err(|_| {
            MemoryMapError::InvalidConfig("register write longer than address space")
        })?;
        let range = checked_range(self.table, start, quantity, self.values.len())?;
        self.values[range].copy_from_slice(values);
        Ok(())
    }
}
