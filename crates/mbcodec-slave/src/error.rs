use crate::builder::BuildStep;
use thiserror::Error;

/// Which addressable table an address refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Coils,
    DiscreteInputs,
    HoldingRegisters,
    InputRegisters,
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Coils => "coil",
            Self::DiscreteInputs => "discrete input",
            Self::HoldingRegisters => "holding register",
            Self::InputRegisters => "input register",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryMapError {
    #[error("{table} address {address} out of range (table size {size})")]
    AddressOutOfRange {
        table: Table,
        address: usize,
        size: usize,
    },
    #[error("fifo queue full (capacity {capacity})")]
    FifoFull { capacity: usize },
    #[error("fifo capacity {requested} exceeds maximum {max}")]
    FifoCapacity { requested: usize, max: usize },
    #[error("object {object_id:#04x} is {len} bytes, maximum is {max}")]
    ObjectTooLarge { object_id: u8, len: usize, max: usize },
    #[error("slave id data is {len} bytes, maximum is {max}")]
    SlaveIdTooLarge { len: usize, max: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

/// A profile step failed; the partially built map was discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("memory map build failed at {step}: {source}")]
pub struct BuildError {
    pub step: BuildStep,
    #[source]
    pub source: MemoryMapError,
}
