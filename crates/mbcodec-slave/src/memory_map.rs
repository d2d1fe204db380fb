use crate::banks::{CoilBank, RegisterBank};
use crate::error::Table;
use crate::fifo::FifoQueue;
use crate::identification::DeviceIdentification;
use crate::slave_id::SlaveId;

/// Everything a simulated slave can answer requests from.
///
/// A fresh map has empty tables, no slave id, a zero exception status and an
/// empty FIFO; device profiles fill it in through [`crate::MemoryMapBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryMap {
    pub coils: CoilBank,
    pub discrete_inputs: CoilBank,
    pub holding_registers: RegisterBank,
    pub input_registers: RegisterBank,
    pub slave_id: Option<SlaveId>,
    pub fifo_queue: FifoQueue,
    pub device_identification: DeviceIdentification,
    exception_status: u8,
}

impl MemoryMap {
    pub fn new() -> Self {
        Self {
            coils: CoilBank::new(Table::Coils, 0),
            discrete_inputs: CoilBank::new(Table::DiscreteInputs, 0),
            holding_registers: RegisterBank::new(Table::HoldingRegisters, 0),
            input_registers: RegisterBank::new(Table::InputRegisters, 0),
            slave_id: None,
            fifo_queue: FifoQueue::default(),
            device_identification: DeviceIdentification::new(),
            exception_status: 0,
        }
    }

    /// Table sizes in one call, for profiles that only need zeroed storage.
    pub fn with_sizes(
        coil_count: usize,
        discrete_input_count: usize,
        holding_register_count: usize,
        input_register_count: usize,
    ) -> Self {
        let mut map = Self::new();
        map.coils.resize(coil_count);
        map.discrete_inputs.resize(discrete_input_count);
        map.holding_registers.resize(holding_register_count);
        map.input_registers.resize(input_register_count);
        map
    }

    pub fn exception_status(&self) -> u8 {
        self.exception_status
    }

    /// Keeps only the low eight bits of `status`.
    pub fn set_exception_status(&mut self, status: i64) {
        self.exception_status = (status & 0xFF) as u8;
    }
}

impl Default for MemoryMap {
    fn default() -> Self {
        Self::new()
    }
}
