//! Device profiles described by data instead of code.

use crate::builder::DeviceProfile;
use crate::error::MemoryMapError;
use crate::fifo::FifoQueue;
use crate::memory_map::MemoryMap;
use crate::slave_id::SlaveId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Size and non-default starting values of one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig<T> {
    #[serde(default)]
    pub size: usize,
    #[serde(default)]
    pub initial: BTreeMap<u16, T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaveIdConfig {
    pub server_id: u8,
    #[serde(default = "default_running")]
    pub running: bool,
    #[serde(default)]
    pub additional: String,
}

fn default_running() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FifoConfig {
    pub pointer_address: u16,
    pub capacity: usize,
    pub values: Vec<u16>,
}

impl Default for FifoConfig {
    fn default() -> Self {
        Self {
            pointer_address: 0,
            capacity: FifoQueue::MAX_CAPACITY,
            values: Vec::new(),
        }
    }
}

/// Serializable description of a simulated device.
///
/// ```json
/// {
///   "holding_registers": { "size": 16, "initial": { "0": 42 } },
///   "slave_id": { "server_id": 42 },
///   "exception_status": 5,
///   "identification": { "0": "mbcodec", "1": "sim", "2": "0.1" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceProfileConfig {
    pub coils: TableConfig<bool>,
    pub discrete_inputs: TableConfig<bool>,
    pub holding_registers: TableConfig<u16>,
    pub input_registers: TableConfig<u16>,
    pub slave_id: Option<SlaveIdConfig>,
    pub exception_status: u8,
    pub fifo: FifoConfig,
    pub identification: BTreeMap<u8, String>,
}

/// A [`DeviceProfile`] that applies a [`DeviceProfileConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfiguredProfile {
    config: DeviceProfileConfig,
}

impl ConfiguredProfile {
    pub fn new(config: DeviceProfileConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DeviceProfileConfig {
        &self.config
    }
}

impl From<DeviceProfileConfig> for ConfiguredProfile {
    fn from(config: DeviceProfileConfig) -> Self {
        Self::new(config)
    }
}

impl DeviceProfile for ConfiguredProfile {
    fn build_coils(&mut self, map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        let table = &self.config.coils;
        map.coils.resize(table.size);
        for (address, value) in &table.initial {
            map.coils.set(*address, *value)?;
        }
        Ok(())
    }

    fn build_discrete_inputs(&mut self, map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        let table = &self.config.discrete_inputs;
        map.discrete_inputs.resize(table.size);
        for (address, value) in &table.initial {
            map.discrete_inputs.set(*address, *value)?;
        }
        Ok(())
    }

    fn build_holding_registers(&mut self, map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        let table = &self.config.holding_registers;
        map.holding_registers.resize(table.size);
        for (address, value) in &table.initial {
            map.holding_registers.set(*address, *value)?;
        }
        Ok(())
    }

    fn build_input_registers(&mut self, map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        let table = &self.config.input_registers;
        map.input_registers.resize(table.size);
        for (address, value) in &table.initial {
            map.input_registers.set(*address, *value)?;
        }
        Ok(())
    }

    fn build_slave_id(&mut self, map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        map.slave_id = match &self.config.slave_id {
            Some(cfg) => Some(SlaveId::new(
                cfg.server_id,
                cfg.running,
                cfg.additional.as_bytes().to_vec(),
            )?),
            None => None,
        };
        Ok(())
    }

    fn build_exception_status(&mut self, map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        map.set_exception_status(i64::from(self.config.exception_status));
        Ok(())
    }

    fn build_fifo_queue(&mut self, map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        let cfg = &self.config.fifo;
        let mut fifo = FifoQueue::new(cfg.pointer_address, cfg.capacity)?;
        for value in &cfg.values {
            fifo.push(*value)?;
        }
        map.fifo_queue = fifo;
        Ok(())
    }

    fn read_device_identification(&mut self, map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        for (object_id, value) in &self.config.identification {
            map.device_identification
                .set(*object_id, value.as_bytes().to_vec())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfiguredProfile, DeviceProfileConfig, FifoConfig, TableConfig};
    use crate::builder::{BuildStep, MemoryMapBuilder};
    use crate::error::{MemoryMapError, Table};

    #[test]
    fn applies_initial_values() {
        let config = DeviceProfileConfig {
            holding_registers: TableConfig {
                size: 4,
                initial: [(1, 0xBEEF)].into_iter().collect(),
            },
            exception_status: 0x6D,
            ..DeviceProfileConfig::default()
        };

        let map = MemoryMapBuilder::new(ConfiguredProfile::new(config))
            .build()
            .unwrap();
        assert_eq!(map.holding_registers.read(0, 4).unwrap(), &[0, 0xBEEF, 0, 0]);
        assert_eq!(map.exception_status(), 0x6D);
    }

    #[test]
    fn initial_value_outside_table_fails_its_step() {
        let config = DeviceProfileConfig {
            coils: TableConfig {
                size: 2,
                initial: [(5, true)].into_iter().collect(),
            },
            ..DeviceProfileConfig::default()
        };

        let err = MemoryMapBuilder::new(ConfiguredProfile::new(config))
            .build()
            .unwrap_err();
        assert_eq!(err.step, BuildStep::Coils);
        assert_eq!(
            err.source,
            MemoryMapError::AddressOutOfRange {
                table: Table::Coils,
                address: 5,
                size: 2
            }
        );
    }

    #[test]
    fn overfull_fifo_fails_its_step() {
        let config = DeviceProfileConfig {
            fifo: FifoConfig {
                pointer_address: 0,
                capacity: 1,
                values: vec![1, 2],
            },
            ..DeviceProfileConfig::default()
        };
        let err = MemoryMapBuilder::new(ConfiguredProfile::new(config))
            .build()
            .unwrap_err();
        assert_eq!(err.step, BuildStep::FifoQueue);
    }
}
