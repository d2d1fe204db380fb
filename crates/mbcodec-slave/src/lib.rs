//! Slave-side data model for `mbcodec`.
//!
//! A [`MemoryMap`] holds everything a simulated Modbus slave answers from.
//! Maps are produced by a [`MemoryMapBuilder`] running a [`DeviceProfile`]
//! through a fixed sequence of steps, and [`handle`] turns a decoded request
//! into the response that map would give.

#![forbid(unsafe_code)]

pub mod banks;
pub mod builder;
pub mod error;
pub mod fifo;
pub mod handler;
pub mod identification;
pub mod memory_map;
pub mod profile;
pub mod slave_id;

pub use banks::{CoilBank, RegisterBank};
pub use builder::{BuildStep, BuilderState, DeviceProfile, MemoryMapBuilder};
pub use error::{BuildError, MemoryMapError, Table};
pub use fifo::FifoQueue;
pub use handler::handle;
pub use identification::DeviceIdentification;
pub use memory_map::MemoryMap;
pub use profile::{ConfiguredProfile, DeviceProfileConfig, FifoConfig, SlaveIdConfig, TableConfig};
pub use slave_id::SlaveId;
