use crate::error::{BuildError, MemoryMapError};
use crate::memory_map::MemoryMap;
use std::fmt;
use tracing::{debug, trace, warn};

/// One stage of memory-map construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildStep {
    Coils,
    DiscreteInputs,
    HoldingRegisters,
    InputRegisters,
    SlaveId,
    ExceptionStatus,
    FifoQueue,
    DeviceIdentification,
}

impl BuildStep {
    /// The order every build runs its steps in.
    pub const ORDER: [BuildStep; 8] = [
        Self::Coils,
        Self::DiscreteInputs,
        Self::HoldingRegisters,
        Self::InputRegisters,
        Self::SlaveId,
        Self::ExceptionStatus,
        Self::FifoQueue,
        Self::DeviceIdentification,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Coils => "build coils",
            Self::DiscreteInputs => "build discrete inputs",
            Self::HoldingRegisters => "build holding registers",
            Self::InputRegisters => "build input registers",
            Self::SlaveId => "build slave id",
            Self::ExceptionStatus => "build exception status",
            Self::FifoQueue => "build fifo queue",
            Self::DeviceIdentification => "read device identification",
        }
    }
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Populates one category of a [`MemoryMap`] per method.
///
/// Every hook defaults to doing nothing, so a profile only overrides the
/// categories its device actually has.
pub trait DeviceProfile {
    fn build_coils(&mut self, _map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        Ok(())
    }

    fn build_discrete_inputs(&mut self, _map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        Ok(())
    }

    fn build_holding_registers(&mut self, _map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        Ok(())
    }

    fn build_input_registers(&mut self, _map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        Ok(())
    }

    fn build_slave_id(&mut self, _map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        Ok(())
    }

    fn build_exception_status(&mut self, _map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        Ok(())
    }

    fn build_fifo_queue(&mut self, _map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        Ok(())
    }

    fn read_device_identification(&mut self, _map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        Ok(())
    }
}

impl<T: DeviceProfile + ?Sized> DeviceProfile for &mut T {
    fn build_coils(&mut self, map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        (**self).build_coils(map)
    }

    fn build_discrete_inputs(&mut self, map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        (**self).build_discrete_inputs(map)
    }

    fn build_holding_registers(&mut self, map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        (**self).build_holding_registers(map)
    }

    fn build_input_registers(&mut self, map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        (**self).build_input_registers(map)
    }

    fn build_slave_id(&mut self, map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        (**self).build_slave_id(map)
    }

    fn build_exception_status(&mut self, map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        (**self).build_exception_status(map)
    }

    fn build_fifo_queue(&mut self, map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        (**self).build_fifo_queue(map)
    }

    fn read_device_identification(&mut self, map: &mut MemoryMap) -> Result<(), MemoryMapError> {
        (**self).read_device_identification(map)
    }
}

fn run_step<P: DeviceProfile + ?Sized>(
    profile: &mut P,
    step: BuildStep,
    map: &mut MemoryMap,
) -> Result<(), MemoryMapError> {
    match step {
        BuildStep::Coils => profile.build_coils(map),
        BuildStep::DiscreteInputs => profile.build_discrete_inputs(map),
        BuildStep::HoldingRegisters => profile.build_holding_registers(map),
        BuildStep::InputRegisters => profile.build_input_registers(map),
        BuildStep::SlaveId => profile.build_slave_id(map),
        BuildStep::ExceptionStatus => profile.build_exception_status(map),
        BuildStep::FifoQueue => profile.build_fifo_queue(map),
        BuildStep::DeviceIdentification => profile.read_device_identification(map),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    Idle,
    Building,
    Built,
}

/// Runs a [`DeviceProfile`] over a fresh [`MemoryMap`] in [`BuildStep::ORDER`].
#[derive(Debug)]
pub struct MemoryMapBuilder<P> {
    profile: P,
    state: BuilderState,
}

impl<P: DeviceProfile> MemoryMapBuilder<P> {
    pub fn new(profile: P) -> Self {
        Self {
            profile,
            state: BuilderState::Idle,
        }
    }

    pub fn state(&self) -> BuilderState {
        self.state
    }

    pub fn profile(&self) -> &P {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut P {
        &mut self.profile
    }

    pub fn into_profile(self) -> P {
        self.profile
    }

    /// Builds a new map. Each call starts from an empty map, so maps from
    /// earlier calls are never touched.
    pub fn build(&mut self) -> Result<MemoryMap, BuildError> {
        self.state = BuilderState::Building;
        let mut map = MemoryMap::new();

        for step in BuildStep::ORDER {
            trace!(%step, "running memory map build step");
            if let Err(source) = run_step(&mut self.profile, step, &mut map) {
                warn!(%step, error = %source, "memory map build step failed");
                self.state = BuilderState::Idle;
                return Err(BuildError { step, source });
            }
        }

        self.state = BuilderState::Built;
        debug!(
            coils = map.coils.len(),
            discrete_inputs = map.discrete_inputs.len(),
            holding_registers = map.holding_registers.len(),
            input_registers = map.input_registers.len(),
            "memory map built"
        );
        Ok(map)
    }
}
