use crate::encoding::{ModbusInput, ModbusOutput};
use crate::pdu::limits::{
    check_block, len_as_quantity, MAX_COMM_EVENTS, MAX_FIFO_COUNT, MAX_READ_BITS,
    MAX_READ_REGISTERS, MAX_SLAVE_ID_LEN, MAX_WRITE_COILS, MAX_WRITE_REGISTERS,
};
use crate::pdu::message::{bit_at, pack_bits, pdu_union, read_registers, write_registers};
use crate::pdu::request::{decode_coil_value, encode_coil_value};
use crate::pdu::{
    ExceptionResponse, FunctionCode, MaskWriteRegisterRequest, Message, PduBody,
    ReadFileRecordResponse, WriteFileRecordResponse, WriteSingleCoilRequest,
    WriteSingleRegisterRequest,
};
use crate::{DecodeError, EncodeError, NumberOutOfRange};

const MAX_BIT_BYTES: usize = (MAX_READ_BITS as usize).div_ceil(8);

/// Byte count + packed bits (FC01, FC02). Unused high bits of the last byte are zero.
macro_rules! bit_response {
    ($(#[$meta:meta])* $name:ident, $function:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            packed: Vec<u8>,
        }

        impl $name {
            pub fn new(values: &[bool]) -> Result<Self, NumberOutOfRange> {
                len_as_quantity("quantity", values.len(), MAX_READ_BITS)?;
                Ok(Self {
                    packed: pack_bits(values),
                })
            }

            pub fn from_packed(packed: Vec<u8>) -> Result<Self, NumberOutOfRange> {
                NumberOutOfRange::check_len("byte count", packed.len(), 1, MAX_BIT_BYTES)?;
                Ok(Self { packed })
            }

            pub fn packed(&self) -> &[u8] {
                &self.packed
            }

            /// Bit at `index`; bits past the requested quantity read as padding.
            pub fn bit(&self, index: usize) -> Option<bool> {
                bit_at(&self.packed, index)
            }
        }

        impl PduBody for $name {
            fn function_code(&self) -> u8 {
                $function.as_u8()
            }

            fn payload_size(&self) -> usize {
                1 + self.packed.len()
            }

            fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
                let byte_count =
                    NumberOutOfRange::check_len("byte count", self.packed.len(), 1, MAX_BIT_BYTES)?;
                w.write_u8(byte_count as u8)?;
                w.write_all(&self.packed)
            }

            fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
                let byte_count = NumberOutOfRange::check_len(
                    "byte count",
                    usize::from(r.read_u8()?),
                    1,
                    MAX_BIT_BYTES,
                )?;
                self.packed = r.read_vec(byte_count)?;
                Ok(())
            }
        }
    };
}

/// Byte count + register words (FC03, FC04, FC23).
macro_rules! register_response {
    ($(#[$meta:meta])* $name:ident, $function:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            registers: Vec<u16>,
        }

        impl $name {
            pub fn new(registers: Vec<u16>) -> Result<Self, NumberOutOfRange> {
                len_as_quantity("quantity", registers.len(), MAX_READ_REGISTERS)?;
                Ok(Self { registers })
            }

            pub fn registers(&self) -> &[u16] {
                &self.registers
            }

            pub fn register_count(&self) -> usize {
                self.registers.len()
            }

            pub fn register(&self, index: usize) -> Option<u16> {
                self.registers.get(index).copied()
            }
        }

        impl PduBody for $name {
            fn function_code(&self) -> u8 {
                $function.as_u8()
            }

            fn payload_size(&self) -> usize {
                1 + self.registers.len() * 2
            }

            fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
                len_as_quantity("quantity", self.registers.len(), MAX_READ_REGISTERS)?;
                w.write_u8((self.registers.len() * 2) as u8)?;
                write_registers(w, &self.registers)
            }

            fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
                let byte_count = usize::from(r.read_u8()?);
                if byte_count % 2 != 0 {
                    return Err(DecodeError::InvalidLength);
                }
                NumberOutOfRange::check_len(
                    "byte count",
                    byte_count,
                    2,
                    usize::from(MAX_READ_REGISTERS) * 2,
                )?;
                self.registers = read_registers(r, byte_count / 2)?;
                Ok(())
            }
        }
    };
}

/// Start address + quantity echo (FC15, FC16).
macro_rules! write_block_response {
    ($(#[$meta:meta])* $name:ident, $function:expr, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name {
            start_address: u16,
            quantity: u16,
        }

        impl $name {
            pub fn new(start_address: u16, quantity: u16) -> Result<Self, NumberOutOfRange> {
                check_block("quantity", start_address, quantity, $max)?;
                Ok(Self {
                    start_address,
                    quantity,
                })
            }

            pub fn start_address(&self) -> u16 {
                self.start_address
            }

            pub fn quantity(&self) -> u16 {
                self.quantity
            }
        }

        impl PduBody for $name {
            fn function_code(&self) -> u8 {
                $function.as_u8()
            }

            fn payload_size(&self) -> usize {
                4
            }

            fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
                check_block("quantity", self.start_address, self.quantity, $max)?;
                w.write_be_u16(self.start_address)?;
                w.write_be_u16(self.quantity)?;
                Ok(())
            }

            fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
                let start_address = r.read_be_u16()?;
                let quantity = r.read_be_u16()?;
                *self = Self::new(start_address, quantity)?;
                Ok(())
            }
        }
    };
}

bit_response!(ReadCoilsResponse, FunctionCode::ReadCoils);
bit_response!(ReadDiscreteInputsResponse, FunctionCode::ReadDiscreteInputs);

register_response!(ReadHoldingRegistersResponse, FunctionCode::ReadHoldingRegisters);
register_response!(ReadInputRegistersResponse, FunctionCode::ReadInputRegisters);
register_response!(
    ReadWriteMultipleRegistersResponse,
    FunctionCode::ReadWriteMultipleRegisters
);

write_block_response!(
    WriteMultipleCoilsResponse,
    FunctionCode::WriteMultipleCoils,
    MAX_WRITE_COILS
);
write_block_response!(
    WriteMultipleRegistersResponse,
    FunctionCode::WriteMultipleRegisters,
    MAX_WRITE_REGISTERS
);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSingleCoilResponse {
    address: u16,
    value: bool,
}

impl WriteSingleCoilResponse {
    pub const fn new(address: u16, value: bool) -> Self {
        Self { address, value }
    }

    pub fn echo(request: &WriteSingleCoilRequest) -> Self {
        Self::new(request.address(), request.value())
    }

    pub fn address(&self) -> u16 {
        self.address
    }

    pub fn value(&self) -> bool {
        self.value
    }
}

impl PduBody for WriteSingleCoilResponse {
    fn function_code(&self) -> u8 {
        FunctionCode::WriteSingleCoil.as_u8()
    }

    fn payload_size(&self) -> usize {
        4
    }

    fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        w.write_be_u16(self.address)?;
        w.write_be_u16(encode_coil_value(self.value))
    }

    fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
        let address = r.read_be_u16()?;
        let value = decode_coil_value(r.read_be_u16()?)?;
        *self = Self::new(address, value);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSingleRegisterResponse {
    address: u16,
    value: u16,
}

impl WriteSingleRegisterResponse {
    pub const fn new(address: u16, value: u16) -> Self {
        Self { address, value }
    }

    pub fn echo(request: &WriteSingleRegisterRequest) -> Self {
        Self::new(request.address(), request.value())
    }

    pub fn address(&self) -> u16 {
        self.address
    }

    pub fn value(&self) -> u16 {
        self.value
    }
}

impl PduBody for WriteSingleRegisterResponse {
    fn function_code(&self) -> u8 {
        FunctionCode::WriteSingleRegister.as_u8()
    }

    fn payload_size(&self) -> usize {
        4
    }

    fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        w.write_be_u16(self.address)?;
        w.write_be_u16(self.value)
    }

    fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
        let address = r.read_be_u16()?;
        let value = r.read_be_u16()?;
        *self = Self::new(address, value);
        Ok(())
    }
}

/// Eight device-specific status bits (FC07).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadExceptionStatusResponse {
    exception_status: u8,
}

impl ReadExceptionStatusResponse {
    pub const PAYLOAD_SIZE: usize = 1;

    pub const fn new(exception_status: u8) -> Self {
        Self { exception_status }
    }

    pub fn exception_status(&self) -> u8 {
        self.exception_status
    }

    /// Keeps only the low eight bits, whatever the sign or magnitude of `status`.
    pub fn set_exception_status(&mut self, status: i64) {
        self.exception_status = (status & 0xFF) as u8;
    }
}

impl PduBody for ReadExceptionStatusResponse {
    fn function_code(&self) -> u8 {
        FunctionCode::ReadExceptionStatus.as_u8()
    }

    fn payload_size(&self) -> usize {
        Self::PAYLOAD_SIZE
    }

    fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        w.write_u8(self.exception_status)
    }

    fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
        let status = r.read_u8()?;
        self.set_exception_status(i64::from(status));
        Ok(())
    }
}

fn decode_busy(raw: u16) -> Result<bool, DecodeError> {
    match raw {
        0xFFFF => Ok(true),
        0x0000 => Ok(false),
        _ => Err(DecodeError::InvalidValue),
    }
}

const fn encode_busy(busy: bool) -> u16 {
    if busy {
        0xFFFF
    } else {
        0x0000
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetCommEventCounterResponse {
    busy: bool,
    event_count: u16,
}

impl GetCommEventCounterResponse {
    pub const fn new(busy: bool, event_count: u16) -> Self {
        Self { busy, event_count }
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    pub fn event_count(&self) -> u16 {
        self.event_count
    }
}

impl PduBody for GetCommEventCounterResponse {
    fn function_code(&self) -> u8 {
        FunctionCode::GetCommEventCounter.as_u8()
    }

    fn payload_size(&self) -> usize {
        4
    }

    fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        w.write_be_u16(encode_busy(self.busy))?;
        w.write_be_u16(self.event_count)
    }

    fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
        let busy = decode_busy(r.read_be_u16()?)?;
        let event_count = r.read_be_u16()?;
        *self = Self::new(busy, event_count);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetCommEventLogResponse {
    busy: bool,
    event_count: u16,
    message_count: u16,
    events: Vec<u8>,
}

impl GetCommEventLogResponse {
    /// Status, event count and message count precede the events.
    const FIXED_LEN: usize = 6;

    pub fn new(
        busy: bool,
        event_count: u16,
        message_count: u16,
        events: Vec<u8>,
    ) -> Result<Self, NumberOutOfRange> {
        NumberOutOfRange::check_len("event count", events.len(), 0, MAX_COMM_EVENTS)?;
        Ok(Self {
            busy,
            event_count,
            message_count,
            events,
        })
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    pub fn event_count(&self) -> u16 {
        self.event_count
    }

    pub fn message_count(&self) -> u16 {
        self.message_count
    }

    /// Most recent event first.
    pub fn events(&self) -> &[u8] {
        &self.events
    }
}

impl PduBody for GetCommEventLogResponse {
    fn function_code(&self) -> u8 {
        FunctionCode::GetCommEventLog.as_u8()
    }

    fn payload_size(&self) -> usize {
        1 + Self::FIXED_LEN + self.events.len()
    }

    fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        NumberOutOfRange::check_len("event count", self.events.len(), 0, MAX_COMM_EVENTS)?;
        w.write_u8((Self::FIXED_LEN + self.events.len()) as u8)?;
        w.write_be_u16(encode_busy(self.busy))?;
        w.write_be_u16(self.event_count)?;
        w.write_be_u16(self.message_count)?;
        w.write_all(&self.events)
    }

    fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
        let byte_count = NumberOutOfRange::check_len(
            "byte count",
            usize::from(r.read_u8()?),
            Self::FIXED_LEN,
            Self::FIXED_LEN + MAX_COMM_EVENTS,
        )?;
        let busy = decode_busy(r.read_be_u16()?)?;
        let event_count = r.read_be_u16()?;
        let message_count = r.read_be_u16()?;
        let events = r.read_vec(byte_count - Self::FIXED_LEN)?;
        *self = Self::new(busy, event_count, message_count, events)?;
        Ok(())
    }
}

/// Device-specific identification bytes (FC17).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSlaveIdResponse {
    data: Vec<u8>,
}

impl ReportSlaveIdResponse {
    pub fn new(data: Vec<u8>) -> Result<Self, NumberOutOfRange> {
        NumberOutOfRange::check_len("byte count", data.len(), 1, MAX_SLAVE_ID_LEN)?;
        Ok(Self { data })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl PduBody for ReportSlaveIdResponse {
    fn function_code(&self) -> u8 {
        FunctionCode::ReportSlaveId.as_u8()
    }

    fn payload_size(&self) -> usize {
        1 + self.data.len()
    }

    fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        let byte_count = NumberOutOfRange::check_len("byte count", self.data.len(), 1, MAX_SLAVE_ID_LEN)?;
        w.write_u8(byte_count as u8)?;
        w.write_all(&self.data)
    }

    fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
        let byte_count = NumberOutOfRange::check_len(
            "byte count",
            usize::from(r.read_u8()?),
            1,
            MAX_SLAVE_ID_LEN,
        )?;
        self.data = r.read_vec(byte_count)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaskWriteRegisterResponse {
    address: u16,
    and_mask: u16,
    or_mask: u16,
}

impl MaskWriteRegisterResponse {
    pub const fn new(address: u16, and_mask: u16, or_mask: u16) -> Self {
        Self {
            address,
            and_mask,
            or_mask,
        }
    }

    pub fn echo(request: &MaskWriteRegisterRequest) -> Self {
        Self::new(request.address(), request.and_mask(), request.or_mask())
    }

    pub fn address(&self) -> u16 {
        self.address
    }

    pub fn and_mask(&self) -> u16 {
        self.and_mask
    }

    pub fn or_mask(&self) -> u16 {
        self.or_mask
    }
}

impl PduBody for MaskWriteRegisterResponse {
    fn function_code(&self) -> u8 {
        FunctionCode::MaskWriteRegister.as_u8()
    }

    fn payload_size(&self) -> usize {
        6
    }

    fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        w.write_be_u16(self.address)?;
        w.write_be_u16(self.and_mask)?;
        w.write_be_u16(self.or_mask)
    }

    fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
        let address = r.read_be_u16()?;
        let and_mask = r.read_be_u16()?;
        let or_mask = r.read_be_u16()?;
        *self = Self::new(address, and_mask, or_mask);
        Ok(())
    }
}

/// FIFO contents, oldest value first (FC24).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadFifoQueueResponse {
    values: Vec<u16>,
}

impl ReadFifoQueueResponse {
    pub fn new(values: Vec<u16>) -> Result<Self, NumberOutOfRange> {
        NumberOutOfRange::check_len("fifo count", values.len(), 0, usize::from(MAX_FIFO_COUNT))?;
        Ok(Self { values })
    }

    pub fn values(&self) -> &[u16] {
        &self.values
    }
}

impl PduBody for ReadFifoQueueResponse {
    fn function_code(&self) -> u8 {
        FunctionCode::ReadFifoQueue.as_u8()
    }

    fn payload_size(&self) -> usize {
        4 + self.values.len() * 2
    }

    fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        let count = NumberOutOfRange::check_len(
            "fifo count",
            self.values.len(),
            0,
            usize::from(MAX_FIFO_COUNT),
        )?;
        w.write_be_u16((2 + count * 2) as u16)?;
        w.write_be_u16(count as u16)?;
        write_registers(w, &self.values)
    }

    fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
        let byte_count = r.read_be_u16()?;
        let count = NumberOutOfRange::check("fifo count", r.read_be_u16()?, 0, MAX_FIFO_COUNT)?;
        if u32::from(byte_count) != 2 + u32::from(count) * 2 {
            return Err(DecodeError::InvalidLength);
        }
        self.values = read_registers(r, usize::from(count))?;
        Ok(())
    }
}

/// Stand-in for a response whose function code this codec does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalFunctionResponse {
    function_code: u8,
}

impl IllegalFunctionResponse {
    pub(crate) const fn new(function_code: u8) -> Self {
        Self { function_code }
    }
}

impl PduBody for IllegalFunctionResponse {
    fn function_code(&self) -> u8 {
        self.function_code
    }

    fn payload_size(&self) -> usize {
        0
    }

    fn encode_payload<W: ModbusOutput + ?Sized>(&self, _w: &mut W) -> Result<(), EncodeError> {
        Ok(())
    }

    fn decode_payload<R: ModbusInput + ?Sized>(&mut self, _r: &mut R) -> Result<(), DecodeError> {
        Ok(())
    }
}

pdu_union! {
    /// Every response payload this codec understands, the exception reply and the sentinel.
    pub enum ResponsePdu {
        ReadCoils(ReadCoilsResponse),
        ReadDiscreteInputs(ReadDiscreteInputsResponse),
        ReadHoldingRegisters(ReadHoldingRegistersResponse),
        ReadInputRegisters(ReadInputRegistersResponse),
        WriteSingleCoil(WriteSingleCoilResponse),
        WriteSingleRegister(WriteSingleRegisterResponse),
        ReadExceptionStatus(ReadExceptionStatusResponse),
        GetCommEventCounter(GetCommEventCounterResponse),
        GetCommEventLog(GetCommEventLogResponse),
        WriteMultipleCoils(WriteMultipleCoilsResponse),
        WriteMultipleRegisters(WriteMultipleRegistersResponse),
        ReportSlaveId(ReportSlaveIdResponse),
        ReadFileRecord(ReadFileRecordResponse),
        WriteFileRecord(WriteFileRecordResponse),
        MaskWriteRegister(MaskWriteRegisterResponse),
        ReadWriteMultipleRegisters(ReadWriteMultipleRegistersResponse),
        ReadFifoQueue(ReadFifoQueueResponse),
        Exception(ExceptionResponse),
        IllegalFunction(IllegalFunctionResponse),
    }
}

impl ResponsePdu {
    pub fn is_exception(&self) -> bool {
        matches!(self, Self::Exception(_))
    }

    pub fn is_illegal_function(&self) -> bool {
        matches!(self, Self::IllegalFunction(_))
    }
}

pub type Response = Message<ResponsePdu>;
