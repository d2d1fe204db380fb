use crate::encoding::{ModbusInput, ModbusOutput};
use crate::pdu::limits::{
    check_block, len_as_quantity, MAX_READ_BITS, MAX_READ_REGISTERS, MAX_RW_WRITE_REGISTERS,
    MAX_WRITE_COILS, MAX_WRITE_REGISTERS,
};
use crate::pdu::message::{pack_bits, pdu_union, read_registers, unpack_bits, write_registers};
use crate::pdu::{
    FunctionCode, Message, PduBody, ReadFileRecordRequest, WriteFileRecordRequest,
};
use crate::{DecodeError, EncodeError, NumberOutOfRange};

pub(crate) fn decode_coil_value(raw: u16) -> Result<bool, DecodeError> {
    match raw {
        0xFF00 => Ok(true),
        0x0000 => Ok(false),
        _ => Err(DecodeError::InvalidValue),
    }
}

pub(crate) const fn encode_coil_value(value: bool) -> u16 {
    if value {
        0xFF00
    } else {
        0x0000
    }
}

/// Start address + quantity requests (FC01..FC04).
macro_rules! block_read_request {
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

/// Requests that are nothing but a function code.
macro_rules! empty_request {
    ($(#[$meta:meta])* $name:ident, $function:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl $name {
            pub const fn new() -> Self {
                Self
            }
        }

        impl PduBody for $name {
            fn function_code(&self) -> u8 {
                $function.as_u8()
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
    };
}

block_read_request!(ReadCoilsRequest, FunctionCode::ReadCoils, MAX_READ_BITS);
block_read_request!(
    ReadDiscreteInputsRequest,
    FunctionCode::ReadDiscreteInputs,
    MAX_READ_BITS
);
block_read_request!(
    ReadHoldingRegistersRequest,
    FunctionCode::ReadHoldingRegisters,
    MAX_READ_REGISTERS
);
block_read_request!(
    ReadInputRegistersRequest,
    FunctionCode::ReadInputRegisters,
    MAX_READ_REGISTERS
);

empty_request!(ReadExceptionStatusRequest, FunctionCode::ReadExceptionStatus);
empty_request!(GetCommEventCounterRequest, FunctionCode::GetCommEventCounter);
empty_request!(GetCommEventLogRequest, FunctionCode::GetCommEventLog);
empty_request!(ReportSlaveIdRequest, FunctionCode::ReportSlaveId);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSingleCoilRequest {
    address: u16,
    value: bool,
}

impl WriteSingleCoilRequest {
    pub const fn new(address: u16, value: bool) -> Self {
        Self { address, value }
    }

    pub fn address(&self) -> u16 {
        self.address
    }

    pub fn value(&self) -> bool {
        self.value
    }
}

impl PduBody for WriteSingleCoilRequest {
    fn function_code(&self) -> u8 {
        FunctionCode::WriteSingleCoil.as_u8()
    }

    fn payload_size(&self) -> usize {
        4
    }

    fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        w.write_be_u16(self.address)?;
        w.write_be_u16(encode_coil_value(self.value))?;
        Ok(())
    }

    fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
        let address = r.read_be_u16()?;
        let value = decode_coil_value(r.read_be_u16()?)?;
        *self = Self::new(address, value);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSingleRegisterRequest {
    address: u16,
    value: u16,
}

impl WriteSingleRegisterRequest {
    pub const fn new(address: u16, value: u16) -> Self {
        Self { address, value }
    }

    pub fn address(&self) -> u16 {
        self.address
    }

    pub fn value(&self) -> u16 {
        self.value
    }
}

impl PduBody for WriteSingleRegisterRequest {
    fn function_code(&self) -> u8 {
        FunctionCode::WriteSingleRegister.as_u8()
    }

    fn payload_size(&self) -> usize {
        4
    }

    fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        w.write_be_u16(self.address)?;
        w.write_be_u16(self.value)?;
        Ok(())
    }

    fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
        let address = r.read_be_u16()?;
        let value = r.read_be_u16()?;
        *self = Self::new(address, value);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteMultipleCoilsRequest {
    start_address: u16,
    values: Vec<bool>,
}

impl WriteMultipleCoilsRequest {
    pub fn new(start_address: u16, values: Vec<bool>) -> Result<Self, NumberOutOfRange> {
        let quantity = len_as_quantity("quantity", values.len(), MAX_WRITE_COILS)?;
        check_block("quantity", start_address, quantity, MAX_WRITE_COILS)?;
        Ok(Self {
            start_address,
            values,
        })
    }

    pub fn start_address(&self) -> u16 {
        self.start_address
    }

    pub fn values(&self) -> &[bool] {
        &self.values
    }

    pub fn quantity(&self) -> u16 {
        self.values.len() as u16
    }

    fn byte_count(&self) -> usize {
        self.values.len().div_ceil(8)
    }
}

impl PduBody for WriteMultipleCoilsRequest {
    fn function_code(&self) -> u8 {
        FunctionCode::WriteMultipleCoils.as_u8()
    }

    fn payload_size(&self) -> usize {
        5 + self.byte_count()
    }

    fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        let quantity = len_as_quantity("quantity", self.values.len(), MAX_WRITE_COILS)?;
        w.write_be_u16(self.start_address)?;
        w.write_be_u16(quantity)?;
        w.write_u8(self.byte_count() as u8)?;
        w.write_all(&pack_bits(&self.values))?;
        Ok(())
    }

    fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
        let start_address = r.read_be_u16()?;
        let quantity = r.read_be_u16()?;
        check_block("quantity", start_address, quantity, MAX_WRITE_COILS)?;
        let byte_count = usize::from(r.read_u8()?);
        let expected = usize::from(quantity).div_ceil(8);
        if byte_count != expected {
            return Err(DecodeError::InvalidLength);
        }
        let packed = r.read_vec(byte_count)?;
        *self = Self::new(start_address, unpack_bits(&packed, usize::from(quantity)))?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteMultipleRegistersRequest {
    start_address: u16,
    values: Vec<u16>,
}

impl WriteMultipleRegistersRequest {
    pub fn new(start_address: u16, values: Vec<u16>) -> Result<Self, NumberOutOfRange> {
        let quantity = len_as_quantity("quantity", values.len(), MAX_WRITE_REGISTERS)?;
        check_block("quantity", start_address, quantity, MAX_WRITE_REGISTERS)?;
        Ok(Self {
            start_address,
            values,
        })
    }

    pub fn start_address(&self) -> u16 {
        self.start_address
    }

    pub fn values(&self) -> &[u16] {
        &self.values
    }

    pub fn quantity(&self) -> u16 {
        self.values.len() as u16
    }
}

impl PduBody for WriteMultipleRegistersRequest {
    fn function_code(&self) -> u8 {
        FunctionCode::WriteMultipleRegisters.as_u8()
    }

    fn payload_size(&self) -> usize {
        5 + self.values.len() * 2
    }

    fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        let quantity = len_as_quantity("quantity", self.values.len(), MAX_WRITE_REGISTERS)?;
        w.write_be_u16(self.start_address)?;
        w.write_be_u16(quantity)?;
        w.write_u8((self.values.len() * 2) as u8)?;
        write_registers(w, &self.values)
    }

    fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
        let start_address = r.read_be_u16()?;
        let quantity = r.read_be_u16()?;
        check_block("quantity", start_address, quantity, MAX_WRITE_REGISTERS)?;
        let byte_count = usize::from(r.read_u8()?);
        if byte_count != usize::from(quantity) * 2 {
            return Err(DecodeError::InvalidLength);
        }
        let values = read_registers(r, usize::from(quantity))?;
        *self = Self::new(start_address, values)?;
        Ok(())
    }
}

/// Register result = (current AND and_mask) OR (or_mask AND NOT and_mask).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaskWriteRegisterRequest {
    address: u16,
    and_mask: u16,
    or_mask: u16,
}

impl MaskWriteRegisterRequest {
    pub const fn new(address: u16, and_mask: u16, or_mask: u16) -> Self {
        Self {
            address,
            and_mask,
            or_mask,
        }
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

    pub fn apply(&self, current: u16) -> u16 {
        (current & self.and_mask) | (self.or_mask & !self.and_mask)
    }
}

impl PduBody for MaskWriteRegisterRequest {
    fn function_code(&self) -> u8 {
        FunctionCode::MaskWriteRegister.as_u8()
    }

    fn payload_size(&self) -> usize {
        6
    }

    fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        w.write_be_u16(self.address)?;
        w.write_be_u16(self.and_mask)?;
        w.write_be_u16(self.or_mask)?;
        Ok(())
    }

    fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
        let address = r.read_be_u16()?;
        let and_mask = r.read_be_u16()?;
        let or_mask = r.read_be_u16()?;
        *self = Self::new(address, and_mask, or_mask);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadWriteMultipleRegistersRequest {
    read_start_address: u16,
    read_quantity: u16,
    write_start_address: u16,
    values: Vec<u16>,
}

impl ReadWriteMultipleRegistersRequest {
    pub fn new(
        read_start_address: u16,
        read_quantity: u16,
        write_start_address: u16,
        values: Vec<u16>,
    ) -> Result<Self, NumberOutOfRange> {
        check_block("read quantity", read_start_address, read_quantity, MAX_READ_REGISTERS)?;
        let write_quantity = len_as_quantity("write quantity", values.len(), MAX_RW_WRITE_REGISTERS)?;
        check_block(
            "write quantity",
            write_start_address,
            write_quantity,
            MAX_RW_WRITE_REGISTERS,
        )?;
        Ok(Self {
            read_start_address,
            read_quantity,
            write_start_address,
            values,
        })
    }

    pub fn read_start_address(&self) -> u16 {
        self.read_start_address
    }

    pub fn read_quantity(&self) -> u16 {
        self.read_quantity
    }

    pub fn write_start_address(&self) -> u16 {
        self.write_start_address
    }

    pub fn values(&self) -> &[u16] {
        &self.values
    }

    pub fn write_quantity(&self) -> u16 {
        self.values.len() as u16
    }
}

impl PduBody for ReadWriteMultipleRegistersRequest {
    fn function_code(&self) -> u8 {
        FunctionCode::ReadWriteMultipleRegisters.as_u8()
    }

    fn payload_size(&self) -> usize {
        9 + self.values.len() * 2
    }

    fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        check_block(
            "read quantity",
            self.read_start_address,
            self.read_quantity,
            MAX_READ_REGISTERS,
        )?;
        let write_quantity = len_as_quantity("write quantity", self.values.len(), MAX_RW_WRITE_REGISTERS)?;
        w.write_be_u16(self.read_start_address)?;
        w.write_be_u16(self.read_quantity)?;
        w.write_be_u16(self.write_start_address)?;
        w.write_be_u16(write_quantity)?;
        w.write_u8((self.values.len() * 2) as u8)?;
        write_registers(w, &self.values)
    }

    fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
        let read_start_address = r.read_be_u16()?;
        let read_quantity = r.read_be_u16()?;
        let write_start_address = r.read_be_u16()?;
        let write_quantity = r.read_be_u16()?;
        check_block(
            "write quantity",
            write_start_address,
            write_quantity,
            MAX_RW_WRITE_REGISTERS,
        )?;
        let byte_count = usize::from(r.read_u8()?);
        if byte_count != usize::from(write_quantity) * 2 {
            return Err(DecodeError::InvalidLength);
        }
        let values = read_registers(r, usize::from(write_quantity))?;
        *self = Self::new(read_start_address, read_quantity, write_start_address, values)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadFifoQueueRequest {
    fifo_pointer_address: u16,
}

impl ReadFifoQueueRequest {
    pub const fn new(fifo_pointer_address: u16) -> Self {
        Self {
            fifo_pointer_address,
        }
    }

    pub fn fifo_pointer_address(&self) -> u16 {
        self.fifo_pointer_address
    }
}

impl PduBody for ReadFifoQueueRequest {
    fn function_code(&self) -> u8 {
        FunctionCode::ReadFifoQueue.as_u8()
    }

    fn payload_size(&self) -> usize {
        2
    }

    fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        w.write_be_u16(self.fifo_pointer_address)
    }

    fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
        self.fifo_pointer_address = r.read_be_u16()?;
        Ok(())
    }
}

/// Stand-in for any function code this codec has no request type for.
///
/// Carries the raw code so the server can echo it in an illegal-function
/// exception response. The payload is never consumed, because its length is
/// unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalFunctionRequest {
    function_code: u8,
}

impl IllegalFunctionRequest {
    pub(crate) const fn new(function_code: u8) -> Self {
        Self { function_code }
    }
}

impl PduBody for IllegalFunctionRequest {
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
    /// Every request payload this codec understands, plus the sentinel.
    pub enum RequestPdu {
        ReadCoils(ReadCoilsRequest),
        ReadDiscreteInputs(ReadDiscreteInputsRequest),
        ReadHoldingRegisters(ReadHoldingRegistersRequest),
        ReadInputRegisters(ReadInputRegistersRequest),
        WriteSingleCoil(WriteSingleCoilRequest),
        WriteSingleRegister(WriteSingleRegisterRequest),
        ReadExceptionStatus(ReadExceptionStatusRequest),
        GetCommEventCounter(GetCommEventCounterRequest),
        GetCommEventLog(GetCommEventLogRequest),
        WriteMultipleCoils(WriteMultipleCoilsRequest),
        WriteMultipleRegisters(WriteMultipleRegistersRequest),
        ReportSlaveId(ReportSlaveIdRequest),
        ReadFileRecord(ReadFileRecordRequest),
        WriteFileRecord(WriteFileRecordRequest),
        MaskWriteRegister(MaskWriteRegisterRequest),
        ReadWriteMultipleRegisters(ReadWriteMultipleRegistersRequest),
        ReadFifoQueue(ReadFifoQueueRequest),
        IllegalFunction(IllegalFunctionRequest),
    }
}

impl RequestPdu {
    pub fn function(&self) -> FunctionCode {
        FunctionCode::from_u8(self.function_code())
    }

    pub fn is_illegal_function(&self) -> bool {
        matches!(self, Self::IllegalFunction(_))
    }
}

pub type Request = Message<RequestPdu>;

#[cfg(test)]
mod tests {
    use super::{
        IllegalFunctionRequest, MaskWriteRegisterRequest, ReadCoilsRequest,
        ReadHoldingRegistersRequest, ReadWriteMultipleRegistersRequest, Request, RequestPdu,
        WriteMultipleCoilsRequest, WriteMultipleRegistersRequest, WriteSingleCoilRequest,
    };
    use crate::encoding::{Reader, Writer};
    use crate::pdu::{FunctionCode, Message, PduBody, ServerAddress};
    use crate::{DecodeError, EncodeError};

    fn unit(address: u8) -> ServerAddress {
        ServerAddress::new(address).unwrap()
    }

    #[test]
    fn read_holding_validates_quantity() {
        assert_eq!(ReadHoldingRegistersRequest::new(0, 0).unwrap_err().field, "quantity");
        assert!(ReadHoldingRegistersRequest::new(0, 126).is_err());
        assert!(ReadHoldingRegistersRequest::new(0xFFFF, 2).is_err());
        assert!(ReadCoilsRequest::new(0, 2000).is_ok());
    }

    #[test]
    fn shell_with_zero_quantity_refuses_to_encode() {
        let shell = Message::<ReadCoilsRequest>::shell(unit(1));
        let mut buf = [0u8; 8];
        let mut w = Writer::new(&mut buf);
        assert!(matches!(shell.encode(&mut w).unwrap_err(), EncodeError::OutOfRange(_)));
    }

    #[test]
    fn write_multiple_coils_packs_lsb_first() {
        let req = WriteMultipleCoilsRequest::new(
            0x0013,
            vec![true, false, true, true, false, false, true, false, true],
        )
        .unwrap();
        let mut out = Vec::new();
        req.encode_payload(&mut out).unwrap();
        assert_eq!(out, vec![0x00, 0x13, 0x00, 0x09, 0x02, 0b0100_1101, 0b0000_0001]);
        assert_eq!(req.payload_size(), out.len());
    }

    #[test]
    fn write_multiple_registers_rejects_too_many() {
        let err = WriteMultipleRegistersRequest::new(0, vec![0u16; 124]).unwrap_err();
        assert_eq!(err.value, 124);
        assert_eq!(err.max, 123);
    }

    #[test]
    fn enum_dispatch_encodes_header() {
        let req: Request = Message::new(
            unit(0x11),
            ReadHoldingRegistersRequest::new(0x006B, 3).unwrap(),
        )
        .convert();
        assert_eq!(
            req.encode_to_vec().unwrap(),
            vec![0x11, 0x03, 0x00, 0x6B, 0x00, 0x03]
        );
        assert_eq!(req.pdu().function(), FunctionCode::ReadHoldingRegisters);
        assert_eq!(req.pdu_size(), 5);
    }

    #[test]
    fn decode_rejects_invalid_fc16_byte_count() {
        let mut req = WriteMultipleRegistersRequest::default();
        let mut r = Reader::new(&[0x00, 0x00, 0x00, 0x02, 0x03, 0x12, 0x34, 0x56]);
        assert_eq!(req.decode_payload(&mut r).unwrap_err(), DecodeError::InvalidLength);
        assert_eq!(req, WriteMultipleRegistersRequest::default());
    }

    #[test]
    fn decode_rejects_invalid_single_coil_value() {
        let mut req = WriteSingleCoilRequest::default();
        let mut r = Reader::new(&[0x00, 0x01, 0x12, 0x34]);
        assert_eq!(req.decode_payload(&mut r).unwrap_err(), DecodeError::InvalidValue);
    }

    #[test]
    fn decode_fc15_request_bits() {
        let mut req = WriteMultipleCoilsRequest::default();
        let mut r = Reader::new(&[0x00, 0x13, 0x00, 0x09, 0x02, 0b0100_1101, 0b0000_0001]);
        req.decode_payload(&mut r).unwrap();
        assert_eq!(req.start_address(), 0x0013);
        assert_eq!(req.quantity(), 9);
        assert_eq!(
            req.values(),
            &[true, false, true, true, false, false, true, false, true]
        );
        assert!(r.is_empty());
    }

    #[test]
    fn mask_write_register_applies_masks() {
        let req = MaskWriteRegisterRequest::new(0x0004, 0x00F2, 0x0025);
        assert_eq!(req.apply(0x0012), 0x0017);
    }

    #[test]
    fn read_write_multiple_registers_layout() {
        let req = ReadWriteMultipleRegistersRequest::new(0x0010, 2, 0x0020, vec![0x1111, 0x2222])
            .unwrap();
        let mut out = Vec::new();
        req.encode_payload(&mut out).unwrap();
        assert_eq!(
            out,
            vec![0x00, 0x10, 0x00, 0x02, 0x00, 0x20, 0x00, 0x02, 0x04, 0x11, 0x11, 0x22, 0x22]
        );

        let mut decoded = ReadWriteMultipleRegistersRequest::default();
        decoded.decode_payload(&mut Reader::new(&out)).unwrap();
        assert_eq!(decoded, req);
    }

    #[test]
    fn decode_rejects_invalid_fc23_byte_count() {
        let mut req = ReadWriteMultipleRegistersRequest::default();
        let mut r = Reader::new(&[0x00, 0x10, 0x00, 0x01, 0x00, 0x20, 0x00, 0x01, 0x01, 0x12]);
        assert_eq!(req.decode_payload(&mut r).unwrap_err(), DecodeError::InvalidLength);
    }

    #[test]
    fn illegal_function_reports_raw_code() {
        let pdu = RequestPdu::from(IllegalFunctionRequest::new(0x41));
        assert_eq!(pdu.function_code(), 0x41);
        assert_eq!(pdu.function(), FunctionCode::Custom(0x41));
        assert_eq!(pdu.payload_size(), 0);
        assert!(pdu.is_illegal_function());
    }

    #[test]
    fn union_downcasts_to_concrete_type() {
        let pdu = RequestPdu::from(WriteSingleCoilRequest::new(7, true));
        let coil = WriteSingleCoilRequest::try_from(pdu).unwrap();
        assert!(coil.value());
        assert!(ReadCoilsRequest::try_from(RequestPdu::from(coil)).is_err());
    }
}
