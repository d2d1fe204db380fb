//! Answers decoded requests from a [`MemoryMap`], the way a simulated slave does.

use crate::error::MemoryMapError;
use crate::memory_map::MemoryMap;
use mbcodec_core::pdu::{
    ExceptionCode, ExceptionResponse, MaskWriteRegisterResponse, Message, PduBody,
    ReadCoilsResponse, ReadDiscreteInputsResponse, ReadExceptionStatusResponse,
    ReadFifoQueueResponse, ReadHoldingRegistersResponse, ReadInputRegistersResponse,
    ReadWriteMultipleRegistersResponse, ReportSlaveIdResponse, Request, RequestPdu, Response,
    ResponsePdu, WriteMultipleCoilsResponse, WriteMultipleRegistersResponse,
    WriteSingleCoilResponse, WriteSingleRegisterResponse,
};
use mbcodec_core::NumberOutOfRange;
use tracing::debug;

/// Why a request could not be answered normally.
#[derive(Debug)]
enum Failure {
    Map(MemoryMapError),
    Encode(NumberOutOfRange),
    Exception(ExceptionCode),
}

impl From<MemoryMapError> for Failure {
    fn from(err: MemoryMapError) -> Self {
        Self::Map(err)
    }
}

impl From<NumberOutOfRange> for Failure {
    fn from(err: NumberOutOfRange) -> Self {
        Self::Encode(err)
    }
}

impl Failure {
    fn exception_code(&self) -> ExceptionCode {
        match self {
            Self::Map(MemoryMapError::AddressOutOfRange { .. }) => {
                ExceptionCode::IllegalDataAddress
            }
            Self::Map(_) | Self::Encode(_) => ExceptionCode::ServerDeviceFailure,
            Self::Exception(code) => *code,
        }
    }
}

/// Produces the response a slave holding `map` sends for `request`.
///
/// Never fails: anything the map cannot serve becomes an exception response
/// carrying the request's function code.
pub fn handle(map: &mut MemoryMap, request: &Request) -> Response {
    let function_code = request.function_code();
    let pdu = match respond(map, request.pdu()) {
        Ok(pdu) => pdu,
        Err(failure) => {
            let code = failure.exception_code();
            debug!(
                server_address = request.server_address().get(),
                function_code,
                exception = ?code,
                reason = ?failure,
                "answering request with exception"
            );
            ResponsePdu::Exception(ExceptionResponse::new(function_code, code))
        }
    };
    Message::new(request.server_address(), pdu)
}

fn respond(map: &mut MemoryMap, request: &RequestPdu) -> Result<ResponsePdu, Failure> {
    let pdu: ResponsePdu = match request {
        RequestPdu::ReadCoils(req) => {
            let values = map.coils.read(req.start_address(), req.quantity())?;
            ReadCoilsResponse::new(values)?.into()
        }
        RequestPdu::ReadDiscreteInputs(req) => {
            let values = map
                .discrete_inputs
                .read(req.start_address(), req.quantity())?;
            ReadDiscreteInputsResponse::new(values)?.into()
        }
        RequestPdu::ReadHoldingRegisters(req) => {
            let values = map
                .holding_registers
                .read(req.start_address(), req.quantity())?;
            ReadHoldingRegistersResponse::new(values.to_vec())?.into()
        }
        RequestPdu::ReadInputRegisters(req) => {
            let values = map
                .input_registers
                .read(req.start_address(), req.quantity())?;
            ReadInputRegistersResponse::new(values.to_vec())?.into()
        }
        RequestPdu::WriteSingleCoil(req) => {
            map.coils.set(req.address(), req.value())?;
            WriteSingleCoilResponse::echo(req).into()
        }
        RequestPdu::WriteSingleRegister(req) => {
            map.holding_registers.set(req.address(), req.value())?;
            WriteSingleRegisterResponse::echo(req).into()
        }
        RequestPdu::ReadExceptionStatus(_) => {
            ReadExceptionStatusResponse::new(map.exception_status()).into()
        }
        RequestPdu::WriteMultipleCoils(req) => {
            map.coils.write(req.start_address(), req.values())?;
            WriteMultipleCoilsResponse::new(req.start_address(), req.quantity())?.into()
        }
        RequestPdu::WriteMultipleRegisters(req) => {
            map.holding_registers
                .write(req.start_address(), req.values())?;
            WriteMultipleRegistersResponse::new(req.start_address(), req.quantity())?.into()
        }
        RequestPdu::ReportSlaveId(_) => {
            let slave_id = map
                .slave_id
                .as_ref()
                .ok_or(Failure::Exception(ExceptionCode::IllegalFunction))?;
            ReportSlaveIdResponse::new(slave_id.to_bytes())?.into()
        }
        RequestPdu::MaskWriteRegister(req) => {
            let current = map.holding_registers.read(req.address(), 1)?[0];
            map.holding_registers
                .set(req.address(), req.apply(current))?;
            MaskWriteRegisterResponse::echo(req).into()
        }
        RequestPdu::ReadWriteMultipleRegisters(req) => {
            // Both ranges are checked before the write, which happens before the read.
            map.holding_registers
                .read(req.read_start_address(), req.read_quantity())?;
            map.holding_registers
                .write(req.write_start_address(), req.values())?;
            let values = map
                .holding_registers
                .read(req.read_start_address(), req.read_quantity())?;
            ReadWriteMultipleRegistersResponse::new(values.to_vec())?.into()
        }
        RequestPdu::ReadFifoQueue(req) => {
            if req.fifo_pointer_address() != map.fifo_queue.pointer_address() {
                return Err(Failure::Exception(ExceptionCode::IllegalDataAddress));
            }
            ReadFifoQueueResponse::new(map.fifo_queue.values())?.into()
        }
        RequestPdu::GetCommEventCounter(_)
        | RequestPdu::GetCommEventLog(_)
        | RequestPdu::ReadFileRecord(_)
        | RequestPdu::WriteFileRecord(_)
        | RequestPdu::IllegalFunction(_) => {
            return Err(Failure::Exception(ExceptionCode::IllegalFunction));
        }
    };
    debug_assert_eq!(pdu.function_code(), request.function_code());
    Ok(pdu)
}
