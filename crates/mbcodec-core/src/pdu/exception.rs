use crate::encoding::{ModbusInput, ModbusOutput};
use crate::pdu::PduBody;
use crate::{DecodeError, EncodeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExceptionCode {
    IllegalFunction,
    IllegalDataAddress,
    IllegalDataValue,
    ServerDeviceFailure,
    Acknowledge,
    ServerDeviceBusy,
    NegativeAcknowledge,
    MemoryParityError,
    GatewayPathUnavailable,
    GatewayTargetFailedToRespond,
    Unknown(u8),
}

impl ExceptionCode {
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0x01 => Self::IllegalFunction,
            0x02 => Self::IllegalDataAddress,
            0x03 => Self::IllegalDataValue,
            0x04 => Self::ServerDeviceFailure,
            0x05 => Self::Acknowledge,
            0x06 => Self::ServerDeviceBusy,
            0x07 => Self::NegativeAcknowledge,
            0x08 => Self::MemoryParityError,
            0x0A => Self::GatewayPathUnavailable,
            0x0B => Self::GatewayTargetFailedToRespond,
            other => Self::Unknown(other),
        }
    }

    pub const fn as_u8(self) -> u8 {
        match self {
            Self::IllegalFunction => 0x01,
            Self::IllegalDataAddress => 0x02,
            Self::IllegalDataValue => 0x03,
            Self::ServerDeviceFailure => 0x04,
            Self::Acknowledge => 0x05,
            Self::ServerDeviceBusy => 0x06,
            Self::NegativeAcknowledge => 0x07,
            Self::MemoryParityError => 0x08,
            Self::GatewayPathUnavailable => 0x0A,
            Self::GatewayTargetFailedToRespond => 0x0B,
            Self::Unknown(raw) => raw,
        }
    }
}

/// Error reply: the request's function code with bit 7 set, then one code byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExceptionResponse {
    function_code: u8,
    exception_code: ExceptionCode,
}

impl ExceptionResponse {
    /// `function_code` is the request's code; the exception bit is applied on the wire.
    pub const fn new(function_code: u8, exception_code: ExceptionCode) -> Self {
        Self {
            function_code: function_code & 0x7F,
            exception_code,
        }
    }

    /// Raw function code without the exception bit.
    pub const fn request_function_code(&self) -> u8 {
        self.function_code
    }

    pub const fn exception_code(&self) -> ExceptionCode {
        self.exception_code
    }
}

impl PduBody for ExceptionResponse {
    fn function_code(&self) -> u8 {
        self.function_code | 0x80
    }

    fn payload_size(&self) -> usize {
        1
    }

    fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        w.write_u8(self.exception_code.as_u8())
    }

    fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
        self.exception_code = ExceptionCode::from_u8(r.read_u8()?);
        Ok(())
    }
}
