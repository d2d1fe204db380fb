/// The standard Modbus function-code catalog.
///
/// `Custom` carries any byte outside the catalog. Codes with bit 7 set are
/// exception responses and are classified by [`FunctionCode::is_exception`]
/// rather than by this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FunctionCode {
    ReadCoils,
    ReadDiscreteInputs,
    ReadHoldingRegisters,
    ReadInputRegisters,
    WriteSingleCoil,
    WriteSingleRegister,
    ReadExceptionStatus,
    Diagnostics,
    GetCommEventCounter,
    GetCommEventLog,
    WriteMultipleCoils,
    WriteMultipleRegisters,
    ReportSlaveId,
    ReadFileRecord,
    WriteFileRecord,
    MaskWriteRegister,
    ReadWriteMultipleRegisters,
    ReadFifoQueue,
    /// Encapsulated interface transport; carries both the CANopen general
    /// reference and read device identification MEI types.
    EncapsulatedInterfaceTransport,
    Custom(u8),
}

impl FunctionCode {
    /// Every catalog entry in ascending code order.
    pub const CATALOG: [FunctionCode; 19] = [
        Self::ReadCoils,
        Self::ReadDiscreteInputs,
        Self::ReadHoldingRegisters,
        Self::ReadInputRegisters,
        Self::WriteSingleCoil,
        Self::WriteSingleRegister,
        Self::ReadExceptionStatus,
        Self::Diagnostics,
        Self::GetCommEventCounter,
        Self::GetCommEventLog,
        Self::WriteMultipleCoils,
        Self::WriteMultipleRegisters,
        Self::ReportSlaveId,
        Self::ReadFileRecord,
        Self::WriteFileRecord,
        Self::MaskWriteRegister,
        Self::ReadWriteMultipleRegisters,
        Self::ReadFifoQueue,
        Self::EncapsulatedInterfaceTransport,
    ];

    pub const fn as_u8(self) -> u8 {
        match self {
            Self::ReadCoils => 0x01,
            Self::ReadDiscreteInputs => 0x02,
            Self::ReadHoldingRegisters => 0x03,
            Self::ReadInputRegisters => 0x04,
            Self::WriteSingleCoil => 0x05,
            Self::WriteSingleRegister => 0x06,
            Self::ReadExceptionStatus => 0x07,
            Self::Diagnostics => 0x08,
            Self::GetCommEventCounter => 0x0B,
            Self::GetCommEventLog => 0x0C,
            Self::WriteMultipleCoils => 0x0F,
            Self::WriteMultipleRegisters => 0x10,
            Self::ReportSlaveId => 0x11,
            Self::ReadFileRecord => 0x14,
            Self::WriteFileRecord => 0x15,
            Self::MaskWriteRegister => 0x16,
            Self::ReadWriteMultipleRegisters => 0x17,
            Self::ReadFifoQueue => 0x18,
            Self::EncapsulatedInterfaceTransport => 0x2B,
            Self::Custom(code) => code,
        }
    }

    /// Total over `u8`: anything outside the catalog becomes `Custom`.
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0x01 => Self::ReadCoils,
            0x02 => Self::ReadDiscreteInputs,
            0x03 => Self::ReadHoldingRegisters,
            0x04 => Self::ReadInputRegisters,
            0x05 => Self::WriteSingleCoil,
            0x06 => Self::WriteSingleRegister,
            0x07 => Self::ReadExceptionStatus,
            0x08 => Self::Diagnostics,
            0x0B => Self::GetCommEventCounter,
            0x0C => Self::GetCommEventLog,
            0x0F => Self::WriteMultipleCoils,
            0x10 => Self::WriteMultipleRegisters,
            0x11 => Self::ReportSlaveId,
            0x14 => Self::ReadFileRecord,
            0x15 => Self::WriteFileRecord,
            0x16 => Self::MaskWriteRegister,
            0x17 => Self::ReadWriteMultipleRegisters,
            0x18 => Self::ReadFifoQueue,
            0x2B => Self::EncapsulatedInterfaceTransport,
            other => Self::Custom(other),
        }
    }

    pub const fn is_exception(value: u8) -> bool {
        (value & 0x80) != 0
    }

    /// Whether this codec carries a dedicated payload type for the code.
    ///
    /// Diagnostics and encapsulated interface transport are part of the
    /// catalog but decode to the illegal-function sentinel.
    pub const fn has_payload_codec(self) -> bool {
        !matches!(
            self,
            Self::Diagnostics | Self::EncapsulatedInterfaceTransport | Self::Custom(_)
        )
    }
}

impl From<u8> for FunctionCode {
    fn from(value: u8) -> Self {
        Self::from_u8(value)
    }
}

impl From<FunctionCode> for u8 {
    fn from(value: FunctionCode) -> Self {
        value.as_u8()
    }
}

#[cfg(test)]
mod tests {
    use super::FunctionCode;

    #[test]
    fn parses_known_codes() {
        assert_eq!(FunctionCode::from_u8(0x03), FunctionCode::ReadHoldingRegisters);
        assert_eq!(FunctionCode::from_u8(0x07), FunctionCode::ReadExceptionStatus);
        assert_eq!(FunctionCode::from_u8(0x10), FunctionCode::WriteMultipleRegisters);
        assert_eq!(FunctionCode::from_u8(0x16), FunctionCode::MaskWriteRegister);
        assert_eq!(FunctionCode::from_u8(0x18), FunctionCode::ReadFifoQueue);
        assert_eq!(
            FunctionCode::from_u8(0x17),
            FunctionCode::ReadWriteMultipleRegisters
        );
    }

    #[test]
    fn preserves_custom_codes() {
        assert_eq!(FunctionCode::from_u8(0x41), FunctionCode::Custom(0x41));
        assert_eq!(FunctionCode::from_u8(0x00), FunctionCode::Custom(0x00));
    }

    #[test]
    fn catalog_roundtrips_through_u8() {
        for code in FunctionCode::CATALOG {
            assert_eq!(FunctionCode::from_u8(code.as_u8()), code);
        }
        assert!(FunctionCode::CATALOG
            .windows(2)
            .all(|pair| pair[0].as_u8() < pair[1].as_u8()));
    }

    #[test]
    fn exception_bit_is_detected() {
        assert!(FunctionCode::is_exception(0x83));
        assert!(!FunctionCode::is_exception(0x03));
    }

    #[test]
    fn reserved_codes_have_no_payload_codec() {
        assert!(!FunctionCode::Diagnostics.has_payload_codec());
        assert!(!FunctionCode::EncapsulatedInterfaceTransport.has_payload_codec());
        assert!(FunctionCode::ReadFifoQueue.has_payload_codec());
    }
}
