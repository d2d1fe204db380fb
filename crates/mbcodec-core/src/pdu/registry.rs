//! Function-code to payload-shell lookup used by [`crate::pdu::MessageDecoder`].

use std::fmt;

use crate::pdu::{
    ExceptionCode, ExceptionResponse, FunctionCode, IllegalFunctionRequest,
    IllegalFunctionResponse, RequestPdu, ResponsePdu,
};

/// Builds an empty payload for a raw function code.
pub type ShellFactory<P> = fn(u8) -> P;

/// Exact-match table of shell factories, with a fallback for every code that
/// has no entry.
pub struct Registry<P> {
    table: [Option<ShellFactory<P>>; 256],
    fallback: ShellFactory<P>,
}

impl<P> Registry<P> {
    /// A registry with nothing registered; every code resolves to `fallback`.
    pub fn empty(fallback: ShellFactory<P>) -> Self {
        Self {
            table: [None; 256],
            fallback,
        }
    }

    /// Installs `factory` for `code`, returning the factory it replaced.
    pub fn register(&mut self, code: u8, factory: ShellFactory<P>) -> Option<ShellFactory<P>> {
        self.table[usize::from(code)].replace(factory)
    }

    pub fn unregister(&mut self, code: u8) -> Option<ShellFactory<P>> {
        self.table[usize::from(code)].take()
    }

    pub fn is_registered(&self, code: u8) -> bool {
        self.table[usize::from(code)].is_some()
    }

    /// The factory for `code`, or the fallback when none is registered.
    pub fn resolve(&self, code: u8) -> ShellFactory<P> {
        self.table[usize::from(code)].unwrap_or(self.fallback)
    }

    pub fn shell(&self, code: u8) -> P {
        (self.resolve(code))(code)
    }

    pub fn registered_codes(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(|code| self.is_registered(*code))
    }
}

impl<P> Clone for Registry<P> {
    fn clone(&self) -> Self {
        Self {
            table: self.table,
            fallback: self.fallback,
        }
    }
}

impl<P> fmt::Debug for Registry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("registered", &self.registered_codes().collect::<Vec<_>>())
            .finish()
    }
}

macro_rules! shell_factory {
    ($pdu:ident :: $variant:ident) => {
        |_| $pdu::$variant(Default::default())
    };
}

impl Registry<RequestPdu> {
    /// Every request type with a payload codec; anything else becomes
    /// [`IllegalFunctionRequest`].
    pub fn requests() -> Self {
        let mut registry = Self::empty(|code| {
            RequestPdu::IllegalFunction(IllegalFunctionRequest::new(code))
        });
        let entries: [(FunctionCode, ShellFactory<RequestPdu>); 17] = [
            (FunctionCode::ReadCoils, shell_factory!(RequestPdu::ReadCoils)),
            (
                FunctionCode::ReadDiscreteInputs,
                shell_factory!(RequestPdu::ReadDiscreteInputs),
            ),
            (
                FunctionCode::ReadHoldingRegisters,
                shell_factory!(RequestPdu::ReadHoldingRegisters),
            ),
            (
                FunctionCode::ReadInputRegisters,
                shell_factory!(RequestPdu::ReadInputRegisters),
            ),
            (
                FunctionCode::WriteSingleCoil,
                shell_factory!(RequestPdu::WriteSingleCoil),
            ),
            (
                FunctionCode::WriteSingleRegister,
                shell_factory!(RequestPdu::WriteSingleRegister),
            ),
            (
                FunctionCode::ReadExceptionStatus,
                shell_factory!(RequestPdu::ReadExceptionStatus),
            ),
            (
                FunctionCode::GetCommEventCounter,
                shell_factory!(RequestPdu::GetCommEventCounter),
            ),
            (
                FunctionCode::GetCommEventLog,
                shell_factory!(RequestPdu::GetCommEventLog),
            ),
            (
                FunctionCode::WriteMultipleCoils,
                shell_factory!(RequestPdu::WriteMultipleCoils),
            ),
            (
                FunctionCode::WriteMultipleRegisters,
                shell_factory!(RequestPdu::WriteMultipleRegisters),
            ),
            (
                FunctionCode::ReportSlaveId,
                shell_factory!(RequestPdu::ReportSlaveId),
            ),
            (
                FunctionCode::ReadFileRecord,
                shell_factory!(RequestPdu::ReadFileRecord),
            ),
            (
                FunctionCode::WriteFileRecord,
                shell_factory!(RequestPdu::WriteFileRecord),
            ),
            (
                FunctionCode::MaskWriteRegister,
                shell_factory!(RequestPdu::MaskWriteRegister),
            ),
            (
                FunctionCode::ReadWriteMultipleRegisters,
                shell_factory!(RequestPdu::ReadWriteMultipleRegisters),
            ),
            (
                FunctionCode::ReadFifoQueue,
                shell_factory!(RequestPdu::ReadFifoQueue),
            ),
        ];
        for (function, factory) in entries {
            registry.register(function.as_u8(), factory);
        }
        registry
    }
}

impl Registry<ResponsePdu> {
    /// Every response type with a payload codec. Unregistered codes with the
    /// exception bit set become [`ExceptionResponse`], the rest
    /// [`IllegalFunctionResponse`].
    pub fn responses() -> Self {
        let mut registry = Self::empty(|code| {
            if FunctionCode::is_exception(code) {
                ResponsePdu::Exception(ExceptionResponse::new(
                    code,
                    ExceptionCode::IllegalFunction,
                ))
            } else {
                ResponsePdu::IllegalFunction(IllegalFunctionResponse::new(code))
            }
        });
        let entries: [(FunctionCode, ShellFactory<ResponsePdu>); 17] = [
            (FunctionCode::ReadCoils, shell_factory!(ResponsePdu::ReadCoils)),
            (
                FunctionCode::ReadDiscreteInputs,
                shell_factory!(ResponsePdu::ReadDiscreteInputs),
            ),
            (
                FunctionCode::ReadHoldingRegisters,
                shell_factory!(ResponsePdu::ReadHoldingRegisters),
            ),
            (
                FunctionCode::ReadInputRegisters,
                shell_factory!(ResponsePdu::ReadInputRegisters),
            ),
            (
                FunctionCode::WriteSingleCoil,
                shell_factory!(ResponsePdu::WriteSingleCoil),
            ),
            (
                FunctionCode::WriteSingleRegister,
                shell_factory!(ResponsePdu::WriteSingleRegister),
            ),
            (
                FunctionCode::ReadExceptionStatus,
                shell_factory!(ResponsePdu::ReadExceptionStatus),
            ),
            (
                FunctionCode::GetCommEventCounter,
                shell_factory!(ResponsePdu::GetCommEventCounter),
            ),
            (
                FunctionCode::GetCommEventLog,
                shell_factory!(ResponsePdu::GetCommEventLog),
            ),
            (
                FunctionCode::WriteMultipleCoils,
                shell_factory!(ResponsePdu::WriteMultipleCoils),
            ),
            (
                FunctionCode::WriteMultipleRegisters,
                shell_factory!(ResponsePdu::WriteMultipleRegisters),
            ),
            (
                FunctionCode::ReportSlaveId,
                shell_factory!(ResponsePdu::ReportSlaveId),
            ),
            (
                FunctionCode::ReadFileRecord,
                shell_factory!(ResponsePdu::ReadFileRecord),
            ),
            (
                FunctionCode::WriteFileRecord,
                shell_factory!(ResponsePdu::WriteFileRecord),
            ),
            (
                FunctionCode::MaskWriteRegister,
                shell_factory!(ResponsePdu::MaskWriteRegister),
            ),
            (
                FunctionCode::ReadWriteMultipleRegisters,
                shell_factory!(ResponsePdu::ReadWriteMultipleRegisters),
            ),
            (
                FunctionCode::ReadFifoQueue,
                shell_factory!(ResponsePdu::ReadFifoQueue),
            ),
        ];
        for (function, factory) in entries {
            registry.register(function.as_u8(), factory);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::Registry;
    use crate::pdu::{
        ExceptionCode, FunctionCode, PduBody, ReadCoilsRequest, RequestPdu, ResponsePdu,
    };

    #[test]
    fn request_registry_covers_codec_catalog() {
        let registry = Registry::requests();
        for function in FunctionCode::CATALOG {
            assert_eq!(
                registry.is_registered(function.as_u8()),
                function.has_payload_codec(),
                "{function:?}"
            );
        }
        assert_eq!(registry.registered_codes().count(), 17);
    }

    #[test]
    fn unknown_request_codes_fall_back() {
        let registry = Registry::requests();
        for code in [0x00, 0x08, 0x2B, 0x90, 0xFF] {
            let shell = registry.shell(code);
            assert!(shell.is_illegal_function());
            assert_eq!(shell.function_code(), code);
        }
    }

    #[test]
    fn response_fallback_splits_on_exception_bit() {
        let registry = Registry::responses();
        match registry.shell(0x83) {
            ResponsePdu::Exception(exception) => {
                assert_eq!(exception.request_function_code(), 0x03);
                assert_eq!(exception.exception_code(), ExceptionCode::IllegalFunction);
            }
            other => panic!("unexpected shell: {other:?}"),
        }
        assert!(registry.shell(0x42).is_illegal_function());
    }

    #[test]
    fn register_and_unregister() {
        let mut registry = Registry::requests();
        let previous = registry.unregister(0x01);
        assert!(previous.is_some());
        assert!(registry.shell(0x01).is_illegal_function());

        registry.register(0x41, |_| RequestPdu::ReadCoils(ReadCoilsRequest::default()));
        assert!(matches!(registry.shell(0x41), RequestPdu::ReadCoils(_)));
    }
}
