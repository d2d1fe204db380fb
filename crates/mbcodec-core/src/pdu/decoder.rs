use tracing::{debug, trace};

use crate::encoding::{ModbusInput, Reader};
use crate::pdu::{Message, PduBody, Registry, RequestPdu, ResponsePdu, ServerAddress};
use crate::DecodeError;

/// Reads a server address and function code, then hands the rest of the
/// input to the payload type registered for that code.
///
/// Decoding never fails because a function code is unknown: such codes
/// produce the registry's fallback payload.
#[derive(Debug, Clone)]
pub struct MessageDecoder<P> {
    registry: Registry<P>,
}

impl MessageDecoder<RequestPdu> {
    pub fn requests() -> Self {
        Self::with_registry(Registry::requests())
    }
}

impl MessageDecoder<ResponsePdu> {
    pub fn responses() -> Self {
        Self::with_registry(Registry::responses())
    }
}

impl<P> MessageDecoder<P> {
    pub fn with_registry(registry: Registry<P>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry<P> {
        &self.registry
    }
}

impl<P: PduBody> MessageDecoder<P> {
    pub fn decode<R: ModbusInput + ?Sized>(&self, r: &mut R) -> Result<Message<P>, DecodeError> {
        // Both header bytes are read before the address is validated.
        let raw_address = r.read_u8()?;
        let code = r.read_u8()?;
        trace!(
            server_address = raw_address,
            function_code = code,
            "decoding modbus message header"
        );

        let server_address = ServerAddress::new(raw_address)?;
        if !self.registry.is_registered(code) {
            debug!(
                server_address = raw_address,
                function_code = code,
                "no payload codec registered, using fallback"
            );
        }

        let mut message = Message::new(server_address, self.registry.shell(code));
        message.decode_payload(r)?;
        Ok(message)
    }

    /// Decodes one message from the front of `bytes`; trailing bytes are ignored.
    pub fn decode_slice(&self, bytes: &[u8]) -> Result<Message<P>, DecodeError> {
        self.decode(&mut Reader::new(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::MessageDecoder;
    use crate::encoding::StreamReader;
    use crate::pdu::{RequestPdu, ResponsePdu};
    use crate::DecodeError;

    #[test]
    fn decodes_exception_status_response() {
        let message = MessageDecoder::responses()
            .decode_slice(&[0x11, 0x07, 0x05])
            .unwrap();
        assert_eq!(message.server_address().get(), 17);
        match message.pdu() {
            ResponsePdu::ReadExceptionStatus(resp) => assert_eq!(resp.exception_status(), 5),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn unknown_code_is_not_an_error() {
        let decoder = MessageDecoder::requests();
        for code in [0x00, 0x08, 0x2B, 0x90] {
            let message = decoder.decode_slice(&[0x01, code, 0xAA, 0xBB]).unwrap();
            assert!(message.pdu().is_illegal_function());
            assert_eq!(message.function_code(), code);
        }
    }

    #[test]
    fn short_header_is_io_failure() {
        let decoder = MessageDecoder::requests();
        assert_eq!(decoder.decode_slice(&[]).unwrap_err(), DecodeError::UnexpectedEof);
        let err = decoder.decode_slice(&[0x01]).unwrap_err();
        assert!(err.is_io_failure());
    }

    #[test]
    fn rejects_reserved_server_address() {
        let err = MessageDecoder::requests()
            .decode_slice(&[0xF8, 0x07])
            .unwrap_err();
        assert!(matches!(err, DecodeError::OutOfRange(e) if e.field == "server address"));
    }

    #[test]
    fn short_header_from_reserved_address_is_still_io_failure() {
        let err = MessageDecoder::requests().decode_slice(&[0xF8]).unwrap_err();
        assert!(err.is_io_failure());
    }

    #[test]
    fn decodes_from_io_stream() {
        let bytes: &[u8] = &[0x0A, 0x03, 0x00, 0x6B, 0x00, 0x03];
        let mut stream = StreamReader::new(bytes);
        let message = MessageDecoder::requests().decode(&mut stream).unwrap();
        match message.pdu() {
            RequestPdu::ReadHoldingRegisters(req) => {
                assert_eq!(req.start_address(), 0x006B);
                assert_eq!(req.quantity(), 3);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
        assert_eq!(message.payload_size(), 4);
    }

    #[test]
    fn decoder_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MessageDecoder<RequestPdu>>();
        assert_send_sync::<MessageDecoder<ResponsePdu>>();
    }
}
