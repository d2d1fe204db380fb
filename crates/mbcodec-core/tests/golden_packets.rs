use mbcodec_core::encoding::{Reader, Writer};
use mbcodec_core::pdu::{
    ExceptionCode, ExceptionResponse, FileSubRequest, Message, MessageDecoder,
    ReadFileRecordRequest, ReadHoldingRegistersRequest, ReadHoldingRegistersResponse, Request,
    RequestPdu, Response, ResponsePdu, ServerAddress, WriteMultipleCoilsRequest,
    WriteMultipleRegistersRequest,
};
use mbcodec_core::{DecodeError, EncodeError};

const READ_HOLDING_REQ: &[u8] = &[0x11, 0x03, 0x00, 0x6B, 0x00, 0x03];
const READ_HOLDING_RESP: &[u8] = &[0x11, 0x03, 0x06, 0x02, 0x2B, 0x00, 0x00, 0x00, 0x64];
const WRITE_COILS_REQ: &[u8] = &[0x11, 0x0F, 0x00, 0x13, 0x00, 0x0A, 0x02, 0xCD, 0x01];
const READ_FILE_REQ: &[u8] = &[
    0x01, 0x14, 0x0E, 0x06, 0x00, 0x04, 0x00, 0x01, 0x00, 0x02, 0x06, 0x00, 0x03, 0x00, 0x09,
    0x00, 0x02,
];

fn address(raw: u8) -> ServerAddress {
    ServerAddress::new(raw).unwrap()
}

#[test]
fn fc03_request_golden_encode() {
    let request: Request = Message::new(
        address(0x11),
        ReadHoldingRegistersRequest::new(0x006B, 3).unwrap(),
    )
    .convert();

    let mut buf = [0u8; 16];
    let mut w = Writer::new(&mut buf);
    request.encode(&mut w).unwrap();
    assert_eq!(w.as_written(), READ_HOLDING_REQ);
    assert_eq!(request.encoded_size(), READ_HOLDING_REQ.len());
    assert_eq!(request.pdu_size(), READ_HOLDING_REQ.len() - 1);
}

#[test]
fn fc03_response_decode_and_helpers() {
    let response = MessageDecoder::responses()
        .decode(&mut Reader::new(READ_HOLDING_RESP))
        .unwrap();

    assert_eq!(response.server_address().get(), 0x11);
    match response.pdu() {
        ResponsePdu::ReadHoldingRegisters(resp) => {
            assert_eq!(resp.register_count(), 3);
            assert_eq!(resp.register(0), Some(0x022B));
            assert_eq!(resp.register(1), Some(0x0000));
            assert_eq!(resp.register(2), Some(0x0064));
        }
        other => panic!("expected read holding registers response, got {other:?}"),
    }
}

#[test]
fn fc03_response_golden_encode() {
    let response: Response = Message::new(
        address(0x11),
        ReadHoldingRegistersResponse::new(vec![0x022B, 0x0000, 0x0064]).unwrap(),
    )
    .convert();
    assert_eq!(response.encode_to_vec().unwrap(), READ_HOLDING_RESP);
}

#[test]
fn fc15_request_golden_roundtrip() {
    let values = vec![
        true, false, true, true, false, false, true, true, true, false,
    ];
    let request: Request = Message::new(
        address(0x11),
        WriteMultipleCoilsRequest::new(0x0013, values.clone()).unwrap(),
    )
    .convert();
    assert_eq!(request.encode_to_vec().unwrap(), WRITE_COILS_REQ);

    let decoded = MessageDecoder::requests()
        .decode_slice(WRITE_COILS_REQ)
        .unwrap();
    match decoded.pdu() {
        RequestPdu::WriteMultipleCoils(req) => {
            assert_eq!(req.start_address(), 0x0013);
            assert_eq!(req.values(), values.as_slice());
        }
        other => panic!("expected write multiple coils request, got {other:?}"),
    }
}

#[test]
fn fc20_request_golden_decode() {
    let decoded = MessageDecoder::requests()
        .decode_slice(READ_FILE_REQ)
        .unwrap();
    let expected = ReadFileRecordRequest::new(vec![
        FileSubRequest::new(4, 1, 2).unwrap(),
        FileSubRequest::new(3, 9, 2).unwrap(),
    ])
    .unwrap();
    assert_eq!(decoded.pdu(), &RequestPdu::ReadFileRecord(expected));
}

#[test]
fn exception_status_response_scenario() {
    let response = MessageDecoder::responses()
        .decode_slice(&[0x11, 0x07, 0x05])
        .unwrap();
    assert_eq!(response.server_address().get(), 17);
    assert_eq!(response.function_code(), 0x07);
    match response.pdu() {
        ResponsePdu::ReadExceptionStatus(resp) => assert_eq!(resp.exception_status(), 5),
        other => panic!("expected read exception status response, got {other:?}"),
    }
}

#[test]
fn exception_response_decode() {
    let response = MessageDecoder::responses()
        .decode_slice(&[0x01, 0x83, 0x02])
        .unwrap();
    assert_eq!(
        response.pdu(),
        &ResponsePdu::Exception(ExceptionResponse::new(
            0x03,
            ExceptionCode::IllegalDataAddress
        ))
    );
}

#[test]
fn unknown_request_codes_decode_to_sentinel() {
    let decoder = MessageDecoder::requests();
    for code in [0x00u8, 0x08, 0x2B, 0x64, 0x90] {
        let message = decoder.decode_slice(&[0x01, code]).unwrap();
        assert!(message.pdu().is_illegal_function(), "code {code:#04x}");
        assert_eq!(message.function_code(), code);
        assert_eq!(message.payload_size(), 0);
    }
}

#[test]
fn truncated_header_is_io_failure() {
    let decoder = MessageDecoder::requests();
    for bytes in [&[][..], &[0x01][..]] {
        let err = decoder.decode_slice(bytes).unwrap_err();
        assert!(err.is_io_failure(), "{err:?}");
    }
}

#[test]
fn truncated_payload_is_error() {
    let err = MessageDecoder::requests()
        .decode_slice(&READ_HOLDING_REQ[..4])
        .unwrap_err();
    assert_eq!(err, DecodeError::UnexpectedEof);
}

#[test]
fn writer_rejects_small_buffer() {
    let request: Request = Message::new(
        address(1),
        WriteMultipleRegistersRequest::new(0x0001, vec![1, 2, 3]).unwrap(),
    )
    .convert();
    let mut buf = [0u8; 4];
    let mut w = Writer::new(&mut buf);
    assert_eq!(request.encode(&mut w).unwrap_err(), EncodeError::BufferTooSmall);
}

#[test]
fn quantity_bounds_checked_before_encoding() {
    let err = ReadHoldingRegistersRequest::new(0, 126).unwrap_err();
    assert_eq!(err.field, "quantity");
    assert_eq!(err.value, 126);
    assert_eq!(err.max, 125);
}
