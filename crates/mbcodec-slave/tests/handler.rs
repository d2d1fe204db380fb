use mbcodec_core::pdu::{ExceptionCode, MessageDecoder, ResponsePdu};
use mbcodec_slave::{handle, MemoryMap, SlaveId};

fn exchange(map: &mut MemoryMap, request: &[u8]) -> Vec<u8> {
    let request = MessageDecoder::requests().decode_slice(request).unwrap();
    handle(map, &request).encode_to_vec().unwrap()
}

fn exception_code(response: &[u8]) -> ExceptionCode {
    let decoded = MessageDecoder::responses().decode_slice(response).unwrap();
    match decoded.pdu() {
        ResponsePdu::Exception(exception) => exception.exception_code(),
        other => panic!("expected exception response, got {other:?}"),
    }
}

#[test]
fn reads_and_writes_holding_registers() {
    let mut map = MemoryMap::with_sizes(16, 16, 16, 16);
    map.holding_registers.set(0, 42).unwrap();

    assert_eq!(
        exchange(&mut map, &[0x01, 0x03, 0x00, 0x00, 0x00, 0x01]),
        vec![0x01, 0x03, 0x02, 0x00, 0x2A]
    );

    assert_eq!(
        exchange(&mut map, &[0x01, 0x06, 0x00, 0x01, 0x12, 0x34]),
        vec![0x01, 0x06, 0x00, 0x01, 0x12, 0x34]
    );
    assert_eq!(map.holding_registers.get(1), Some(0x1234));

    exchange(&mut map, &[0x01, 0x16, 0x00, 0x01, 0xFF, 0x00, 0x00, 0x12]);
    assert_eq!(map.holding_registers.get(1), Some(0x1212));

    assert_eq!(
        exchange(
            &mut map,
            &[
                0x01, 0x17, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x02, 0x04, 0xBE, 0xEF,
                0xCA, 0xFE,
            ]
        ),
        vec![0x01, 0x17, 0x04, 0xBE, 0xEF, 0xCA, 0xFE]
    );
}

#[test]
fn reads_and_writes_coils() {
    let mut map = MemoryMap::with_sizes(16, 8, 0, 0);
    assert_eq!(
        exchange(&mut map, &[0x01, 0x0F, 0x00, 0x02, 0x00, 0x03, 0x01, 0x05]),
        vec![0x01, 0x0F, 0x00, 0x02, 0x00, 0x03]
    );
    assert_eq!(map.coils.read(2, 3).unwrap(), &[true, false, true]);

    assert_eq!(
        exchange(&mut map, &[0x01, 0x01, 0x00, 0x00, 0x00, 0x08]),
        vec![0x01, 0x01, 0x01, 0b0001_0100]
    );

    map.discrete_inputs.set(0, true).unwrap();
    assert_eq!(
        exchange(&mut map, &[0x01, 0x02, 0x00, 0x00, 0x00, 0x01]),
        vec![0x01, 0x02, 0x01, 0x01]
    );
}

#[test]
fn out_of_range_address_is_illegal_data_address() {
    let mut map = MemoryMap::with_sizes(4, 4, 4, 4);
    let response = exchange(&mut map, &[0x01, 0x04, 0x00, 0x03, 0x00, 0x02]);
    assert_eq!(response[1], 0x84);
    assert_eq!(exception_code(&response), ExceptionCode::IllegalDataAddress);

    let response = exchange(&mut map, &[0x01, 0x05, 0x00, 0x09, 0xFF, 0x00]);
    assert_eq!(exception_code(&response), ExceptionCode::IllegalDataAddress);
}

#[test]
fn unsupported_codes_are_illegal_function() {
    let mut map = MemoryMap::new();
    let requests: [&[u8]; 3] = [
        &[0x01, 0x08, 0x00, 0x00],
        &[0x01, 0x2B, 0x0E, 0x01, 0x00],
        &[0x01, 0x0B],
    ];
    for request in requests {
        let response = exchange(&mut map, request);
        assert_eq!(response[1], request[1] | 0x80);
        assert_eq!(exception_code(&response), ExceptionCode::IllegalFunction);
    }
}

#[test]
fn exception_status_slave_id_and_fifo() {
    let mut map = MemoryMap::new();
    map.set_exception_status(0x1_6D);
    map.slave_id = Some(SlaveId::new(0x2A, true, Vec::new()).unwrap());
    map.fifo_queue.push(0x01B8).unwrap();
    map.fifo_queue.push(0x1284).unwrap();

    assert_eq!(exchange(&mut map, &[0x11, 0x07]), vec![0x11, 0x07, 0x6D]);
    assert_eq!(
        exchange(&mut map, &[0x11, 0x11]),
        vec![0x11, 0x11, 0x02, 0x2A, 0xFF]
    );
    assert_eq!(
        exchange(&mut map, &[0x11, 0x18, 0x00, 0x00]),
        vec![0x11, 0x18, 0x00, 0x06, 0x00, 0x02, 0x01, 0xB8, 0x12, 0x84]
    );

    let response = exchange(&mut map, &[0x11, 0x18, 0x04, 0xDE]);
    assert_eq!(exception_code(&response), ExceptionCode::IllegalDataAddress);
}

#[test]
fn read_write_with_bad_read_range_leaves_registers_untouched() {
    let mut map = MemoryMap::with_sizes(0, 0, 4, 0);
    let response = exchange(
        &mut map,
        &[
            0x01, 0x17, 0x00, 0x03, 0x00, 0x02, 0x00, 0x00, 0x00, 0x01, 0x02, 0xBE, 0xEF,
        ],
    );
    assert_eq!(exception_code(&response), ExceptionCode::IllegalDataAddress);
    assert_eq!(map.holding_registers.read(0, 4).unwrap(), &[0, 0, 0, 0]);
}
