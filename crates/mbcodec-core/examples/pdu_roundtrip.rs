use mbcodec_core::encoding::Writer;
use mbcodec_core::pdu::{
    Message, MessageDecoder, ReadHoldingRegistersRequest, Request, ResponsePdu, ServerAddress,
};

fn main() {
    let server = ServerAddress::new(0x11).expect("0x11 is a unicast address");
    let request: Request = Message::new(
        server,
        ReadHoldingRegistersRequest::new(0x006B, 2).expect("sample quantity is in range"),
    )
    .convert();

    let mut request_buf = [0u8; 16];
    let mut w = Writer::new(&mut request_buf);
    request
        .encode(&mut w)
        .expect("request encoding should succeed for valid sample data");
    println!("encoded request: {:02X?}", w.as_written());

    let response_bytes = [0x11, 0x03, 0x04, 0x00, 0x2A, 0x00, 0x64];
    let response = MessageDecoder::responses()
        .decode_slice(&response_bytes)
        .expect("response decoding should succeed for valid sample response bytes");

    match response.pdu() {
        ResponsePdu::ReadHoldingRegisters(resp) => {
            for idx in 0..resp.register_count() {
                println!("register[{idx}] = {}", resp.register(idx).unwrap_or_default());
            }
        }
        other => println!("unexpected response: {other:?}"),
    }

    let unknown = MessageDecoder::requests()
        .decode_slice(&[0x11, 0x90])
        .expect("unknown function codes still decode");
    println!(
        "function code {:#04X} decoded to illegal-function sentinel: {}",
        unknown.function_code(),
        unknown.pdu().is_illegal_function()
    );
}
