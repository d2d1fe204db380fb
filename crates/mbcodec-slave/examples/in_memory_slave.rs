use mbcodec_core::pdu::MessageDecoder;
use mbcodec_slave::{handle, ConfiguredProfile, DeviceProfileConfig, MemoryMapBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config: DeviceProfileConfig = serde_json::from_str(
        r#"{
            "holding_registers": { "size": 64, "initial": { "0": 1234 } },
            "slave_id": { "server_id": 17 },
            "exception_status": 5
        }"#,
    )?;
    let mut map = MemoryMapBuilder::new(ConfiguredProfile::new(config)).build()?;

    let decoder = MessageDecoder::requests();
    for request_bytes in [
        &[0x11, 0x03, 0x00, 0x00, 0x00, 0x01][..],
        &[0x11, 0x07][..],
        &[0x11, 0x11][..],
        &[0x11, 0x08, 0x00, 0x00][..],
    ] {
        let request = decoder.decode_slice(request_bytes)?;
        let response = handle(&mut map, &request).encode_to_vec()?;
        println!("request {request_bytes:02X?} -> response {response:02X?}");
    }
    Ok(())
}
