use mbcodec_slave::identification::{MAJOR_MINOR_REVISION, PRODUCT_CODE, VENDOR_NAME};
use mbcodec_slave::{
    BuildStep, ConfiguredProfile, DeviceProfileConfig, MemoryMapBuilder, MemoryMapError,
};

const DEVICE_JSON: &str = r#"{
    "coils": { "size": 8, "initial": { "3": true } },
    "holding_registers": { "size": 4, "initial": { "0": 42, "3": 65535 } },
    "input_registers": { "size": 2 },
    "slave_id": { "server_id": 42, "additional": "sim" },
    "exception_status": 109,
    "fifo": { "pointer_address": 1246, "capacity": 4, "values": [440, 4740] },
    "identification": { "0": "mbcodec", "1": "sim", "2": "0.1" }
}"#;

#[test]
fn builds_map_from_json_config() {
    let config: DeviceProfileConfig = serde_json::from_str(DEVICE_JSON).unwrap();
    let mut builder = MemoryMapBuilder::new(ConfiguredProfile::new(config));
    let map = builder.build().unwrap();

    assert_eq!(map.coils.len(), 8);
    assert_eq!(map.coils.get(3), Some(true));
    assert!(map.discrete_inputs.is_empty());
    assert_eq!(map.holding_registers.read(0, 4).unwrap(), &[42, 0, 0, 0xFFFF]);
    assert_eq!(map.input_registers.len(), 2);
    assert_eq!(map.exception_status(), 0x6D);

    let slave_id = map.slave_id.as_ref().unwrap();
    assert_eq!(slave_id.to_bytes(), vec![42, 0xFF, b's', b'i', b'm']);

    assert_eq!(map.fifo_queue.pointer_address(), 0x04DE);
    assert_eq!(map.fifo_queue.values(), vec![0x01B8, 0x1284]);

    let ident = &map.device_identification;
    assert!(ident.has_basic_objects());
    assert_eq!(ident.get(VENDOR_NAME), Some(&b"mbcodec"[..]));
    assert_eq!(ident.get(PRODUCT_CODE), Some(&b"sim"[..]));
    assert_eq!(ident.get(MAJOR_MINOR_REVISION), Some(&b"0.1"[..]));
}

#[test]
fn empty_config_builds_empty_map() {
    let config: DeviceProfileConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, DeviceProfileConfig::default());

    let map = MemoryMapBuilder::new(ConfiguredProfile::from(config))
        .build()
        .unwrap();
    assert!(map.coils.is_empty());
    assert!(map.slave_id.is_none());
    assert_eq!(map.fifo_queue.capacity(), 31);
}

#[test]
fn config_roundtrips_through_json() {
    let config: DeviceProfileConfig = serde_json::from_str(DEVICE_JSON).unwrap();
    let json = serde_json::to_string(&config).unwrap();
    let reparsed: DeviceProfileConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(reparsed, config);
}

#[test]
fn oversized_fifo_capacity_fails_fifo_step() {
    let config: DeviceProfileConfig =
        serde_json::from_str(r#"{ "fifo": { "capacity": 32 } }"#).unwrap();
    let err = MemoryMapBuilder::new(ConfiguredProfile::new(config))
        .build()
        .unwrap_err();
    assert_eq!(err.step, BuildStep::FifoQueue);
    assert_eq!(
        err.source,
        MemoryMapError::FifoCapacity {
            requested: 32,
            max: 31
        }
    );
}
