use crate::error::MemoryMapError;
use std::collections::BTreeMap;

pub const VENDOR_NAME: u8 = 0x00;
pub const PRODUCT_CODE: u8 = 0x01;
pub const MAJOR_MINOR_REVISION: u8 = 0x02;
pub const VENDOR_URL: u8 = 0x03;
pub const PRODUCT_NAME: u8 = 0x04;
pub const MODEL_NAME: u8 = 0x05;
pub const USER_APPLICATION_NAME: u8 = 0x06;

/// Device identification objects, keyed by object id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceIdentification {
    objects: BTreeMap<u8, Vec<u8>>,
}

impl DeviceIdentification {
    /// Longest value one object may carry in a single response.
    pub const MAX_OBJECT_LEN: usize = 245;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, object_id: u8, value: impl Into<Vec<u8>>) -> Result<(), MemoryMapError> {
        let value = value.into();
        if value.len() > Self::MAX_OBJECT_LEN {
            return Err(MemoryMapError::ObjectTooLarge {
                object_id,
                len: value.len(),
                max: Self::MAX_OBJECT_LEN,
            });
        }
        self.objects.insert(object_id, value);
        Ok(())
    }

    pub fn get(&self, object_id: u8) -> Option<&[u8]> {
        self.objects.get(&object_id).map(Vec::as_slice)
    }

    pub fn remove(&mut self, object_id: u8) -> Option<Vec<u8>> {
        self.objects.remove(&object_id)
    }

    /// The mandatory basic objects (vendor name, product code, revision) are present.
    pub fn has_basic_objects(&self) -> bool {
        [VENDOR_NAME, PRODUCT_CODE, MAJOR_MINOR_REVISION]
            .iter()
            .all(|id| self.objects.contains_key(id))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[u8])> {
        self.objects.iter().map(|(id, value)| (*id, value.as_slice()))
    }
}
