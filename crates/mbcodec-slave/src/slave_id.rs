use crate::error::MemoryMapError;
use mbcodec_core::pdu::limits::MAX_SLAVE_ID_LEN;

/// Data returned by report slave id: server id byte, run indicator, then
/// device-specific bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlaveId {
    server_id: u8,
    running: bool,
    additional: Vec<u8>,
}

impl SlaveId {
    /// Server id and run indicator precede the additional data.
    const HEADER_LEN: usize = 2;
    pub const MAX_ADDITIONAL_LEN: usize = MAX_SLAVE_ID_LEN - Self::HEADER_LEN;

    pub fn new(server_id: u8, running: bool, additional: Vec<u8>) -> Result<Self, MemoryMapError> {
        if additional.len() > Self::MAX_ADDITIONAL_LEN {
            return Err(MemoryMapError::SlaveIdTooLarge {
                len: additional.len() + Self::HEADER_LEN,
                max: MAX_SLAVE_ID_LEN,
            });
        }
        Ok(Self {
            server_id,
            running,
            additional,
        })
    }

    pub fn server_id(&self) -> u8 {
        self.server_id
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn additional(&self) -> &[u8] {
        &self.additional
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::HEADER_LEN + self.additional.len());
        out.push(self.server_id);
        out.push(if self.running { 0xFF } else { 0x00 });
        out.extend_from_slice(&self.additional);
        out
    }
}
