//! Protocol-defined bounds on field values.

use crate::NumberOutOfRange;

/// Largest PDU (function code + payload) any Modbus transport can carry.
pub const MAX_PDU_LEN: usize = 253;

pub const MAX_READ_BITS: u16 = 2000;
pub const MAX_READ_REGISTERS: u16 = 125;
pub const MAX_WRITE_COILS: u16 = 1968;
pub const MAX_WRITE_REGISTERS: u16 = 123;
pub const MAX_RW_WRITE_REGISTERS: u16 = 121;

pub const MAX_FIFO_COUNT: u16 = 31;
pub const MAX_COMM_EVENTS: usize = 64;

/// Reference type every file record sub-request must carry.
pub const FILE_REFERENCE_TYPE: u8 = 0x06;
pub const MAX_FILE_RECORD_NUMBER: u16 = 0x270F;
pub const MIN_FILE_NUMBER: u16 = 0x0001;
/// Bounds on the byte count of a read-file-record request and on the data
/// length of its response.
pub const MIN_READ_FILE_BYTE_COUNT: usize = 0x07;
pub const MAX_READ_FILE_BYTE_COUNT: usize = 0xF5;
/// Bounds on the byte count of a write-file-record request and its echo.
pub const MIN_WRITE_FILE_BYTE_COUNT: usize = 0x09;
pub const MAX_WRITE_FILE_BYTE_COUNT: usize = 0xFB;

/// Data bytes a report-slave-id response can carry after its byte count.
pub const MAX_SLAVE_ID_LEN: usize = MAX_PDU_LEN - 2;

pub(crate) fn check_quantity(
    field: &'static str,
    quantity: u16,
    max: u16,
) -> Result<u16, NumberOutOfRange> {
    NumberOutOfRange::check(field, quantity, 1, max)
}

/// A block starting at `start` with `quantity` entries must stay inside the
/// 16-bit address space.
pub(crate) fn check_span(start: u16, quantity: u16) -> Result<(), NumberOutOfRange> {
    let last = u32::from(start) + u32::from(quantity.max(1)) - 1;
    NumberOutOfRange::check("last address", last, 0, u32::from(u16::MAX))?;
    Ok(())
}

pub(crate) fn check_block(
    field: &'static str,
    start: u16,
    quantity: u16,
    max: u16,
) -> Result<(), NumberOutOfRange> {
    check_quantity(field, quantity, max)?;
    check_span(start, quantity)
}

/// Converts a length already bounded by `max` to the `u16` quantity field.
pub(crate) fn len_as_quantity(
    field: &'static str,
    len: usize,
    max: u16,
) -> Result<u16, NumberOutOfRange> {
    let len = NumberOutOfRange::check_len(field, len, 1, usize::from(max))?;
    Ok(len as u16)
}

#[cfg(test)]
mod tests {
    use super::{check_block, check_span, len_as_quantity, MAX_READ_REGISTERS};

    #[test]
    fn span_must_fit_address_space() {
        assert!(check_span(0xFFFF, 1).is_ok());
        assert!(check_span(0xFFFF, 2).is_err());
        assert!(check_span(0xFF83, 125).is_ok());
        assert!(check_span(0xFF84, 125).is_err());
    }

    #[test]
    fn block_checks_quantity_first() {
        let err = check_block("quantity", 0, 0, MAX_READ_REGISTERS).unwrap_err();
        assert_eq!(err.field, "quantity");
        assert_eq!(len_as_quantity("quantity", 125, 125), Ok(125));
        assert!(len_as_quantity("quantity", 0, 125).is_err());
    }
}
