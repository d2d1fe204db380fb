//! Byte-level input and output used by every message codec.
//!
//! Payload routines are written against [`ModbusInput`] and [`ModbusOutput`]
//! so the same code decodes from a borrowed slice, a `std::io::Read` stream,
//! or anything else that can hand out one byte at a time.

mod reader;
mod stream;
mod writer;

pub use reader::Reader;
pub use stream::{StreamReader, StreamWriter};
pub use writer::Writer;

use crate::{DecodeError, EncodeError};

/// A source of bytes. There is no end-of-data marker: a read past the end is
/// [`DecodeError::UnexpectedEof`].
pub trait ModbusInput {
    fn read_u8(&mut self) -> Result<u8, DecodeError>;

    fn read_be_u16(&mut self) -> Result<u16, DecodeError> {
        let hi = self.read_u8()?;
        let lo = self.read_u8()?;
        Ok(u16::from_be_bytes([hi, lo]))
    }

    fn read_into(&mut self, buf: &mut [u8]) -> Result<(), DecodeError> {
        for slot in buf.iter_mut() {
            *slot = self.read_u8()?;
        }
        Ok(())
    }

    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>, DecodeError> {
        let mut out = vec![0u8; len];
        self.read_into(&mut out)?;
        Ok(out)
    }
}

/// A sink for encoded bytes.
pub trait ModbusOutput {
    fn write_u8(&mut self, value: u8) -> Result<(), EncodeError>;

    fn write_all(&mut self, data: &[u8]) -> Result<(), EncodeError> {
        for byte in data {
            self.write_u8(*byte)?;
        }
        Ok(())
    }

    fn write_be_u16(&mut self, value: u16) -> Result<(), EncodeError> {
        self.write_all(&value.to_be_bytes())
    }
}

impl<T: ModbusInput + ?Sized> ModbusInput for &mut T {
    fn read_u8(&mut self) -> Result<u8, DecodeError> {
        (**self).read_u8()
    }

    fn read_into(&mut self, buf: &mut [u8]) -> Result<(), DecodeError> {
        (**self).read_into(buf)
    }
}

impl<T: ModbusOutput + ?Sized> ModbusOutput for &mut T {
    fn write_u8(&mut self, value: u8) -> Result<(), EncodeError> {
        (**self).write_u8(value)
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), EncodeError> {
        (**self).write_all(data)
    }
}

impl ModbusOutput for Vec<u8> {
    fn write_u8(&mut self, value: u8) -> Result<(), EncodeError> {
        self.push(value);
        Ok(())
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), EncodeError> {
        self.extend_from_slice(data);
        Ok(())
    }
}
