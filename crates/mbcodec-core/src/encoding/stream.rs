use super::{ModbusInput, ModbusOutput};
use crate::{DecodeError, EncodeError};
use std::io::{Read, Write};

/// Adapts a blocking [`Read`] into a [`ModbusInput`].
///
/// Every byte is pulled with `read_exact`, so wrap unbuffered handles in a
/// `BufReader` first.
#[derive(Debug)]
pub struct StreamReader<R> {
    inner: R,
}

impl<R: Read> StreamReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ModbusInput for StreamReader<R> {
    fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let mut byte = [0u8; 1];
        self.inner.read_exact(&mut byte)?;
        Ok(byte[0])
    }

    fn read_into(&mut self, buf: &mut [u8]) -> Result<(), DecodeError> {
        self.inner.read_exact(buf)?;
        Ok(())
    }
}

/// Adapts a blocking [`Write`] into a [`ModbusOutput`].
#[derive(Debug)]
pub struct StreamWriter<W> {
    inner: W,
}

impl<W: Write> StreamWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn flush(&mut self) -> Result<(), EncodeError> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ModbusOutput for StreamWriter<W> {
    fn write_u8(&mut self, value: u8) -> Result<(), EncodeError> {
        self.inner.write_all(&[value])?;
        Ok(())
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), EncodeError> {
        self.inner.write_all(data)?;
        Ok(())
    }
}
