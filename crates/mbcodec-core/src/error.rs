use std::io;
use thiserror::Error;

/// A numeric field fell outside the bound the protocol allows for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{field} = {value} is outside {min}..={max}")]
pub struct NumberOutOfRange {
    pub field: &'static str,
    pub value: i64,
    pub min: i64,
    pub max: i64,
}

impl NumberOutOfRange {
    /// Checks `value` against an inclusive range, naming the offending field on failure.
    pub fn check<T>(field: &'static str, value: T, min: T, max: T) -> Result<T, Self>
    where
        T: Copy + PartialOrd + Into<i64>,
    {
        if value < min || value > max {
            return Err(Self {
                field,
                value: value.into(),
                min: min.into(),
                max: max.into(),
            });
        }
        Ok(value)
    }

    /// Like [`NumberOutOfRange::check`] for lengths, which arrive as `usize`.
    pub fn check_len(field: &'static str, len: usize, min: usize, max: usize) -> Result<usize, Self> {
        if len < min || len > max {
            return Err(Self {
                field,
                value: i64::try_from(len).unwrap_or(i64::MAX),
                min: i64::try_from(min).unwrap_or(i64::MAX),
                max: i64::try_from(max).unwrap_or(i64::MAX),
            });
        }
        Ok(len)
    }
}

/// Errors that can occur while encoding Modbus data into an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("buffer too small")]
    BufferTooSmall,
    #[error("value out of range")]
    ValueOutOfRange,
    #[error("invalid length")]
    InvalidLength,
    #[error(transparent)]
    OutOfRange(#[from] NumberOutOfRange),
    #[error("io error: {0}")]
    Io(io::ErrorKind),
}

impl From<io::Error> for EncodeError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.kind())
    }
}

/// Errors that can occur while decoding Modbus data from an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid function code")]
    InvalidFunctionCode,
    #[error("invalid length")]
    InvalidLength,
    #[error("invalid value")]
    InvalidValue,
    #[error(transparent)]
    OutOfRange(#[from] NumberOutOfRange),
    #[error("io error: {0}")]
    Io(io::ErrorKind),
}

impl DecodeError {
    /// True when the underlying stream failed, as opposed to the bytes being malformed.
    pub const fn is_io_failure(&self) -> bool {
        matches!(self, Self::UnexpectedEof | Self::Io(_))
    }
}

impl From<io::Error> for DecodeError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Self::UnexpectedEof,
            kind => Self::Io(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DecodeError, NumberOutOfRange};
    use std::io;

    #[test]
    fn check_reports_bounds() {
        let err = NumberOutOfRange::check("quantity", 126u16, 1, 125).unwrap_err();
        assert_eq!(err.field, "quantity");
        assert_eq!(err.value, 126);
        assert_eq!(err.max, 125);
        assert_eq!(err.to_string(), "quantity = 126 is outside 1..=125");
        assert_eq!(NumberOutOfRange::check("quantity", 125u16, 1, 125), Ok(125));
    }

    #[test]
    fn io_errors_map_to_stream_failures() {
        let eof = DecodeError::from(io::Error::from(io::ErrorKind::UnexpectedEof));
        assert_eq!(eof, DecodeError::UnexpectedEof);
        assert!(eof.is_io_failure());

        let reset = DecodeError::from(io::Error::from(io::ErrorKind::ConnectionReset));
        assert_eq!(reset, DecodeError::Io(io::ErrorKind::ConnectionReset));
        assert!(reset.is_io_failure());

        assert!(!DecodeError::InvalidLength.is_io_failure());
    }
}
