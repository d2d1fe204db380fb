//! Modbus PDU encoding and decoding in pure Rust.
//!
//! `mbcodec-core` covers the function-code catalog, a typed payload for every
//! supported request and response, and a dispatcher that decodes a server
//! address, function code and payload from any byte source. Transport
//! framing (MBAP, CRC) is left to the caller.

#![forbid(unsafe_code)]

pub mod encoding;
pub mod error;
pub mod pdu;

pub use error::{DecodeError, EncodeError, NumberOutOfRange};
