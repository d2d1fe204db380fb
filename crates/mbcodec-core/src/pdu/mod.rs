//! Protocol data units: the function-code catalog, every request and response
//! payload, the message envelope and the dispatcher that decodes it.

mod address;
mod decoder;
mod exception;
mod file_record;
mod function_code;
pub mod limits;
mod message;
mod registry;
mod request;
mod response;

pub use address::ServerAddress;
pub use decoder::MessageDecoder;
pub use exception::{ExceptionCode, ExceptionResponse};
pub use file_record::{
    FileRecord, FileSubRequest, ReadFileRecordRequest, ReadFileRecordResponse,
    WriteFileRecordRequest, WriteFileRecordResponse,
};
pub use function_code::FunctionCode;
pub use message::{Message, PduBody};
pub use registry::{Registry, ShellFactory};
pub use request::*;
pub use response::*;
