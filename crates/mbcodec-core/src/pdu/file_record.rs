//! File record access (FC20 / FC21).
//!
//! Every sub-request carries reference type 6, a file number, a starting
//! record number (0..=9999) and a record length in registers.

use crate::encoding::{ModbusInput, ModbusOutput};
use crate::pdu::limits::{
    FILE_REFERENCE_TYPE, MAX_FILE_RECORD_NUMBER, MAX_READ_FILE_BYTE_COUNT,
    MAX_WRITE_FILE_BYTE_COUNT, MIN_FILE_NUMBER, MIN_READ_FILE_BYTE_COUNT,
    MIN_WRITE_FILE_BYTE_COUNT,
};
use crate::pdu::message::{read_registers, write_registers};
use crate::pdu::{FunctionCode, PduBody};
use crate::{DecodeError, EncodeError, NumberOutOfRange};

/// Bytes in one read sub-request: reference type, file, record, length.
const SUB_REQUEST_LEN: usize = 7;
/// Largest register count a single read sub-response length byte can describe.
const MAX_SUB_RESPONSE_REGISTERS: usize = (u8::MAX as usize - 1) / 2;

fn check_record_span(
    file_number: u16,
    record_number: u16,
    record_length: u16,
) -> Result<(), NumberOutOfRange> {
    NumberOutOfRange::check("file number", file_number, MIN_FILE_NUMBER, u16::MAX)?;
    NumberOutOfRange::check("record number", record_number, 0, MAX_FILE_RECORD_NUMBER)?;
    NumberOutOfRange::check("record length", record_length, 1, MAX_FILE_RECORD_NUMBER + 1)?;
    let last = u32::from(record_number) + u32::from(record_length) - 1;
    NumberOutOfRange::check("last record number", last, 0, u32::from(MAX_FILE_RECORD_NUMBER))?;
    Ok(())
}

fn read_reference_type<R: ModbusInput + ?Sized>(r: &mut R) -> Result<(), DecodeError> {
    if r.read_u8()? != FILE_REFERENCE_TYPE {
        return Err(DecodeError::InvalidValue);
    }
    Ok(())
}

/// One span of records to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSubRequest {
    file_number: u16,
    record_number: u16,
    record_length: u16,
}

impl FileSubRequest {
    pub fn new(
        file_number: u16,
        record_number: u16,
        record_length: u16,
    ) -> Result<Self, NumberOutOfRange> {
        check_record_span(file_number, record_number, record_length)?;
        Ok(Self {
            file_number,
            record_number,
            record_length,
        })
    }

    pub fn file_number(&self) -> u16 {
        self.file_number
    }

    pub fn record_number(&self) -> u16 {
        self.record_number
    }

    pub fn record_length(&self) -> u16 {
        self.record_length
    }

    /// Bytes the matching sub-response occupies: length byte, reference type, data.
    fn response_len(&self) -> usize {
        2 + usize::from(self.record_length) * 2
    }

    fn encode<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        w.write_u8(FILE_REFERENCE_TYPE)?;
        w.write_be_u16(self.file_number)?;
        w.write_be_u16(self.record_number)?;
        w.write_be_u16(self.record_length)?;
        Ok(())
    }

    fn decode<R: ModbusInput + ?Sized>(r: &mut R) -> Result<Self, DecodeError> {
        read_reference_type(r)?;
        let file_number = r.read_be_u16()?;
        let record_number = r.read_be_u16()?;
        let record_length = r.read_be_u16()?;
        Ok(Self::new(file_number, record_number, record_length)?)
    }
}

/// A span of records together with its register data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    file_number: u16,
    record_number: u16,
    registers: Vec<u16>,
}

impl FileRecord {
    pub fn new(
        file_number: u16,
        record_number: u16,
        registers: Vec<u16>,
    ) -> Result<Self, NumberOutOfRange> {
        let length = NumberOutOfRange::check_len(
            "record length",
            registers.len(),
            1,
            usize::from(MAX_FILE_RECORD_NUMBER) + 1,
        )?;
        check_record_span(file_number, record_number, length as u16)?;
        Ok(Self {
            file_number,
            record_number,
            registers,
        })
    }

    pub fn file_number(&self) -> u16 {
        self.file_number
    }

    pub fn record_number(&self) -> u16 {
        self.record_number
    }

    pub fn registers(&self) -> &[u16] {
        &self.registers
    }

    fn encoded_len(&self) -> usize {
        SUB_REQUEST_LEN + self.registers.len() * 2
    }

    fn encode<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        let length = u16::try_from(self.registers.len()).map_err(|_| EncodeError::ValueOutOfRange)?;
        w.write_u8(FILE_REFERENCE_TYPE)?;
        w.write_be_u16(self.file_number)?;
        w.write_be_u16(self.record_number)?;
        w.write_be_u16(length)?;
        write_registers(w, &self.registers)
    }

    /// Decodes one record, never reading past `remaining` bytes.
    fn decode<R: ModbusInput + ?Sized>(r: &mut R, remaining: usize) -> Result<Self, DecodeError> {
        if remaining < SUB_REQUEST_LEN {
            return Err(DecodeError::InvalidLength);
        }
        read_reference_type(r)?;
        let file_number = r.read_be_u16()?;
        let record_number = r.read_be_u16()?;
        let length = r.read_be_u16()?;
        if SUB_REQUEST_LEN + usize::from(length) * 2 > remaining {
            return Err(DecodeError::InvalidLength);
        }
        check_record_span(file_number, record_number, length)?;
        let registers = read_registers(r, usize::from(length))?;
        Ok(Self::new(file_number, record_number, registers)?)
    }
}

fn check_write_records(records: &[FileRecord]) -> Result<usize, NumberOutOfRange> {
    let byte_count: usize = records.iter().map(FileRecord::encoded_len).sum();
    NumberOutOfRange::check_len(
        "byte count",
        byte_count,
        MIN_WRITE_FILE_BYTE_COUNT,
        MAX_WRITE_FILE_BYTE_COUNT,
    )
}

fn encode_write_records<W: ModbusOutput + ?Sized>(
    w: &mut W,
    records: &[FileRecord],
) -> Result<(), EncodeError> {
    let byte_count = check_write_records(records)?;
    w.write_u8(byte_count as u8)?;
    for record in records {
        record.encode(w)?;
    }
    Ok(())
}

fn decode_write_records<R: ModbusInput + ?Sized>(r: &mut R) -> Result<Vec<FileRecord>, DecodeError> {
    let byte_count = NumberOutOfRange::check_len(
        "byte count",
        usize::from(r.read_u8()?),
        MIN_WRITE_FILE_BYTE_COUNT,
        MAX_WRITE_FILE_BYTE_COUNT,
    )?;
    let mut records = Vec::new();
    let mut consumed = 0usize;
    while consumed < byte_count {
        let record = FileRecord::decode(r, byte_count - consumed)?;
        consumed += record.encoded_len();
        records.push(record);
    }
    Ok(records)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadFileRecordRequest {
    sub_requests: Vec<FileSubRequest>,
}

impl ReadFileRecordRequest {
    pub fn new(sub_requests: Vec<FileSubRequest>) -> Result<Self, NumberOutOfRange> {
        Self::check(&sub_requests)?;
        Ok(Self { sub_requests })
    }

    pub fn sub_requests(&self) -> &[FileSubRequest] {
        &self.sub_requests
    }

    fn check(sub_requests: &[FileSubRequest]) -> Result<u8, NumberOutOfRange> {
        let byte_count = NumberOutOfRange::check_len(
            "byte count",
            sub_requests.len() * SUB_REQUEST_LEN,
            MIN_READ_FILE_BYTE_COUNT,
            MAX_READ_FILE_BYTE_COUNT,
        )?;
        let response_len: usize = sub_requests.iter().map(FileSubRequest::response_len).sum();
        NumberOutOfRange::check_len("response data length", response_len, 1, MAX_READ_FILE_BYTE_COUNT)?;
        Ok(byte_count as u8)
    }
}

impl PduBody for ReadFileRecordRequest {
    fn function_code(&self) -> u8 {
        FunctionCode::ReadFileRecord.as_u8()
    }

    fn payload_size(&self) -> usize {
        1 + self.sub_requests.len() * SUB_REQUEST_LEN
    }

    fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        let byte_count = Self::check(&self.sub_requests)?;
        w.write_u8(byte_count)?;
        for sub in &self.sub_requests {
            sub.encode(w)?;
        }
        Ok(())
    }

    fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
        let byte_count = NumberOutOfRange::check_len(
            "byte count",
            usize::from(r.read_u8()?),
            MIN_READ_FILE_BYTE_COUNT,
            MAX_READ_FILE_BYTE_COUNT,
        )?;
        if byte_count % SUB_REQUEST_LEN != 0 {
            return Err(DecodeError::InvalidLength);
        }
        let mut sub_requests = Vec::with_capacity(byte_count / SUB_REQUEST_LEN);
        for _ in 0..byte_count / SUB_REQUEST_LEN {
            sub_requests.push(FileSubRequest::decode(r)?);
        }
        Self::check(&sub_requests)?;
        self.sub_requests = sub_requests;
        Ok(())
    }
}

/// Register data for each sub-request, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadFileRecordResponse {
    records: Vec<Vec<u16>>,
}

impl ReadFileRecordResponse {
    pub fn new(records: Vec<Vec<u16>>) -> Result<Self, NumberOutOfRange> {
        Self::check(&records)?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Vec<u16>] {
        &self.records
    }

    pub fn record(&self, index: usize) -> Option<&[u16]> {
        self.records.get(index).map(Vec::as_slice)
    }

    fn data_len(records: &[Vec<u16>]) -> usize {
        records.iter().map(|record| 2 + record.len() * 2).sum()
    }

    fn check(records: &[Vec<u16>]) -> Result<u8, NumberOutOfRange> {
        for record in records {
            NumberOutOfRange::check_len("sub-response registers", record.len(), 1, MAX_SUB_RESPONSE_REGISTERS)?;
        }
        let data_len = NumberOutOfRange::check_len(
            "response data length",
            Self::data_len(records),
            1,
            MAX_READ_FILE_BYTE_COUNT,
        )?;
        Ok(data_len as u8)
    }
}

impl PduBody for ReadFileRecordResponse {
    fn function_code(&self) -> u8 {
        FunctionCode::ReadFileRecord.as_u8()
    }

    fn payload_size(&self) -> usize {
        1 + Self::data_len(&self.records)
    }

    fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        let data_len = Self::check(&self.records)?;
        w.write_u8(data_len)?;
        for record in &self.records {
            w.write_u8((1 + record.len() * 2) as u8)?;
            w.write_u8(FILE_REFERENCE_TYPE)?;
            write_registers(w, record)?;
        }
        Ok(())
    }

    fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
        let data_len = NumberOutOfRange::check_len(
            "response data length",
            usize::from(r.read_u8()?),
            1,
            MAX_READ_FILE_BYTE_COUNT,
        )?;
        let mut records = Vec::new();
        let mut consumed = 0usize;
        while consumed < data_len {
            let sub_len = usize::from(r.read_u8()?);
            if sub_len < 3 || sub_len % 2 == 0 || consumed + 1 + sub_len > data_len {
                return Err(DecodeError::InvalidLength);
            }
            read_reference_type(r)?;
            records.push(read_registers(r, (sub_len - 1) / 2)?);
            consumed += 1 + sub_len;
        }
        self.records = records;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteFileRecordRequest {
    records: Vec<FileRecord>,
}

impl WriteFileRecordRequest {
    pub fn new(records: Vec<FileRecord>) -> Result<Self, NumberOutOfRange> {
        check_write_records(&records)?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }
}

impl PduBody for WriteFileRecordRequest {
    fn function_code(&self) -> u8 {
        FunctionCode::WriteFileRecord.as_u8()
    }

    fn payload_size(&self) -> usize {
        1 + self.records.iter().map(FileRecord::encoded_len).sum::<usize>()
    }

    fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        encode_write_records(w, &self.records)
    }

    fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
        self.records = decode_write_records(r)?;
        Ok(())
    }
}

/// Echo of a [`WriteFileRecordRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteFileRecordResponse {
    records: Vec<FileRecord>,
}

impl WriteFileRecordResponse {
    pub fn new(records: Vec<FileRecord>) -> Result<Self, NumberOutOfRange> {
        check_write_records(&records)?;
        Ok(Self { records })
    }

    pub fn echo(request: &WriteFileRecordRequest) -> Self {
        Self {
            records: request.records.clone(),
        }
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }
}

impl PduBody for WriteFileRecordResponse {
    fn function_code(&self) -> u8 {
        FunctionCode::WriteFileRecord.as_u8()
    }

    fn payload_size(&self) -> usize {
        1 + self.records.iter().map(FileRecord::encoded_len).sum::<usize>()
    }

    fn encode_payload<W: ModbusOutput + ?Sized>(&self, w: &mut W) -> Result<(), EncodeError> {
        encode_write_records(w, &self.records)
    }

    fn decode_payload<R: ModbusInput + ?Sized>(&mut self, r: &mut R) -> Result<(), DecodeError> {
        self.records = decode_write_records(r)?;
        Ok(())
    }
}
