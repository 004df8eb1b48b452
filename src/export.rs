// src/export.rs

use std::fmt;

use csv::Writer;

use crate::flatten::FlatRecord;

#[derive(Debug)]
pub enum ExportError {
    /// No records to derive a header row from.
    EmptyInput,
    Csv(csv::Error),
    Io(std::io::Error),
    Encoding(std::string::FromUtf8Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::EmptyInput => write!(f, "cannot export an empty record set"),
            ExportError::Csv(e) => write!(f, "csv error: {e}"),
            ExportError::Io(e) => write!(f, "io error: {e}"),
            ExportError::Encoding(e) => write!(f, "encoding error: {e}"),
        }
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

/// Serializes the records to one CSV document, header first. The header row
/// comes from the first record's field names, so an empty input has no
/// header to derive and is rejected up front. The whole document is
/// materialized in memory.
pub fn to_csv(records: &[FlatRecord]) -> Result<String, ExportError> {
    if records.is_empty() {
        return Err(ExportError::EmptyInput);
    }

    let mut buf: Vec<u8> = Vec::new();
    {
        let mut writer = Writer::from_writer(&mut buf);
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush().map_err(ExportError::Io)?;
    }

    String::from_utf8(buf).map_err(ExportError::Encoding)
}
