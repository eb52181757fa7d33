//! Streaming record reader.

use std::io::BufRead;

use crate::codec::parse_record;
use crate::error::PersistError;
use crate::record::CandidateRecord;

/// Parses candidate records from a byte stream.
///
/// Header and comment lines (`#`-prefixed) and blank lines are skipped;
/// everything else must be a well-formed record line. Errors carry the
/// 1-based line number.
pub struct RecordReader<R: BufRead> {
    reader: R,
    line_no: u64,
}

impl<R: BufRead> RecordReader<R> {
    /// Create a reader over a stream positioned at the start of a dump.
    pub fn new(reader: R) -> Self {
        Self { reader, line_no: 0 }
    }

    /// Read the next record.
    ///
    /// Returns `Ok(None)` at end of input.
    pub fn read_record(&mut self) -> Result<Option<CandidateRecord>, PersistError> {
        let mut line = String::new();
        loop {
            line.clear();
            let read = self.reader.read_line(&mut line)?;
            if read == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return parse_record(trimmed, self.line_no).map(Some);
        }
    }

    /// Read every remaining record.
    pub fn read_all(&mut self) -> Result<Vec<CandidateRecord>, PersistError> {
        let mut records = Vec::new();
        while let Some(record) = self.read_record()? {
            records.push(record);
        }
        Ok(records)
    }
}
