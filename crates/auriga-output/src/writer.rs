//! Streaming record writer.

use std::io::Write;

use crate::codec::{format_record, header};
use crate::error::PersistError;
use crate::record::CandidateRecord;

/// Writes candidate records to a byte stream.
///
/// The self-describing header is written immediately on construction.
/// Generic over `W: Write` so tests use `Vec<u8>` and production code
/// uses `BufWriter<File>`.
///
/// # Examples
///
/// ```
/// use auriga_core::{Candidate, ParticleId, ParticleState, Vector3};
/// use auriga_output::{CandidateRecord, RecordReader, RecordWriter};
///
/// let state = ParticleState::new(ParticleId(22), 1.0, Vector3::ZERO, Vector3::new(1.0, 0.0, 0.0));
/// let candidate = Candidate::from_source(state);
///
/// // Write one record to an in-memory buffer.
/// let mut buf = Vec::new();
/// let mut writer = RecordWriter::new(&mut buf).unwrap();
/// writer.write_record(&CandidateRecord::from_candidate(&candidate)).unwrap();
/// assert_eq!(writer.records_written(), 1);
/// drop(writer);
///
/// // Read it back.
/// let mut reader = RecordReader::new(buf.as_slice());
/// let record = reader.read_record().unwrap().unwrap();
/// assert_eq!(record.current.id, ParticleId(22));
/// assert!(reader.read_record().unwrap().is_none());
/// ```
pub struct RecordWriter<W: Write> {
    writer: W,
    records_written: u64,
}

impl<W: Write> RecordWriter<W> {
    /// Create a writer, immediately writing the header.
    pub fn new(mut writer: W) -> Result<Self, PersistError> {
        writer.write_all(header().as_bytes())?;
        Ok(Self {
            writer,
            records_written: 0,
        })
    }

    /// Write one record line.
    pub fn write_record(&mut self, record: &CandidateRecord) -> Result<(), PersistError> {
        let mut line = format_record(record);
        line.push('\n');
        self.writer.write_all(line.as_bytes())?;
        self.records_written += 1;
        Ok(())
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<(), PersistError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of records written so far.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Consume the writer and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
