//! The text output module: one record per candidate, streamed to a
//! writer.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use auriga_core::CandidateRef;
use auriga_module::Module;
use auriga_output::{format_record, header, CandidateRecord};

use crate::error::ConfigError;

/// Compression applied to the output stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    /// Plain text.
    None,
    /// Gzip-compressed text. Requires the `gzip` cargo feature;
    /// requesting it in a build without the feature is a construction
    /// error.
    Gzip,
}

enum Sink {
    Path(PathBuf),
    Stream(Box<dyn Write + Send>),
}

/// A module streaming one text record per candidate to a writer.
///
/// The record line is formatted *outside* the lock; the stream mutex is
/// held for exactly the one record write and released on every path.
/// Write failures cannot cross the `process` boundary, so they are
/// counted instead — check [`write_failures`](TextRecordOutput::write_failures)
/// at shutdown.
///
/// Inactive candidates are skipped. With
/// [`deactivate_on_write`](TextRecordOutputBuilder::deactivate_on_write)
/// the module doubles as an observation endpoint: each candidate is
/// recorded once and then taken out of the run.
pub struct TextRecordOutput {
    stream: Mutex<Box<dyn Write + Send>>,
    deactivate_on_write: bool,
    write_failures: AtomicU64,
}

/// Builder for [`TextRecordOutput`].
pub struct TextRecordOutputBuilder {
    sink: Option<Sink>,
    compression: Compression,
    deactivate_on_write: bool,
}

impl std::fmt::Debug for TextRecordOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRecordOutput")
            .field("deactivate_on_write", &self.deactivate_on_write)
            .field("write_failures", &self.write_failures)
            .finish_non_exhaustive()
    }
}

impl TextRecordOutput {
    /// Create a new builder.
    pub fn builder() -> TextRecordOutputBuilder {
        TextRecordOutputBuilder {
            sink: None,
            compression: Compression::None,
            deactivate_on_write: false,
        }
    }

    /// Number of record writes that failed so far.
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    /// Flush the underlying stream.
    pub fn flush(&self) -> io::Result<()> {
        self.stream.lock().unwrap().flush()
    }
}

impl TextRecordOutputBuilder {
    /// Write to a file at `path` (created or truncated at build time).
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sink = Some(Sink::Path(path.into()));
        self
    }

    /// Write to an arbitrary stream.
    pub fn stream(mut self, stream: impl Write + Send + 'static) -> Self {
        self.sink = Some(Sink::Stream(Box::new(stream)));
        self
    }

    /// Set the output compression.
    /// Default: [`Compression::None`].
    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Deactivate each candidate after writing its record.
    /// Default: `false`.
    pub fn deactivate_on_write(mut self, deactivate: bool) -> Self {
        self.deactivate_on_write = deactivate;
        self
    }

    /// Build the module, opening the sink and writing the header.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingSink`] if neither a path nor a stream was
    ///   given.
    /// - [`ConfigError::CompressionUnavailable`] if gzip was requested
    ///   and this build lacks the `gzip` feature.
    /// - [`ConfigError::Io`] if the file cannot be created or the header
    ///   cannot be written.
    pub fn build(self) -> Result<TextRecordOutput, ConfigError> {
        let raw: Box<dyn Write + Send> = match self.sink {
            None => return Err(ConfigError::MissingSink),
            Some(Sink::Path(path)) => Box::new(BufWriter::new(File::create(path)?)),
            Some(Sink::Stream(stream)) => stream,
        };

        let mut stream = apply_compression(raw, self.compression)?;
        stream.write_all(header().as_bytes())?;

        Ok(TextRecordOutput {
            stream: Mutex::new(stream),
            deactivate_on_write: self.deactivate_on_write,
            write_failures: AtomicU64::new(0),
        })
    }
}

#[cfg(feature = "gzip")]
fn apply_compression(
    raw: Box<dyn Write + Send>,
    compression: Compression,
) -> Result<Box<dyn Write + Send>, ConfigError> {
    Ok(match compression {
        Compression::None => raw,
        Compression::Gzip => Box::new(flate2::write::GzEncoder::new(
            raw,
            flate2::Compression::default(),
        )),
    })
}

#[cfg(not(feature = "gzip"))]
fn apply_compression(
    raw: Box<dyn Write + Send>,
    compression: Compression,
) -> Result<Box<dyn Write + Send>, ConfigError> {
    match compression {
        Compression::None => Ok(raw),
        Compression::Gzip => Err(ConfigError::CompressionUnavailable),
    }
}

impl Module for TextRecordOutput {
    fn name(&self) -> &str {
        "text_record_output"
    }

    fn process(&self, candidate: &CandidateRef) {
        if !candidate.is_active() {
            return;
        }

        // Format outside the lock; hold the stream for one write only.
        let mut line = format_record(&CandidateRecord::from_candidate(candidate));
        line.push('\n');

        let result = {
            let mut stream = self.stream.lock().unwrap();
            stream.write_all(line.as_bytes())
        };
        if result.is_err() {
            self.write_failures.fetch_add(1, Ordering::Relaxed);
        }

        if self.deactivate_on_write {
            candidate.set_active(false);
        }
    }
}
