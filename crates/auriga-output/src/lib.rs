//! Text persistence for candidates.
//!
//! One textual record per candidate in a self-describing column layout:
//! the header documents every column, energies are in EeV, distances in
//! Mpc, and all three state snapshots plus the trajectory bookkeeping
//! round-trip losslessly within the declared precision (nine fractional
//! digits).
//!
//! [`RecordWriter`] streams records to any `Write` sink and
//! [`RecordReader`] parses them back from any `BufRead` source, so tests
//! run on byte buffers and production code uses buffered files.
//! Malformed input is a hard error carrying the offending line number —
//! there is no partial recovery.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod codec;
mod error;
mod reader;
mod record;
mod writer;

pub use codec::{format_record, header};
pub use error::PersistError;
pub use reader::RecordReader;
pub use record::CandidateRecord;
pub use writer::RecordWriter;
