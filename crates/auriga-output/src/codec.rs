//! Formatting and parsing of the column layout.
//!
//! One tab-separated line per candidate, 26 columns: the current, created
//! and source states (id, energy, position, direction each), the parent
//! serial, and the trajectory length. Energies are written in EeV and
//! distances in Mpc with nine fractional digits — the format's declared
//! round-trip precision.

use auriga_core::units::{EEV, MPC};
use auriga_core::{ParticleId, ParticleState, Vector3};

use crate::error::PersistError;
use crate::record::CandidateRecord;

/// Number of tab-separated columns in a record line.
const COLUMNS: usize = 26;

/// Column value for "no parent".
const NO_PARENT: i64 = -1;

/// The self-describing header written at the top of every dump.
pub fn header() -> &'static str {
    "\
#ID\tE\tX\tY\tZ\tDX\tDY\tDZ\tcID\tcE\tcX\tcY\tcZ\tcDX\tcDY\tcDZ\tiID\tiE\tiX\tiY\tiZ\tiDX\tiDY\tiDZ\tpSER\tD
#
# ID..DZ     current state: particle id, energy [EeV], position [Mpc], direction
# cID..cDZ   created state: state when this candidate came into existence
# iID..iDZ   source state: state at the originating source
# pSER       parent candidate serial (-1 for primaries)
# D          accumulated trajectory length [Mpc]
#
"
}

fn push_state(line: &mut String, state: &ParticleState) {
    use std::fmt::Write;
    let _ = write!(
        line,
        "{}\t{:.9e}\t{:.9e}\t{:.9e}\t{:.9e}\t{:.9e}\t{:.9e}\t{:.9e}",
        state.id,
        state.energy / EEV,
        state.position.x / MPC,
        state.position.y / MPC,
        state.position.z / MPC,
        state.direction.x,
        state.direction.y,
        state.direction.z,
    );
}

/// Format one record as a single line, without a trailing newline.
pub fn format_record(record: &CandidateRecord) -> String {
    use std::fmt::Write;
    let mut line = String::with_capacity(COLUMNS * 18);
    push_state(&mut line, &record.current);
    line.push('\t');
    push_state(&mut line, &record.created);
    line.push('\t');
    push_state(&mut line, &record.source);
    let parent = record.parent.map_or(NO_PARENT, |p| p as i64);
    let _ = write!(
        line,
        "\t{}\t{:.9e}",
        parent,
        record.trajectory_length / MPC
    );
    line
}

fn parse_field<T: std::str::FromStr>(
    field: &str,
    what: &str,
    line: u64,
) -> Result<T, PersistError> {
    field.parse().map_err(|_| PersistError::Malformed {
        line,
        reason: format!("cannot parse {what} from '{field}'"),
    })
}

fn parse_state(fields: &[&str], line: u64) -> Result<ParticleState, PersistError> {
    let id = ParticleId(parse_field::<i32>(fields[0], "particle id", line)?);
    let energy = parse_field::<f64>(fields[1], "energy", line)? * EEV;
    let position = Vector3::new(
        parse_field::<f64>(fields[2], "position x", line)? * MPC,
        parse_field::<f64>(fields[3], "position y", line)? * MPC,
        parse_field::<f64>(fields[4], "position z", line)? * MPC,
    );
    let direction = Vector3::new(
        parse_field::<f64>(fields[5], "direction x", line)?,
        parse_field::<f64>(fields[6], "direction y", line)?,
        parse_field::<f64>(fields[7], "direction z", line)?,
    );
    Ok(ParticleState::new(id, energy, position, direction))
}

/// Parse one record line.
///
/// `line` is the 1-based line number for error reporting. The caller has
/// already stripped comments and blank lines.
pub(crate) fn parse_record(text: &str, line: u64) -> Result<CandidateRecord, PersistError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != COLUMNS {
        return Err(PersistError::Malformed {
            line,
            reason: format!("expected {COLUMNS} columns, found {}", fields.len()),
        });
    }

    let current = parse_state(&fields[0..8], line)?;
    let created = parse_state(&fields[8..16], line)?;
    let source = parse_state(&fields[16..24], line)?;
    let parent_raw = parse_field::<i64>(fields[24], "parent serial", line)?;
    let parent = if parent_raw < 0 {
        None
    } else {
        Some(parent_raw as u64)
    };
    let trajectory_length = parse_field::<f64>(fields[25], "trajectory length", line)? * MPC;

    Ok(CandidateRecord {
        current,
        created,
        source,
        parent,
        trajectory_length,
    })
}
