//! Unit constants.
//!
//! Internal state is SI: energies in joules, lengths in meters. These
//! constants convert to the units the text persistence layer declares in
//! its column headers (energies in EeV, distances in Mpc).

/// One electron volt in joules.
pub const ELECTRON_VOLT: f64 = 1.602_176_634e-19;

/// One exa-electron-volt (10^18 eV) in joules.
pub const EEV: f64 = 1e18 * ELECTRON_VOLT;

/// One megaparsec in meters.
pub const MPC: f64 = 3.085_677_581_491_367e22;
