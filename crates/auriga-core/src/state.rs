//! The particle state record.

use std::fmt;

use crate::id::ParticleId;
use crate::vector::Vector3;

/// One particle's kinematic state at a point in its history.
///
/// A [`Candidate`](crate::Candidate) carries three of these: the live
/// `current` state the modules mutate, the `created` snapshot frozen when
/// the candidate came into existence, and the `source` snapshot frozen at
/// the originating source. Energy is in joules, position in meters,
/// direction unit-length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleState {
    /// Particle-type code.
    pub id: ParticleId,
    /// Energy in joules.
    pub energy: f64,
    /// Position in meters.
    pub position: Vector3,
    /// Unit-length direction of travel.
    pub direction: Vector3,
}

impl ParticleState {
    /// Create a state, normalizing the direction.
    pub fn new(id: ParticleId, energy: f64, position: Vector3, direction: Vector3) -> Self {
        Self {
            id,
            energy,
            position,
            direction: direction.normalized(),
        }
    }

    /// Copy of this state with a different particle code and energy,
    /// keeping position and direction.
    ///
    /// The usual way a branching interaction derives a secondary's
    /// creation state from its parent's current state.
    pub fn with_particle(&self, id: ParticleId, energy: f64) -> Self {
        Self {
            id,
            energy,
            ..*self
        }
    }
}

impl fmt::Display for ParticleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "particle {} E={:e} J at {}",
            self.id, self.energy, self.position
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_normalizes_direction() {
        let s = ParticleState::new(
            ParticleId(2212),
            1.0,
            Vector3::ZERO,
            Vector3::new(0.0, 3.0, 0.0),
        );
        assert_eq!(s.direction, Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn with_particle_keeps_kinematics() {
        let s = ParticleState::new(
            ParticleId(2212),
            5.0,
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(1.0, 0.0, 0.0),
        );
        let d = s.with_particle(ParticleId(22), 2.5);
        assert_eq!(d.id, ParticleId(22));
        assert_eq!(d.energy, 2.5);
        assert_eq!(d.position, s.position);
        assert_eq!(d.direction, s.direction);
    }
}
