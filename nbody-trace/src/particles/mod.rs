// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Particle records and the contiguous store that owns them
//!
//! A particle has no identity beyond its index. The store keeps insertion
//! order, which fixes the pairwise iteration order of the force pass and
//! therefore its floating-point rounding.

mod components;

pub use components::{Force, Mass, Position, Velocity};

use crate::error::{Result, SimulationError};

/// A point mass with its kinematic state and force accumulator
///
/// The mass is fixed at construction. Position and velocity are advanced by
/// the integrator; the force is rewritten by the force pass every step.
///
/// # Examples
///
/// ```
/// use nbody_trace::particles::{Particle, Position, Velocity};
///
/// let earth = Particle::new(5.972e24, Position::new(1.496e11, 0.0, 0.0), Velocity::new(0.0, 29780.0, 0.0));
/// assert_eq!(earth.mass(), 5.972e24);
/// assert_eq!(earth.force.magnitude(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    mass: Mass,
    /// Position in meters
    pub position: Position,
    /// Velocity in meters per second
    pub velocity: Velocity,
    /// Force accumulated during the current step, in Newtons
    pub force: Force,
}

impl Particle {
    /// Create a particle at rest with respect to forces (zero accumulator)
    ///
    /// # Panics
    ///
    /// Panics if `mass` is not positive and finite. Use `try_new` for
    /// untrusted input.
    pub fn new(mass: f64, position: Position, velocity: Velocity) -> Self {
        Particle::with_mass(Mass::new(mass), position, velocity)
    }

    /// Create a particle from an already validated mass
    pub fn with_mass(mass: Mass, position: Position, velocity: Velocity) -> Self {
        Particle {
            mass,
            position,
            velocity,
            force: Force::zero(),
        }
    }

    /// Fallible constructor used by loaders
    ///
    /// `index` is only used to identify the particle in the error.
    pub fn try_new(index: usize, mass: f64, position: Position, velocity: Velocity) -> Result<Self> {
        let mass = Mass::try_new(mass).ok_or(SimulationError::InvalidMass { index, value: mass })?;
        Ok(Particle::with_mass(mass, position, velocity))
    }

    /// Mass in kilograms
    pub fn mass(&self) -> f64 {
        self.mass.value()
    }

    /// Validated mass component
    pub fn mass_component(&self) -> &Mass {
        &self.mass
    }

    /// Momentum `m * v` in kg·m/s
    pub fn momentum(&self) -> [f64; 3] {
        let m = self.mass.value();
        let v = self.velocity.as_array();
        [m * v[0], m * v[1], m * v[2]]
    }

    /// Check that position, velocity and force are all finite
    pub fn is_valid(&self) -> bool {
        self.position.is_valid() && self.velocity.is_valid() && self.force.is_valid()
    }
}

/// Owned, ordered sequence of particles
///
/// Operations take the store (or its slice) by exclusive reference, so the
/// force pass, the integrator and the serializer never alias.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    /// Create an empty store
    pub fn new() -> Self {
        ParticleStore {
            particles: Vec::new(),
        }
    }

    /// Create an empty store with room for `capacity` particles
    pub fn with_capacity(capacity: usize) -> Self {
        ParticleStore {
            particles: Vec::with_capacity(capacity),
        }
    }

    /// Like [`with_capacity`](Self::with_capacity), but reports an
    /// allocation failure instead of aborting
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let mut particles = Vec::new();
        particles.try_reserve_exact(capacity).map_err(|e| {
            SimulationError::Config(format!("cannot allocate {capacity} particles: {e}"))
        })?;
        Ok(ParticleStore { particles })
    }

    /// Append a particle; its index is the previous length
    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Number of particles
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the store holds no particles
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Get a particle by index
    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    /// Iterate mutably in insertion order
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }

    /// Borrow the particles as a slice
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// Borrow the particles as a mutable slice
    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Zero every force accumulator
    pub fn reset_forces(&mut self) {
        for particle in &mut self.particles {
            particle.force = Force::zero();
        }
    }

    /// Vector sum of all force accumulators
    ///
    /// Zero up to rounding after a complete pairwise force pass.
    pub fn net_force(&self) -> Force {
        let mut total = Force::zero();
        for particle in &self.particles {
            total.add(&particle.force);
        }
        total
    }
}

impl From<Vec<Particle>> for ParticleStore {
    fn from(particles: Vec<Particle>) -> Self {
        ParticleStore { particles }
    }
}

impl FromIterator<Particle> for ParticleStore {
    fn from_iter<T: IntoIterator<Item = Particle>>(iter: T) -> Self {
        ParticleStore {
            particles: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ParticleStore {
    type Item = Particle;
    type IntoIter = std::vec::IntoIter<Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParticleStore {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_starts_with_zero_force() {
        let p = Particle::new(2.0, Position::new(1.0, 2.0, 3.0), Velocity::new(1.0, 0.0, 0.0));
        assert_eq!(p.force, Force::zero());
        assert_eq!(p.mass(), 2.0);
        assert_eq!(p.momentum(), [2.0, 0.0, 0.0]);
        assert!(p.is_valid());
    }

    #[test]
    fn test_try_new_rejects_bad_mass() {
        let err = Particle::try_new(7, 0.0, Position::zero(), Velocity::zero()).unwrap_err();
        match err {
            SimulationError::InvalidMass { index, value } => {
                assert_eq!(index, 7);
                assert_eq!(value, 0.0);
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(Particle::try_new(0, -5.0, Position::zero(), Velocity::zero()).is_err());
        assert!(Particle::try_new(0, f64::NAN, Position::zero(), Velocity::zero()).is_err());
        assert!(Particle::try_new(0, 1.0, Position::zero(), Velocity::zero()).is_ok());
    }

    #[test]
    fn test_store_preserves_insertion_order() {
        let store: ParticleStore = (1..=4)
            .map(|i| Particle::new(i as f64, Position::new(i as f64, 0.0, 0.0), Velocity::zero()))
            .collect();

        assert_eq!(store.len(), 4);
        let masses: Vec<f64> = store.iter().map(|p| p.mass()).collect();
        assert_eq!(masses, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(store.get(2).map(|p| p.position.x()), Some(3.0));
        assert!(store.get(4).is_none());
    }

    #[test]
    fn test_reset_forces() {
        let mut store = ParticleStore::new();
        assert!(store.is_empty());
        for _ in 0..3 {
            let mut p = Particle::new(1.0, Position::zero(), Velocity::zero());
            p.force = Force::new(1.0, 2.0, 3.0);
            store.push(p);
        }
        assert_eq!(store.net_force(), Force::new(3.0, 6.0, 9.0));

        store.reset_forces();
        assert!(store.iter().all(|p| p.force == Force::zero()));
        assert_eq!(store.net_force(), Force::zero());
    }

    #[test]
    fn test_try_with_capacity_reports_overflow() {
        assert!(ParticleStore::try_with_capacity(16).is_ok());
        assert!(matches!(
            ParticleStore::try_with_capacity(usize::MAX / 2),
            Err(SimulationError::Config(_))
        ));
    }
}
