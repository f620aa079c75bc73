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
//! Conserved quantities for checking a run
//!
//! None of these feed back into the simulation.

use crate::gravity::GravitySystem;
use crate::particles::Particle;

/// Total momentum Σ m·v in kg·m/s
pub fn total_momentum(particles: &[Particle]) -> [f64; 3] {
    let mut total = [0.0; 3];
    for p in particles {
        let m = p.momentum();
        total[0] += m[0];
        total[1] += m[1];
        total[2] += m[2];
    }
    total
}

/// Kinetic energy of a single particle, 0.5 * m * v²
pub fn particle_kinetic_energy(particle: &Particle) -> f64 {
    let v = particle.velocity.magnitude();
    0.5 * particle.mass() * v * v
}

/// Total kinetic energy in Joules
pub fn kinetic_energy(particles: &[Particle]) -> f64 {
    particles.iter().map(particle_kinetic_energy).sum()
}

/// Kinetic plus softened potential energy
pub fn total_energy(particles: &[Particle], gravity: &GravitySystem) -> f64 {
    kinetic_energy(particles) + gravity.potential_energy(particles)
}

/// Mass-weighted mean position, or `None` for an empty system
pub fn center_of_mass(particles: &[Particle]) -> Option<[f64; 3]> {
    if particles.is_empty() {
        return None;
    }
    let mut weighted = [0.0; 3];
    let mut total_mass = 0.0;
    for p in particles {
        let m = p.mass();
        let x = p.position.as_array();
        weighted[0] += m * x[0];
        weighted[1] += m * x[1];
        weighted[2] += m * x[2];
        total_mass += m;
    }
    Some([
        weighted[0] / total_mass,
        weighted[1] / total_mass,
        weighted[2] / total_mass,
    ])
}

/// Snapshot of the conserved quantities at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConservationReport {
    /// Total momentum
    pub momentum: [f64; 3],
    /// Kinetic plus potential energy
    pub energy: f64,
}

impl ConservationReport {
    /// Measure the current state
    pub fn measure(particles: &[Particle], gravity: &GravitySystem) -> Self {
        ConservationReport {
            momentum: total_momentum(particles),
            energy: total_energy(particles, gravity),
        }
    }

    /// Relative energy change from `initial` to `self`
    pub fn energy_drift(&self, initial: &ConservationReport) -> f64 {
        if initial.energy == 0.0 {
            return (self.energy - initial.energy).abs();
        }
        ((self.energy - initial.energy) / initial.energy).abs()
    }

    /// Magnitude of the momentum change from `initial` to `self`
    pub fn momentum_change(&self, initial: &ConservationReport) -> f64 {
        let d = [
            self.momentum[0] - initial.momentum[0],
            self.momentum[1] - initial.momentum[1],
            self.momentum[2] - initial.momentum[2],
        ];
        (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gravity::GravityConfig;
    use crate::particles::{Position, Velocity};

    #[test]
    fn test_momentum_and_kinetic_energy() {
        let particles = [
            Particle::new(2.0, Position::zero(), Velocity::new(3.0, 0.0, 0.0)),
            Particle::new(1.0, Position::zero(), Velocity::new(-6.0, 0.0, 8.0)),
        ];
        assert_eq!(total_momentum(&particles), [0.0, 0.0, 8.0]);
        assert_eq!(kinetic_energy(&particles), 9.0 + 50.0);
    }

    #[test]
    fn test_center_of_mass() {
        assert_eq!(center_of_mass(&[]), None);

        let particles = [
            Particle::new(3.0, Position::new(0.0, 0.0, 0.0), Velocity::zero()),
            Particle::new(1.0, Position::new(4.0, 8.0, 0.0), Velocity::zero()),
        ];
        assert_eq!(center_of_mass(&particles), Some([1.0, 2.0, 0.0]));
    }

    #[test]
    fn test_report_deltas() {
        let gravity = GravitySystem::new(GravityConfig::new(1.0, 0.0));
        let mut particles = [
            Particle::new(1.0, Position::new(0.0, 0.0, 0.0), Velocity::zero()),
            Particle::new(1.0, Position::new(1.0, 0.0, 0.0), Velocity::zero()),
        ];
        let initial = ConservationReport::measure(&particles, &gravity);
        assert_eq!(initial.energy, -1.0);

        particles[0].velocity = Velocity::new(0.0, 3.0, 4.0);
        let later = ConservationReport::measure(&particles, &gravity);
        assert_eq!(later.momentum_change(&initial), 5.0);
        assert_eq!(later.energy_drift(&initial), 12.5);
    }
}
