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
//! Seeded random initial conditions
//!
//! Draws come from a ChaCha8 stream, so a seed fully determines the
//! generated particles on every platform.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::ops::RangeInclusive;

use crate::error::Result;
use crate::particles::{Mass, Particle, ParticleStore, Position, Velocity};

/// Mass range in kilograms
pub const MASS_RANGE: RangeInclusive<f64> = 1e22..=1e22 + 999.0 * 1e20;

/// Range of each position component in meters
pub const POSITION_RANGE: RangeInclusive<f64> = -500e9..=499e9;

/// Range of each velocity component in meters per second
pub const VELOCITY_RANGE: RangeInclusive<f64> = -1000.0..=999.0;

// Larger stores grow as they fill
const PREALLOCATE_LIMIT: usize = 1 << 16;

/// Generate `count` particles from `seed`
///
/// Forces start at zero.
///
/// # Example
///
/// ```
/// use nbody_trace::io::generate_particles;
///
/// let a = generate_particles(8, 42);
/// let b = generate_particles(8, 42);
/// assert_eq!(a, b);
/// ```
pub fn generate_particles(count: usize, seed: u64) -> ParticleStore {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_with_rng(count, &mut rng)
}

/// Like [`generate_particles`], but reserves the whole store up front and
/// reports a count that cannot be allocated as
/// [`SimulationError::Config`](crate::error::SimulationError::Config)
pub fn try_generate_particles(count: usize, seed: u64) -> Result<ParticleStore> {
    let mut store = ParticleStore::try_with_capacity(count)?;
    fill_with_rng(&mut store, count, &mut ChaCha8Rng::seed_from_u64(seed));
    Ok(store)
}

/// Generate `count` particles from an arbitrary random source
pub fn generate_with_rng<R: Rng>(count: usize, rng: &mut R) -> ParticleStore {
    let mut store = ParticleStore::with_capacity(count.min(PREALLOCATE_LIMIT));
    fill_with_rng(&mut store, count, rng);
    store
}

fn fill_with_rng<R: Rng>(store: &mut ParticleStore, count: usize, rng: &mut R) {
    for _ in 0..count {
        let mass = Mass::new(rng.random_range(MASS_RANGE));
        let position = Position::new(
            rng.random_range(POSITION_RANGE),
            rng.random_range(POSITION_RANGE),
            rng.random_range(POSITION_RANGE),
        );
        let velocity = Velocity::new(
            rng.random_range(VELOCITY_RANGE),
            rng.random_range(VELOCITY_RANGE),
            rng.random_range(VELOCITY_RANGE),
        );
        store.push(Particle::with_mass(mass, position, velocity));
    }
}

/// Draw a fresh seed from the thread-local generator
///
/// Used when the caller did not pin one; report it so the run can be
/// reproduced.
pub fn random_seed() -> u64 {
    rand::rng().random()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::Force;

    #[test]
    fn test_values_stay_in_range() {
        let store = generate_particles(500, 7);
        assert_eq!(store.len(), 500);

        for p in store.iter() {
            assert!(MASS_RANGE.contains(&p.mass()));
            for x in p.position.as_array() {
                assert!(POSITION_RANGE.contains(&x), "position {x} out of range");
            }
            for v in p.velocity.as_array() {
                assert!(VELOCITY_RANGE.contains(&v), "velocity {v} out of range");
            }
            assert_eq!(p.force, Force::zero());
        }
    }

    #[test]
    fn test_same_seed_same_particles() {
        assert_eq!(generate_particles(32, 1234), generate_particles(32, 1234));
    }

    #[test]
    fn test_different_seed_different_particles() {
        assert_ne!(generate_particles(4, 1), generate_particles(4, 2));
    }

    #[test]
    fn test_zero_count() {
        assert!(generate_particles(0, 0).is_empty());
    }

    #[test]
    fn test_try_generate_matches_generate() {
        assert_eq!(try_generate_particles(16, 3).unwrap(), generate_particles(16, 3));
    }

    #[test]
    fn test_unallocatable_count_is_a_config_error() {
        assert!(matches!(
            try_generate_particles(usize::MAX / 2, 3),
            Err(crate::error::SimulationError::Config(_))
        ));
    }
}
