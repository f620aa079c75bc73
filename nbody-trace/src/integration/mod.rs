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
//! Time integration of particle state
//!
//! An integrator consumes the force accumulated by the gravity pass and
//! advances velocity and position in place. Only semi-implicit Euler is
//! provided; adaptive schemes are out of scope.
//!
//! # Timestep Guidelines
//!
//! - The timestep is fixed for the whole run
//! - Orbital problems in SI units typically use dt between 1 s and 1 h
//! - Below about 1e-9 s the position update is lost in f64 rounding for
//!   astronomical coordinates

use crate::particles::Particle;

mod euler;

pub use euler::SemiImplicitEuler;

/// Smallest timestep accepted by `validate_timestep` without a warning
pub const MIN_RECOMMENDED_TIMESTEP: f64 = 1e-9;

/// Trait for numerical integration methods
///
/// Integrators update position and velocity from the force already stored
/// on each particle. They never touch the force accumulator.
pub trait Integrator: Send + Sync {
    /// Get the name of this integrator
    fn name(&self) -> &str;

    /// Get the timestep used by this integrator, in seconds
    fn timestep(&self) -> f64;

    /// Set the timestep for this integrator
    ///
    /// # Panics
    ///
    /// Panics if timestep is non-positive, NaN, or infinite
    fn set_timestep(&mut self, dt: f64);

    /// Validate the timestep
    ///
    /// Returns an error message if the timestep is unusable or so small that
    /// position updates will be lost to rounding.
    fn validate_timestep(&self) -> Result<(), String> {
        let dt = self.timestep();

        if dt <= 0.0 || !dt.is_finite() {
            return Err(format!("Invalid timestep: {}. Must be positive and finite.", dt));
        }

        if dt < MIN_RECOMMENDED_TIMESTEP {
            return Err(format!(
                "Timestep {} is extremely small and may cause precision loss with f64.",
                dt
            ));
        }

        Ok(())
    }

    /// Advance every particle by one timestep
    ///
    /// Returns the number of particles whose state is still finite afterwards.
    fn integrate(&self, particles: &mut [Particle]) -> usize;
}
