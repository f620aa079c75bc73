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
//! Pairwise Newtonian gravity
//!
//! Every point mass attracts every other point mass with a force
//! proportional to the product of their masses and inversely proportional to
//! the square of their separation:
//!
//! **F = G * (m₁ * m₂) / r²**
//!
//! # Softening
//!
//! A constant ε is added to the squared separation before anything else is
//! computed, so coincident particles produce a zero (not infinite) force:
//!
//! ```text
//! d         = p_j - p_i
//! dist2     = |d|² + ε
//! magnitude = G * m_i * m_j / dist2
//! f         = magnitude * d / sqrt(dist2)
//! ```
//!
//! Note that ε is added to r² directly (units of m²), not squared. The
//! default of 1e-9 is tuned for SI-scale simulations.
//!
//! # Pair iteration
//!
//! Each unordered pair is visited exactly once (i < j). The contribution is
//! added to particle i and subtracted from particle j, so the net force over
//! the whole system vanishes up to rounding.
//!
//! # Parallel computation
//!
//! With the `parallel` feature, [`Execution::Parallel`] splits the rows of
//! the pair triangle across rayon workers. A pair writes two accumulators,
//! so each worker folds into its own per-particle buffer and the buffers are
//! summed once the parallel phase is over.

use crate::error::{Result, SimulationError};
use crate::particles::{Force, Particle, ParticleStore};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Gravitational constant used by default, in m³/(kg⋅s²)
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674e-11;

/// Default softening term added to the squared separation (m²)
pub const DEFAULT_SOFTENING: f64 = 1e-9;

/// Physical constants of the force law
///
/// # Example
///
/// ```
/// use nbody_trace::gravity::{GravityConfig, GRAVITATIONAL_CONSTANT};
///
/// let si = GravityConfig::default();
/// assert_eq!(si.g_constant(), GRAVITATIONAL_CONSTANT);
///
/// // Unit-friendly values for tests and toy systems
/// let unit = GravityConfig::new(1.0, 1e-6);
/// assert_eq!(unit.softening(), 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityConfig {
    g_constant: f64,
    softening: f64,
}

impl GravityConfig {
    /// Create a configuration from G and ε
    ///
    /// # Panics
    ///
    /// Panics if either value is negative or not finite.
    pub fn new(g_constant: f64, softening: f64) -> Self {
        assert!(
            g_constant >= 0.0 && g_constant.is_finite(),
            "Gravitational constant must be non-negative and finite"
        );
        assert!(
            softening >= 0.0 && softening.is_finite(),
            "Softening factor must be non-negative and finite"
        );
        GravityConfig {
            g_constant,
            softening,
        }
    }

    /// Fallible variant of `new` for user-supplied values
    pub fn try_new(g_constant: f64, softening: f64) -> Result<Self> {
        if !(g_constant >= 0.0 && g_constant.is_finite()) {
            return Err(SimulationError::Config(format!(
                "gravitational constant must be non-negative and finite, got {g_constant}"
            )));
        }
        if !(softening >= 0.0 && softening.is_finite()) {
            return Err(SimulationError::Config(format!(
                "softening must be non-negative and finite, got {softening}"
            )));
        }
        Ok(GravityConfig {
            g_constant,
            softening,
        })
    }

    /// Gravitational constant G
    pub fn g_constant(&self) -> f64 {
        self.g_constant
    }

    /// Softening term ε
    pub fn softening(&self) -> f64 {
        self.softening
    }
}

impl Default for GravityConfig {
    fn default() -> Self {
        GravityConfig::new(GRAVITATIONAL_CONSTANT, DEFAULT_SOFTENING)
    }
}

/// How the pair triangle is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    /// Single thread, rows in index order
    #[default]
    Sequential,
    /// Rayon workers with per-worker reduction buffers
    Parallel,
}

/// Force accumulator for the whole particle set
pub struct GravitySystem {
    config: GravityConfig,
    execution: Execution,
}

impl GravitySystem {
    /// Create a sequential gravity system
    pub fn new(config: GravityConfig) -> Self {
        GravitySystem {
            config,
            execution: Execution::Sequential,
        }
    }

    /// Select the execution strategy
    ///
    /// Requesting [`Execution::Parallel`] without the `parallel` feature
    /// falls back to the sequential path.
    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = supported_execution(execution);
        self
    }

    /// Force constants in use
    pub fn config(&self) -> &GravityConfig {
        &self.config
    }

    /// Execution strategy in use
    pub fn execution(&self) -> Execution {
        self.execution
    }

    /// Force exerted on `a` by `b`
    ///
    /// The force on `b` by `a` is exactly the negation.
    pub fn pair_force(&self, a: &Particle, b: &Particle) -> Force {
        let [dx, dy, dz] = a.position.displacement_to(&b.position);

        let dist2 = dx * dx + dy * dy + dz * dz + self.config.softening;
        let dist = dist2.sqrt();
        let magnitude = self.config.g_constant * a.mass() * b.mass() / dist2;

        Force::new(magnitude * dx / dist, magnitude * dy / dist, magnitude * dz / dist)
    }

    /// Zero every accumulator, then add all pairwise contributions
    ///
    /// Returns the number of pairs evaluated, n(n-1)/2.
    pub fn compute_forces(&self, particles: &mut ParticleStore) -> usize {
        particles.reset_forces();
        match self.execution {
            #[cfg(feature = "parallel")]
            Execution::Parallel => self.compute_forces_parallel(particles.as_mut_slice()),
            _ => self.compute_forces_sequential(particles.as_mut_slice()),
        }
    }

    fn compute_forces_sequential(&self, particles: &mut [Particle]) -> usize {
        let n = particles.len();
        for i in 0..n {
            let (head, tail) = particles.split_at_mut(i + 1);
            let pi = &mut head[i];
            for pj in tail.iter_mut() {
                let f = self.pair_force(pi, pj);
                pi.force.add(&f);
                pj.force.sub(&f);
            }
        }

        pair_count(n)
    }

    #[cfg(feature = "parallel")]
    fn compute_forces_parallel(&self, particles: &mut [Particle]) -> usize {
        let n = particles.len();
        let snapshot: &[Particle] = particles;

        let totals = (0..n)
            .into_par_iter()
            .fold(
                || vec![Force::zero(); n],
                |mut buffer, i| {
                    let pi = &snapshot[i];
                    for j in (i + 1)..n {
                        let f = self.pair_force(pi, &snapshot[j]);
                        buffer[i].add(&f);
                        buffer[j].sub(&f);
                    }
                    buffer
                },
            )
            .reduce(
                || vec![Force::zero(); n],
                |mut acc, buffer| {
                    for (total, partial) in acc.iter_mut().zip(&buffer) {
                        total.add(partial);
                    }
                    acc
                },
            );

        for (particle, force) in particles.iter_mut().zip(totals) {
            particle.force.add(&force);
        }

        pair_count(n)
    }

    /// Softened gravitational potential energy of the system in Joules
    ///
    /// Uses the same `sqrt(|d|² + ε)` separation as the force law.
    pub fn potential_energy(&self, particles: &[Particle]) -> f64 {
        let mut total = 0.0;
        for (i, pi) in particles.iter().enumerate() {
            for pj in &particles[i + 1..] {
                let [dx, dy, dz] = pi.position.displacement_to(&pj.position);
                let dist = (dx * dx + dy * dy + dz * dz + self.config.softening).sqrt();
                total -= self.config.g_constant * pi.mass() * pj.mass() / dist;
            }
        }
        total
    }
}

#[cfg(feature = "parallel")]
fn supported_execution(requested: Execution) -> Execution {
    requested
}

#[cfg(not(feature = "parallel"))]
fn supported_execution(requested: Execution) -> Execution {
    if requested == Execution::Parallel {
        eprintln!("Warning: built without the `parallel` feature, computing forces sequentially");
    }
    Execution::Sequential
}

fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}
