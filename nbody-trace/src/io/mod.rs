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
//! Particle sources and the trace serializer
//!
//! Initial conditions come either from the seeded generator or from the
//! first line of a file. The trace writer appends one record per dumped
//! step in the same line format.

use std::path::PathBuf;

use crate::error::{Result, SimulationError};
use crate::particles::ParticleStore;

mod generator;
mod input;
mod trace;

pub use generator::{
    generate_particles, generate_with_rng, random_seed, try_generate_particles, MASS_RANGE,
    POSITION_RANGE, VELOCITY_RANGE,
};
pub use input::{load_particles, read_particles, FIELDS_PER_PARTICLE};
pub use trace::{format_scientific, TraceFormat, TraceWriter, DEFAULT_PRECISION, MAX_PRECISION};

/// Where the initial particles come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticleSource {
    /// Generate this many random particles
    Random {
        /// Number of particles
        count: usize,
    },
    /// Read the first line of this file
    File(PathBuf),
}

impl ParticleSource {
    /// Interpret the first positional argument
    ///
    /// A non-empty string made only of ASCII decimal digits is a particle
    /// count; anything else is a path.
    ///
    /// ```
    /// use nbody_trace::io::ParticleSource;
    ///
    /// assert_eq!(ParticleSource::parse("100").unwrap(), ParticleSource::Random { count: 100 });
    /// assert!(matches!(ParticleSource::parse("bodies.tsv").unwrap(), ParticleSource::File(_)));
    /// ```
    pub fn parse(arg: &str) -> Result<Self> {
        if !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_digit()) {
            let count = arg.parse().map_err(|_| {
                SimulationError::Config(format!("particle count '{arg}' is too large"))
            })?;
            Ok(ParticleSource::Random { count })
        } else {
            Ok(ParticleSource::File(PathBuf::from(arg)))
        }
    }

    /// Produce the initial particles
    ///
    /// `seed` is only consulted for [`ParticleSource::Random`].
    pub fn load(&self, seed: u64) -> Result<ParticleStore> {
        match self {
            ParticleSource::Random { count } => try_generate_particles(*count, seed),
            ParticleSource::File(path) => load_particles(path),
        }
    }
}
