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
//! # nbody-trace
//!
//! Brute-force gravitational N-body integration with a periodic
//! tab-separated trace of the full particle state.
//!
//! ## Features
//!
//! - **Pairwise gravity**: O(n²) softened Newtonian forces, each pair visited once
//! - **Semi-implicit Euler**: symplectic fixed-step integration
//! - **Trace output**: one TSV record every `dump_interval` steps
//! - **Reproducible inputs**: seeded random generation or a particle file
//! - **Parallelization**: optional Rayon force pass with per-worker buffers
//!
//! ## Example
//!
//! ```rust
//! use nbody_trace::config::SimulationConfig;
//! use nbody_trace::io::{TraceFormat, TraceWriter};
//! use nbody_trace::scenarios::sun_earth_moon;
//! use nbody_trace::Simulation;
//!
//! let config = SimulationConfig::new(60.0, 100, 10);
//! let mut sim = Simulation::new(sun_earth_moon(), config).unwrap();
//! let mut trace = TraceWriter::new(Vec::new(), TraceFormat::default());
//! let summary = sim.run(&mut trace).unwrap();
//! assert_eq!(summary.records_written, 10);
//! ```

#![warn(missing_docs)]

/// Command line interface
pub mod cli;

/// Run configuration
pub mod config;

/// Conserved quantities
pub mod diagnostics;

/// Error types
pub mod error;

/// Pairwise gravitational force accumulation
pub mod gravity;

/// Numerical integration methods
pub mod integration;

/// Particle sources and trace output
pub mod io;

/// Particle records and storage
pub mod particles;

/// Built-in initial conditions
pub mod scenarios;

/// Step loop and lifecycle
pub mod simulation;

pub use error::{Result, SimulationError};
pub use particles::{Particle, ParticleStore};
pub use simulation::{RunSummary, Simulation, SimulationState};
