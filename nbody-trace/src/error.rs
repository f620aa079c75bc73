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
//! Error taxonomy for simulation setup and execution
//!
//! Every failure is fatal: the simulation is a deterministic batch job with
//! no transient failure sources, so nothing is retried.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors produced while configuring, loading, running or recording a simulation
#[derive(Debug)]
pub enum SimulationError {
    /// Missing or malformed configuration (command-line arguments, constants)
    Config(String),
    /// An input or output file could not be opened, read or written
    Io {
        /// File involved in the failed operation
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
    /// The input file did not follow the particle line format
    Parse {
        /// File being parsed
        path: PathBuf,
        /// Description of the problem
        message: String,
    },
    /// A particle was given a zero, negative or non-finite mass
    InvalidMass {
        /// Index of the offending particle in insertion order
        index: usize,
        /// Rejected mass value
        value: f64,
    },
    /// The driver was asked to do something its current state does not allow
    InvalidState(String),
}

impl SimulationError {
    /// Wrap an I/O error with the path it relates to
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SimulationError::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a parse error for the given input file
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        SimulationError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Config(msg) => write!(f, "Invalid configuration: {msg}"),
            SimulationError::Io { path, source } => {
                write!(f, "I/O error on {}: {source}", path.display())
            }
            SimulationError::Parse { path, message } => {
                write!(f, "Malformed input file {}: {message}", path.display())
            }
            SimulationError::InvalidMass { index, value } => write!(
                f,
                "Particle {index} has invalid mass {value:e} (must be positive and finite)"
            ),
            SimulationError::InvalidState(msg) => write!(f, "Invalid simulation state: {msg}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SimulationError>;
