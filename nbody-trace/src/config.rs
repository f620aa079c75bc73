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
//! Run configuration
//!
//! Collects everything the driver needs besides the particles themselves:
//! timestep, step count, dump cadence, force constants, execution strategy
//! and trace formatting.

use crate::error::{Result, SimulationError};
use crate::gravity::{Execution, GravityConfig};
use crate::io::TraceFormat;

/// Parameters of one simulation run
///
/// # Example
///
/// ```
/// use nbody_trace::config::SimulationConfig;
///
/// let config = SimulationConfig::new(60.0, 1000, 10);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.expected_records(), 100);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Timestep in seconds
    pub dt: f64,
    /// Number of integration steps
    pub steps: u64,
    /// A record is written on every step whose index is a multiple of this
    pub dump_interval: u64,
    /// Force law constants
    pub gravity: GravityConfig,
    /// Force evaluation strategy
    pub execution: Execution,
    /// Trace number formatting
    pub trace: TraceFormat,
    /// Seed for random initial conditions; `None` draws one at startup
    pub seed: Option<u64>,
    /// Whether to log warnings for non-finite particle state
    pub warn_on_invalid: bool,
}

impl SimulationConfig {
    /// Create a configuration with SI gravity and default formatting
    pub fn new(dt: f64, steps: u64, dump_interval: u64) -> Self {
        SimulationConfig {
            dt,
            steps,
            dump_interval,
            gravity: GravityConfig::default(),
            execution: Execution::Sequential,
            trace: TraceFormat::default(),
            seed: None,
            warn_on_invalid: true,
        }
    }

    /// Replace the force constants
    pub fn with_gravity(mut self, gravity: GravityConfig) -> Self {
        self.gravity = gravity;
        self
    }

    /// Select the force evaluation strategy
    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Replace the trace formatting
    pub fn with_trace_format(mut self, trace: TraceFormat) -> Self {
        self.trace = trace;
        self
    }

    /// Pin the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Disable non-finite state warnings
    pub fn quiet(mut self) -> Self {
        self.warn_on_invalid = false;
        self
    }

    /// Check the parameters before any simulation work starts
    pub fn validate(&self) -> Result<()> {
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(SimulationError::Config(format!(
                "timestep must be positive and finite, got {}",
                self.dt
            )));
        }
        if self.dump_interval == 0 {
            return Err(SimulationError::Config(
                "dump interval must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether step `step` (0-based) produces a trace record
    pub fn is_dump_step(&self, step: u64) -> bool {
        self.dump_interval != 0 && step % self.dump_interval == 0
    }

    /// Number of records a complete run writes
    pub fn expected_records(&self) -> u64 {
        if self.dump_interval == 0 {
            return 0;
        }
        self.steps.div_ceil(self.dump_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::new(1.0, 10, 1);
        assert_eq!(config.gravity, GravityConfig::default());
        assert_eq!(config.execution, Execution::Sequential);
        assert_eq!(config.trace, TraceFormat::default());
        assert_eq!(config.seed, None);
        assert!(config.warn_on_invalid);
    }

    #[test]
    fn test_builder_methods() {
        let config = SimulationConfig::new(1.0, 10, 1)
            .with_gravity(GravityConfig::new(1.0, 0.0))
            .with_execution(Execution::Parallel)
            .with_trace_format(TraceFormat::new(12))
            .with_seed(5)
            .quiet();
        assert_eq!(config.gravity.g_constant(), 1.0);
        assert_eq!(config.execution, Execution::Parallel);
        assert_eq!(config.trace.precision(), 12);
        assert_eq!(config.seed, Some(5));
        assert!(!config.warn_on_invalid);
    }

    #[test]
    fn test_invalid_timestep_rejected() {
        for dt in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = SimulationConfig::new(dt, 10, 1).validate().unwrap_err();
            assert!(err.to_string().contains("timestep"), "dt = {dt}");
        }
    }

    #[test]
    fn test_zero_dump_interval_rejected() {
        assert!(matches!(
            SimulationConfig::new(1.0, 10, 0).validate(),
            Err(SimulationError::Config(_))
        ));
    }

    #[test]
    fn test_zero_steps_is_valid() {
        let config = SimulationConfig::new(1.0, 0, 1);
        assert!(config.validate().is_ok());
        assert_eq!(config.expected_records(), 0);
    }

    #[test]
    fn test_dump_schedule() {
        let config = SimulationConfig::new(1.0, 10, 3);
        let dumps: Vec<u64> = (0..config.steps).filter(|&s| config.is_dump_step(s)).collect();
        assert_eq!(dumps, vec![0, 3, 6, 9]);
        assert_eq!(config.expected_records(), 4);

        assert_eq!(SimulationConfig::new(1.0, 1000, 1).expected_records(), 1000);
    }
}
