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
//! Simulation driver
//!
//! Runs a fixed number of steps. Each step:
//!
//! 1. zeroes every force accumulator and adds all pairwise gravity
//! 2. advances velocities and positions with the integrator
//! 3. appends a trace record if `step % dump_interval == 0`
//!
//! The record is written after integration, so its force columns hold the
//! force that produced this step's update and its kinematics hold the
//! updated state.
//!
//! # States
//!
//! ```text
//! Initialized --step/run--> Running { step } --last step--> Completed
//! ```
//!
//! There is no pause or resume. A write failure aborts the run and the
//! error is returned to the caller.

use std::io::Write;

use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};
use crate::gravity::GravitySystem;
use crate::integration::{Integrator, SemiImplicitEuler};
use crate::io::TraceWriter;
use crate::particles::ParticleStore;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    /// Constructed, no step taken yet
    Initialized,
    /// At least one step taken; `step` is the index of the next one
    Running {
        /// Index of the next step to execute
        step: u64,
    },
    /// All configured steps have been executed
    Completed,
}

/// Outcome of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Index of the step that was executed
    pub step: u64,
    /// Whether a trace record was written
    pub dumped: bool,
}

/// Outcome of a complete run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Steps executed by this call
    pub steps: u64,
    /// Trace records written by this call
    pub records_written: u64,
    /// Number of particles simulated
    pub particles: usize,
}

/// Owns the particles and drives force, integration and dump phases
///
/// # Example
///
/// ```
/// use nbody_trace::config::SimulationConfig;
/// use nbody_trace::io::{TraceFormat, TraceWriter, generate_particles};
/// use nbody_trace::simulation::{Simulation, SimulationState};
///
/// let config = SimulationConfig::new(60.0, 10, 5);
/// let mut sim = Simulation::new(generate_particles(3, 1), config).unwrap();
/// let mut trace = TraceWriter::new(Vec::new(), TraceFormat::default());
///
/// let summary = sim.run(&mut trace).unwrap();
/// assert_eq!(summary.records_written, 2);
/// assert_eq!(sim.state(), SimulationState::Completed);
/// ```
pub struct Simulation<I: Integrator = SemiImplicitEuler> {
    particles: ParticleStore,
    gravity: GravitySystem,
    integrator: I,
    config: SimulationConfig,
    state: SimulationState,
}

impl Simulation<SemiImplicitEuler> {
    /// Create a run with the semi-implicit Euler integrator
    ///
    /// Fails with [`SimulationError::Config`] if the configuration is invalid.
    pub fn new(particles: ParticleStore, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let mut integrator = SemiImplicitEuler::new(config.dt);
        integrator.set_warn_on_invalid(config.warn_on_invalid);
        Simulation::with_integrator(particles, config, integrator)
    }
}

impl<I: Integrator> Simulation<I> {
    /// Create a run with a caller-supplied integrator
    ///
    /// The integrator's timestep is overwritten with `config.dt`.
    pub fn with_integrator(
        particles: ParticleStore,
        config: SimulationConfig,
        mut integrator: I,
    ) -> Result<Self> {
        config.validate()?;
        integrator.set_timestep(config.dt);
        if config.warn_on_invalid {
            if let Err(msg) = integrator.validate_timestep() {
                eprintln!("Warning: {}", msg);
            }
        }

        let gravity = GravitySystem::new(config.gravity).with_execution(config.execution);

        Ok(Simulation {
            particles,
            gravity,
            integrator,
            config,
            state: SimulationState::Initialized,
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Run parameters
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Particles in their current state
    pub fn particles(&self) -> &ParticleStore {
        &self.particles
    }

    /// Force accumulator in use
    pub fn gravity(&self) -> &GravitySystem {
        &self.gravity
    }

    /// Integrator in use
    pub fn integrator(&self) -> &I {
        &self.integrator
    }

    /// Consume the driver and hand back the particles
    pub fn into_particles(self) -> ParticleStore {
        self.particles
    }

    fn next_step(&self) -> Result<u64> {
        match self.state {
            SimulationState::Initialized => Ok(0),
            SimulationState::Running { step } => Ok(step),
            SimulationState::Completed => Err(SimulationError::InvalidState(format!(
                "all {} steps have already been executed",
                self.config.steps
            ))),
        }
    }

    /// Execute one step and dump it if it falls on the interval
    ///
    /// With `steps = 0` the first call moves straight to
    /// [`SimulationState::Completed`] and returns `None`.
    pub fn step<W: Write>(&mut self, trace: &mut TraceWriter<W>) -> Result<Option<StepReport>> {
        let step = self.next_step()?;
        if step >= self.config.steps {
            self.state = SimulationState::Completed;
            return Ok(None);
        }

        self.gravity.compute_forces(&mut self.particles);
        self.integrator.integrate(self.particles.as_mut_slice());

        let dumped = self.config.is_dump_step(step);
        if dumped {
            trace.write_record(self.particles.as_slice())?;
        }

        self.state = if step + 1 >= self.config.steps {
            SimulationState::Completed
        } else {
            SimulationState::Running { step: step + 1 }
        };

        Ok(Some(StepReport { step, dumped }))
    }

    /// Execute every remaining step
    ///
    /// The trace is flushed before returning so that a deferred write error
    /// fails the run instead of being lost.
    pub fn run<W: Write>(&mut self, trace: &mut TraceWriter<W>) -> Result<RunSummary> {
        let mut steps = 0;
        let mut records_written = 0;

        while let Some(report) = self.step(trace)? {
            steps += 1;
            if report.dumped {
                records_written += 1;
            }
            if self.state == SimulationState::Completed {
                break;
            }
        }

        trace.flush()?;

        Ok(RunSummary {
            steps,
            records_written,
            particles: self.particles.len(),
        })
    }
}
