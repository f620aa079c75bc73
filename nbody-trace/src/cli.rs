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
//! Command line interface
//!
//! ```text
//! nbody-trace <NUM_PARTICLES|INPUT_FILE> <DT> <STEPS> <DUMP_INTERVAL> <OUTPUT_FILE> [OPTIONS]
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::config::SimulationConfig;
use crate::diagnostics::ConservationReport;
use crate::error::{Result, SimulationError};
use crate::gravity::{Execution, GravityConfig, DEFAULT_SOFTENING, GRAVITATIONAL_CONSTANT};
use crate::io::{random_seed, ParticleSource, TraceFormat, TraceWriter, DEFAULT_PRECISION, MAX_PRECISION};
use crate::simulation::{RunSummary, Simulation};

/// Gravitational N-body simulation with a TSV state trace
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Particle count (digits only) for random bodies, or a path to an input file
    #[arg(value_name = "NUM_PARTICLES|INPUT_FILE")]
    pub input: String,

    /// Timestep in seconds
    #[arg(value_name = "DT", allow_negative_numbers = true)]
    pub dt: f64,

    /// Number of integration steps
    #[arg(value_name = "STEPS")]
    pub steps: u64,

    /// Write the state every this many steps (steps 0, N, 2N, ...)
    #[arg(value_name = "DUMP_INTERVAL")]
    pub dump_interval: u64,

    /// Trace file to write
    #[arg(value_name = "OUTPUT_FILE")]
    pub output: PathBuf,

    /// Random seed for particle generation
    #[arg(short = 's', long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Gravitational constant in m³/(kg⋅s²)
    #[arg(short = 'g', long, value_name = "VALUE", allow_negative_numbers = true, default_value_t = GRAVITATIONAL_CONSTANT)]
    pub gravity: f64,

    /// Softening term added to squared distances (m²)
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true, default_value_t = DEFAULT_SOFTENING)]
    pub softening: f64,

    /// Digits after the decimal point in the trace
    #[arg(short = 'p', long, value_name = "DIGITS", default_value_t = DEFAULT_PRECISION)]
    pub precision: usize,

    /// Compute forces on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Print progress and conservation diagnostics
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Args {
    /// Build and validate the run configuration
    pub fn to_config(&self) -> Result<SimulationConfig> {
        if self.precision > MAX_PRECISION {
            return Err(SimulationError::Config(format!(
                "precision must be at most {MAX_PRECISION}, got {}",
                self.precision
            )));
        }

        let mut config = SimulationConfig::new(self.dt, self.steps, self.dump_interval)
            .with_gravity(GravityConfig::try_new(self.gravity, self.softening)?)
            .with_trace_format(TraceFormat::new(self.precision));
        if self.parallel {
            config = config.with_execution(Execution::Parallel);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }

        config.validate()?;
        Ok(config)
    }

    /// Interpret the first positional argument
    pub fn source(&self) -> Result<ParticleSource> {
        ParticleSource::parse(&self.input)
    }
}

/// Load the particles, open the trace and run to completion
///
/// Every failure is returned before or instead of partial success; the
/// caller maps it to a non-zero exit code.
pub fn execute(args: &Args) -> Result<RunSummary> {
    let config = args.to_config()?;
    let source = args.source()?;

    let seed = match config.seed {
        Some(seed) => seed,
        None => {
            let seed = random_seed();
            if matches!(source, ParticleSource::Random { .. }) {
                println!("Using random seed: {seed}");
            }
            seed
        }
    };

    let particles = source.load(seed)?;
    let mut trace = TraceWriter::create(&args.output, config.trace)?;

    if args.verbose {
        println!(
            "Simulating {} particles for {} steps (dt = {} s), writing every {} steps to {}",
            particles.len(),
            config.steps,
            config.dt,
            config.dump_interval,
            args.output.display()
        );
    }

    let mut simulation = Simulation::new(particles, config)?;
    let initial = ConservationReport::measure(simulation.particles().as_slice(), simulation.gravity());

    let summary = simulation.run(&mut trace)?;
    trace.finish()?;

    if args.verbose {
        let last = ConservationReport::measure(simulation.particles().as_slice(), simulation.gravity());
        println!("Relative energy drift: {:.3e}", last.energy_drift(&initial));
        println!("Momentum change: {:.3e} kg·m/s", last.momentum_change(&initial));
    }

    Ok(summary)
}
