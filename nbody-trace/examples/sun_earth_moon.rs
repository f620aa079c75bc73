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
//! Sun, Earth and Moon
//!
//! Integrates the three-body system with one minute steps and writes a
//! trace record every ten minutes to `simulation.tsv`. Energy drift and the
//! Earth-Moon separation are printed along the way.
//!
//! # Running
//!
//! ```bash
//! cargo run --example sun_earth_moon --release
//!
//! # Simulate 30 days
//! cargo run --example sun_earth_moon --release -- 43200
//! ```

use nbody_trace::config::SimulationConfig;
use nbody_trace::diagnostics::ConservationReport;
use nbody_trace::gravity::GRAVITATIONAL_CONSTANT;
use nbody_trace::io::{TraceFormat, TraceWriter};
use nbody_trace::scenarios::{sun_earth_moon, EARTH_ORBIT_RADIUS};
use nbody_trace::{Simulation, SimulationState};

const MINUTE: f64 = 60.0;
const DAY: f64 = 86400.0;

fn main() -> nbody_trace::Result<()> {
    let steps = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<u64>() {
            Ok(steps) => steps,
            Err(_) => {
                eprintln!("Warning: Invalid step count '{}', using default 1000", arg);
                1000
            }
        },
        None => 1000,
    };

    println!("==========================================================");
    println!("       Sun / Earth / Moon");
    println!("==========================================================");
    println!("  G = {:.5e} m³/(kg⋅s²)", GRAVITATIONAL_CONSTANT);
    println!("  Timestep: {:.0} s", MINUTE);
    println!("  Duration: {:.2} days", steps as f64 * MINUTE / DAY);
    println!();

    let config = SimulationConfig::new(MINUTE, steps, 10);
    let mut sim = Simulation::new(sun_earth_moon(), config)?;
    let mut trace = TraceWriter::create("simulation.tsv", TraceFormat::default())?;

    let initial = ConservationReport::measure(sim.particles().as_slice(), sim.gravity());
    println!("Initial energy: {:.6e} J", initial.energy);

    let report_every = (steps / 10).max(1);
    while sim.state() != SimulationState::Completed {
        let Some(report) = sim.step(&mut trace)? else {
            break;
        };
        if (report.step + 1) % report_every == 0 {
            let particles = sim.particles().as_slice();
            let now = ConservationReport::measure(particles, sim.gravity());
            let d = particles[1].position.displacement_to(&particles[2].position);
            let separation = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
            let p = particles[1].position.as_array();
            let earth_radius = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            println!(
                "t = {:>8.3} d  Earth at {:.6} AU  Earth-Moon {:.4e} m  drift {:.3e}",
                (report.step + 1) as f64 * MINUTE / DAY,
                earth_radius / EARTH_ORBIT_RADIUS,
                separation,
                now.energy_drift(&initial)
            );
        }
    }
    trace.flush()?;

    println!();
    println!("{} records written to {}", trace.records_written(), trace.path().display());
    trace.finish()?;
    Ok(())
}
