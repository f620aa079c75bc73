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
//! Conservation and accuracy tests
//!
//! Physical properties that must hold for the pairwise force pass and the
//! semi-implicit Euler integrator.

use nbody_trace::config::SimulationConfig;
use nbody_trace::diagnostics::{total_momentum, ConservationReport};
use nbody_trace::gravity::{GravityConfig, GravitySystem};
use nbody_trace::integration::{Integrator, SemiImplicitEuler};
use nbody_trace::io::{generate_particles, TraceFormat, TraceWriter};
use nbody_trace::scenarios::{circular_two_body, orbital_period, sun_earth_moon};
use nbody_trace::{ParticleStore, Simulation};

fn run(particles: ParticleStore, config: SimulationConfig) -> Simulation {
    let mut sim = Simulation::new(particles, config).unwrap();
    let mut trace = TraceWriter::new(std::io::sink(), TraceFormat::default());
    sim.run(&mut trace).unwrap();
    sim
}

#[test]
fn test_momentum_conservation_random_system() {
    let particles = generate_particles(20, 42);
    let initial = total_momentum(particles.as_slice());
    let scale: f64 = particles
        .iter()
        .map(|p| p.mass() * p.velocity.magnitude())
        .sum();

    let sim = run(particles, SimulationConfig::new(60.0, 100, 1000));
    let last = total_momentum(sim.particles().as_slice());

    for axis in 0..3 {
        let drift = (last[axis] - initial[axis]).abs();
        assert!(
            drift <= 1e-9 * scale,
            "Momentum axis {} drifted by {:.3e} (scale {:.3e})",
            axis,
            drift,
            scale
        );
    }
}

#[test]
fn test_net_force_vanishes() {
    let mut particles = generate_particles(50, 7);
    let gravity = GravitySystem::new(GravityConfig::default());
    let pairs = gravity.compute_forces(&mut particles);
    assert_eq!(pairs, 50 * 49 / 2);

    let total_magnitude: f64 = particles.iter().map(|p| p.force.magnitude()).sum();
    let net = particles.net_force();
    assert!(total_magnitude > 0.0);
    assert!(
        net.magnitude() <= 1e-10 * total_magnitude,
        "Net force {:.3e} vs total {:.3e}",
        net.magnitude(),
        total_magnitude
    );
}

#[test]
fn test_circular_orbit_returns_after_one_period() {
    let gravity = GravityConfig::new(1.0, 0.0);
    let period = orbital_period(1.0, 1.0, 1.0);
    let steps = 10_000;
    let config = SimulationConfig::new(period / steps as f64, steps, 100).with_gravity(gravity);

    let sim = run(circular_two_body(1.0, 1.0, 1e-10, 1.0), config);
    let orbiter = sim.particles().get(1).unwrap();

    let dx = orbiter.position.x() - 1.0;
    let dy = orbiter.position.y();
    let error = (dx * dx + dy * dy).sqrt();
    assert!(error < 1e-2, "Orbiter is {:.3e} away from its start", error);

    let radius = orbiter.position.as_array().iter().map(|c| c * c).sum::<f64>().sqrt();
    assert!((radius - 1.0).abs() < 1e-2, "Radius drifted to {}", radius);
}

#[test]
fn test_orbit_radius_stays_bounded() {
    let system = GravitySystem::new(GravityConfig::new(1.0, 0.0));
    let integrator = SemiImplicitEuler::new(orbital_period(1.0, 1.0, 1.0) / 1000.0);
    let mut particles = circular_two_body(1.0, 1.0, 1e-10, 1.0);

    // Five orbits
    for step in 0..5000 {
        system.compute_forces(&mut particles);
        assert_eq!(integrator.integrate(particles.as_mut_slice()), 2);

        let p = particles.get(1).unwrap().position.as_array();
        let radius = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
        assert!(radius > 0.98 && radius < 1.02, "Radius {} at step {}", radius, step);
    }
}

#[test]
fn test_energy_drift_sun_earth_moon() {
    let bodies = sun_earth_moon();
    let gravity = GravitySystem::new(GravityConfig::default());
    let initial = ConservationReport::measure(bodies.as_slice(), &gravity);

    let sim = run(bodies, SimulationConfig::new(60.0, 1000, 10));
    let last = ConservationReport::measure(sim.particles().as_slice(), sim.gravity());

    let drift = last.energy_drift(&initial);
    assert!(drift < 1e-6, "Relative energy drift {:.3e}", drift);
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_run_matches_sequential() {
    use nbody_trace::gravity::Execution;

    let config = SimulationConfig::new(60.0, 10, 5);
    let sequential = run(generate_particles(64, 3), config.clone());
    let parallel = run(
        generate_particles(64, 3),
        config.with_execution(Execution::Parallel),
    );

    for (a, b) in sequential.particles().iter().zip(parallel.particles().iter()) {
        for (x, y) in a.position.as_array().iter().zip(b.position.as_array()) {
            assert!((x - y).abs() <= 1e-9 * x.abs().max(1.0), "{} vs {}", x, y);
        }
        for (x, y) in a.velocity.as_array().iter().zip(b.velocity.as_array()) {
            assert!((x - y).abs() <= 1e-9 * x.abs().max(1.0), "{} vs {}", x, y);
        }
    }
}
