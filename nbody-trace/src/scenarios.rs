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
//! Built-in initial conditions
//!
//! Masses and distances in SI units. Solar values from the NASA Planetary
//! Fact Sheet: https://nssdc.gsfc.nasa.gov/planetary/factsheet/

use std::f64::consts::PI;

use crate::particles::{Particle, ParticleStore, Position, Velocity};

/// Mass of the Sun in kilograms
pub const SUN_MASS: f64 = 1.9891e30;

/// Mass of the Earth in kilograms
pub const EARTH_MASS: f64 = 5.972e24;

/// Mass of the Moon in kilograms
pub const MOON_MASS: f64 = 7.342e22;

/// Mean Sun-Earth distance in meters
pub const EARTH_ORBIT_RADIUS: f64 = 1.496e11;

/// Sun at rest at the origin, Earth and Moon on the +x axis moving in +y
///
/// The Moon sits 384,000 km beyond the Earth with its orbital speed added
/// to the Earth's.
pub fn sun_earth_moon() -> ParticleStore {
    vec![
        Particle::new(SUN_MASS, Position::zero(), Velocity::zero()),
        Particle::new(
            EARTH_MASS,
            Position::new(EARTH_ORBIT_RADIUS, 0.0, 0.0),
            Velocity::new(0.0, 29780.0, 0.0),
        ),
        Particle::new(
            MOON_MASS,
            Position::new(1.49984e11, 0.0, 0.0),
            Velocity::new(0.0, 30802.0, 0.0),
        ),
    ]
    .into()
}

/// Central body at rest at the origin and a light body in a circular orbit
///
/// The orbiter starts at `(radius, 0, 0)` with tangential speed
/// `sqrt(G·M/radius)` along +y.
///
/// # Panics
///
/// Panics if either mass is not positive and finite.
pub fn circular_two_body(g_constant: f64, central_mass: f64, orbiter_mass: f64, radius: f64) -> ParticleStore {
    let speed = circular_speed(g_constant, central_mass, radius);
    vec![
        Particle::new(central_mass, Position::zero(), Velocity::zero()),
        Particle::new(
            orbiter_mass,
            Position::new(radius, 0.0, 0.0),
            Velocity::new(0.0, speed, 0.0),
        ),
    ]
    .into()
}

/// Speed of a circular orbit of `radius` around `central_mass`
pub fn circular_speed(g_constant: f64, central_mass: f64, radius: f64) -> f64 {
    (g_constant * central_mass / radius).sqrt()
}

/// Period of a circular orbit of `radius` around `central_mass`
pub fn orbital_period(g_constant: f64, central_mass: f64, radius: f64) -> f64 {
    2.0 * PI * radius / circular_speed(g_constant, central_mass, radius)
}
