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
//! Per-particle state vectors
//!
//! Position, velocity and force are plain double-precision triples in SI
//! units (m, m/s, N). Mass is the only validated quantity: it must be
//! strictly positive and finite so that `force / mass` is always defined.

/// 3D position in meters
///
/// # Examples
///
/// ```
/// use nbody_trace::particles::Position;
///
/// let pos = Position::new(1.0, 2.0, 3.0);
/// assert_eq!(pos.x(), 1.0);
/// assert!(pos.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    x: f64,
    y: f64,
    z: f64,
}

impl Position {
    /// Create a new position with the given coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Position { x, y, z }
    }

    /// Create a position at the origin (0, 0, 0)
    pub fn zero() -> Self {
        Position::new(0.0, 0.0, 0.0)
    }

    /// Get the x coordinate
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Get the y coordinate
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Get the z coordinate
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Displacement vector `other - self`
    pub fn displacement_to(&self, other: &Position) -> [f64; 3] {
        [other.x - self.x, other.y - self.y, other.z - self.z]
    }

    /// Move the position by `velocity * dt`
    pub fn advance(&mut self, velocity: &Velocity, dt: f64) {
        self.x += velocity.dx * dt;
        self.y += velocity.dy * dt;
        self.z += velocity.dz * dt;
    }

    /// Check if all coordinates are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Get the position as an array
    pub fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::zero()
    }
}

/// 3D velocity in meters per second
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    dx: f64,
    dy: f64,
    dz: f64,
}

impl Velocity {
    /// Create a new velocity with the given components
    pub fn new(dx: f64, dy: f64, dz: f64) -> Self {
        Velocity { dx, dy, dz }
    }

    /// Create a zero velocity (at rest)
    pub fn zero() -> Self {
        Velocity::new(0.0, 0.0, 0.0)
    }

    /// Get the x component
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Get the y component
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Get the z component
    pub fn dz(&self) -> f64 {
        self.dz
    }

    /// Apply the acceleration `force / mass` over `dt`
    pub fn kick(&mut self, force: &Force, mass: &Mass, dt: f64) {
        let m = mass.value();
        self.dx += force.fx / m * dt;
        self.dy += force.fy / m * dt;
        self.dz += force.fz / m * dt;
    }

    /// Check if all components are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite() && self.dz.is_finite()
    }

    /// Get the velocity as an array
    pub fn as_array(&self) -> [f64; 3] {
        [self.dx, self.dy, self.dz]
    }

    /// Calculate the magnitude (speed) of the velocity vector
    pub fn magnitude(&self) -> f64 {
        (self.dx * self.dx + self.dy * self.dy + self.dz * self.dz).sqrt()
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Velocity::zero()
    }
}

/// 3D force vector in Newtons
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Force {
    /// X component of the force in Newtons
    pub fx: f64,
    /// Y component of the force in Newtons
    pub fy: f64,
    /// Z component of the force in Newtons
    pub fz: f64,
}

impl Force {
    /// Create a new force vector
    pub fn new(fx: f64, fy: f64, fz: f64) -> Self {
        Force { fx, fy, fz }
    }

    /// Create a zero force
    pub fn zero() -> Self {
        Force::new(0.0, 0.0, 0.0)
    }

    /// Check if the force is valid (all components finite)
    pub fn is_valid(&self) -> bool {
        self.fx.is_finite() && self.fy.is_finite() && self.fz.is_finite()
    }

    /// Add another force to this one
    pub fn add(&mut self, other: &Force) {
        self.fx += other.fx;
        self.fy += other.fy;
        self.fz += other.fz;
    }

    /// Subtract another force from this one (reaction side of a pair)
    pub fn sub(&mut self, other: &Force) {
        self.fx -= other.fx;
        self.fy -= other.fy;
        self.fz -= other.fz;
    }

    /// Get the magnitude of the force
    pub fn magnitude(&self) -> f64 {
        (self.fx * self.fx + self.fy * self.fy + self.fz * self.fz).sqrt()
    }

    /// Get the force as an array
    pub fn as_array(&self) -> [f64; 3] {
        [self.fx, self.fy, self.fz]
    }
}

impl Default for Force {
    fn default() -> Self {
        Force::zero()
    }
}

/// Mass in kilograms
///
/// Always strictly positive and finite. There is no "immovable" sentinel:
/// a particle either has a usable mass or cannot be constructed.
///
/// # Examples
///
/// ```
/// use nbody_trace::particles::Mass;
///
/// let mass = Mass::new(5.972e24);
/// assert!(mass.value() > 0.0);
/// assert!(Mass::try_new(0.0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mass {
    value: f64,
}

impl Mass {
    /// Create a new mass with the given value in kilograms
    ///
    /// # Panics
    ///
    /// Panics if the mass is zero, negative, NaN or infinite. For fallible
    /// construction, use `try_new`.
    pub fn new(value: f64) -> Self {
        assert!(
            value > 0.0 && value.is_finite(),
            "Mass must be positive and finite"
        );
        Mass { value }
    }

    /// Try to create a new mass, returning `None` for unusable values
    pub fn try_new(value: f64) -> Option<Self> {
        if value > 0.0 && value.is_finite() {
            Some(Mass { value })
        } else {
            None
        }
    }

    /// Get the mass value
    pub fn value(&self) -> f64 {
        self.value
    }
}
