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
//! Loading initial conditions from a particle line
//!
//! The input is a single line: a particle count `n` followed by `n` groups
//! of ten values `mass x y z vx vy vz fx fy fz`, separated by any
//! whitespace. Only the first line is consulted, which means a trace file
//! can be used directly and its first record becomes the initial state.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{Result, SimulationError};
use crate::particles::{Force, Particle, ParticleStore, Position, Velocity};

/// Values per particle in a record
pub const FIELDS_PER_PARTICLE: usize = 10;

/// Load particles from the first line of the file at `path`
pub fn load_particles(path: impl AsRef<Path>) -> Result<ParticleStore> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| SimulationError::io(path, e))?;
    read_particles(file, path)
}

/// Load particles from the first line of any reader
///
/// `label` names the source in error messages.
pub fn read_particles<R: Read>(reader: R, label: &Path) -> Result<ParticleStore> {
    let mut line = String::new();
    BufReader::new(reader)
        .read_line(&mut line)
        .map_err(|e| SimulationError::io(label, e))?;
    parse_particle_line(&line).map_err(|err| match err {
        LineError::Format(message) => SimulationError::parse(label, message),
        LineError::Mass { index, value } => SimulationError::InvalidMass { index, value },
    })
}

#[derive(Debug)]
enum LineError {
    Format(String),
    Mass { index: usize, value: f64 },
}

fn parse_particle_line(line: &str) -> std::result::Result<ParticleStore, LineError> {
    let mut tokens = line.split_whitespace();

    let count_token = tokens
        .next()
        .ok_or_else(|| LineError::Format("first line is empty".to_string()))?;
    let count: usize = count_token
        .parse()
        .map_err(|_| LineError::Format(format!("invalid particle count '{count_token}'")))?;

    // A record takes at least two bytes per value, so the line bounds the count
    let mut store = ParticleStore::with_capacity(count.min(line.len() / (2 * FIELDS_PER_PARTICLE)));
    let mut values = [0.0_f64; FIELDS_PER_PARTICLE];

    for index in 0..count {
        for (field, slot) in values.iter_mut().enumerate() {
            let token = tokens.next().ok_or_else(|| {
                LineError::Format(format!(
                    "expected {} values for {count} particles, found {}",
                    count.saturating_mul(FIELDS_PER_PARTICLE),
                    index * FIELDS_PER_PARTICLE + field
                ))
            })?;
            *slot = token.parse().map_err(|_| {
                LineError::Format(format!(
                    "particle {index}, field {field}: '{token}' is not a number"
                ))
            })?;
        }

        let [mass, x, y, z, vx, vy, vz, fx, fy, fz] = values;
        let mut particle = Particle::try_new(index, mass, Position::new(x, y, z), Velocity::new(vx, vy, vz))
            .map_err(|_| LineError::Mass { index, value: mass })?;
        // Kept as loaded; the first force pass overwrites it
        particle.force = Force::new(fx, fy, fz);
        store.push(particle);
    }

    if tokens.next().is_some() {
        eprintln!("Warning: ignoring values after the {count} particle records on the first line");
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> Result<ParticleStore> {
        read_particles(text.as_bytes(), Path::new("test.tsv"))
    }

    #[test]
    fn test_reads_two_particles() {
        let store = read("2 1e22 1 2 3 4 5 6 7 8 9\t2.5e22 -1 -2 -3 -4 -5 -6 0 0 0\n").unwrap();
        assert_eq!(store.len(), 2);

        let a = store.get(0).unwrap();
        assert_eq!(a.mass(), 1e22);
        assert_eq!(a.position.as_array(), [1.0, 2.0, 3.0]);
        assert_eq!(a.velocity.as_array(), [4.0, 5.0, 6.0]);
        assert_eq!(a.force.as_array(), [7.0, 8.0, 9.0]);

        let b = store.get(1).unwrap();
        assert_eq!(b.mass(), 2.5e22);
        assert_eq!(b.position.as_array(), [-1.0, -2.0, -3.0]);
    }

    #[test]
    fn test_only_first_line_is_used() {
        let store = read("1 1.0 0 0 0 0 0 0 0 0 0\n2 this line is ignored\n").unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_accepts_trace_notation() {
        let store = read("1\t1.989100e+30\t0.000000e+00\t-1.5e-03\t0\t0\t0\t0\t0\t0\t0").unwrap();
        assert_eq!(store.get(0).map(|p| p.mass()), Some(1.9891e30));
        assert_eq!(store.get(0).map(|p| p.position.y()), Some(-1.5e-3));
    }

    #[test]
    fn test_zero_count_gives_empty_store() {
        assert!(read("0\n").unwrap().is_empty());
    }

    #[test]
    fn test_empty_input_is_a_parse_error() {
        assert!(matches!(read(""), Err(SimulationError::Parse { .. })));
        assert!(matches!(read("\n1 1 0 0 0 0 0 0 0 0 0"), Err(SimulationError::Parse { .. })));
    }

    #[test]
    fn test_bad_count_is_a_parse_error() {
        assert!(matches!(read("two 1 0 0 0 0 0 0 0 0 0"), Err(SimulationError::Parse { .. })));
        assert!(matches!(read("-1"), Err(SimulationError::Parse { .. })));
    }

    #[test]
    fn test_truncated_record_is_a_parse_error() {
        match read("2 1 0 0 0 0 0 0 0 0 0 1 0 0") {
            Err(SimulationError::Parse { message, .. }) => {
                assert!(message.contains("expected 20 values"), "{message}");
                assert!(message.contains("found 13"), "{message}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_huge_count_with_short_line_is_a_parse_error() {
        match read("99999999999999999 1 0 0 0 0 0 0 0 0 0") {
            Err(SimulationError::Parse { message, .. }) => {
                assert!(message.contains("found 10"), "{message}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }

        let max = format!("{} 1 0 0 0 0 0 0 0 0 0", usize::MAX);
        assert!(matches!(read(&max), Err(SimulationError::Parse { .. })));
    }

    #[test]
    fn test_non_numeric_value_is_a_parse_error() {
        match read("1 1 0 0 x 0 0 0 0 0 0") {
            Err(SimulationError::Parse { message, .. }) => assert!(message.contains("'x'")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_mass_is_rejected() {
        match read("2 1 0 0 0 0 0 0 0 0 0 0 1 1 1 0 0 0 0 0 0") {
            Err(SimulationError::InvalidMass { index, value }) => {
                assert_eq!(index, 1);
                assert_eq!(value, 0.0);
            }
            other => panic!("expected invalid mass, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = load_particles("/nonexistent/dir/particles.tsv").unwrap_err();
        assert!(matches!(err, SimulationError::Io { .. }));
    }
}
