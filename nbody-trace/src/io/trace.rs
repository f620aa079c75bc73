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
//! Tab-separated trace of particle state
//!
//! # Format
//!
//! One record per line:
//!
//! ```text
//! <count>\t<mass>\t<x>\t<y>\t<z>\t<vx>\t<vy>\t<vz>\t<fx>\t<fy>\t<fz>\t<mass>...
//! ```
//!
//! The count is a plain integer. Every other value uses C-style scientific
//! notation (`1.989100e+30`): a fixed number of mantissa digits and an
//! exponent that always carries a sign and at least two digits. The record
//! layout is identical to the input file line, so any trace line can be fed
//! back in as initial conditions.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, SimulationError};
use crate::particles::Particle;

/// Default digits after the decimal point
pub const DEFAULT_PRECISION: usize = 6;

/// Largest precision that still changes the printed value of an f64
pub const MAX_PRECISION: usize = 17;

/// Number formatting of trace records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceFormat {
    precision: usize,
}

impl TraceFormat {
    /// Create a format with the given mantissa precision
    ///
    /// # Panics
    ///
    /// Panics if `precision` exceeds [`MAX_PRECISION`].
    pub fn new(precision: usize) -> Self {
        assert!(
            precision <= MAX_PRECISION,
            "Trace precision must be at most 17 digits"
        );
        TraceFormat { precision }
    }

    /// Digits after the decimal point
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Format one record, without the trailing newline
    pub fn format_record(&self, particles: &[Particle]) -> String {
        let mut line = String::with_capacity(16 + particles.len() * 10 * (self.precision + 8));
        // Writing into a String cannot fail
        let _ = write!(line, "{}", particles.len());
        for p in particles {
            let values = [
                p.mass(),
                p.position.x(),
                p.position.y(),
                p.position.z(),
                p.velocity.dx(),
                p.velocity.dy(),
                p.velocity.dz(),
                p.force.fx,
                p.force.fy,
                p.force.fz,
            ];
            for value in values {
                line.push('\t');
                push_scientific(&mut line, value, self.precision);
            }
        }
        line
    }
}

impl Default for TraceFormat {
    fn default() -> Self {
        TraceFormat::new(DEFAULT_PRECISION)
    }
}

/// Format a value the way C's `%.*e` does
///
/// ```
/// use nbody_trace::io::format_scientific;
///
/// assert_eq!(format_scientific(1.9891e30, 6), "1.989100e+30");
/// assert_eq!(format_scientific(-0.00125, 2), "-1.25e-03");
/// assert_eq!(format_scientific(0.0, 6), "0.000000e+00");
/// ```
pub fn format_scientific(value: f64, precision: usize) -> String {
    let mut out = String::new();
    push_scientific(&mut out, value, precision);
    out
}

fn push_scientific(out: &mut String, value: f64, precision: usize) {
    if value.is_nan() {
        out.push_str("nan");
        return;
    }
    if value.is_infinite() {
        out.push_str(if value > 0.0 { "inf" } else { "-inf" });
        return;
    }

    // Rust renders `1.989100e30`; split off the exponent and re-pad it
    let rendered = format!("{:.*e}", precision, value);
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            let _ = write!(out, "{mantissa}e{sign}{digits:0>2}");
        }
        None => out.push_str(&rendered),
    }
}

/// Append-only writer of trace records
///
/// Wraps the sink in a [`BufWriter`]; call [`finish`](Self::finish) to flush
/// and surface any deferred write error.
pub struct TraceWriter<W: Write> {
    out: BufWriter<W>,
    path: PathBuf,
    format: TraceFormat,
    records_written: usize,
}

impl TraceWriter<File> {
    /// Create (or truncate) the trace file at `path`
    pub fn create(path: impl AsRef<Path>, format: TraceFormat) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| SimulationError::io(path, e))?;
        Ok(TraceWriter::with_label(file, path, format))
    }
}

impl<W: Write> TraceWriter<W> {
    /// Wrap an arbitrary sink, labelled `<memory>` in error messages
    pub fn new(sink: W, format: TraceFormat) -> Self {
        TraceWriter::with_label(sink, "<memory>", format)
    }

    /// Wrap a sink and name it for error messages
    pub fn with_label(sink: W, label: impl Into<PathBuf>, format: TraceFormat) -> Self {
        TraceWriter {
            out: BufWriter::new(sink),
            path: label.into(),
            format,
            records_written: 0,
        }
    }

    /// Append one record holding the full state of `particles`
    pub fn write_record(&mut self, particles: &[Particle]) -> Result<()> {
        let line = self.format.format_record(particles);
        self.out
            .write_all(line.as_bytes())
            .and_then(|_| self.out.write_all(b"\n"))
            .map_err(|e| SimulationError::io(&self.path, e))?;
        self.records_written += 1;
        Ok(())
    }

    /// Number of records written so far
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Path or label of the sink
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush buffered records
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().map_err(|e| SimulationError::io(&self.path, e))
    }

    /// Flush and return the underlying sink
    pub fn finish(self) -> Result<W> {
        let path = self.path;
        self.out
            .into_inner()
            .map_err(|e| SimulationError::io(path, e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::{Force, Position, Velocity};

    #[test]
    fn test_scientific_matches_c_layout() {
        assert_eq!(format_scientific(5.972e24, 6), "5.972000e+24");
        assert_eq!(format_scientific(29780.0, 6), "2.978000e+04");
        assert_eq!(format_scientific(6.674e-11, 3), "6.674e-11");
        assert_eq!(format_scientific(1.5e-300, 1), "1.5e-300");
        assert_eq!(format_scientific(-2.7, 0), "-3e+00");
        assert_eq!(format_scientific(f64::NAN, 6), "nan");
        assert_eq!(format_scientific(f64::NEG_INFINITY, 6), "-inf");
    }

    #[test]
    fn test_record_layout() {
        let mut p = Particle::new(2.0, Position::new(1.0, -1.0, 0.5), Velocity::new(0.0, 3.0, 0.0));
        p.force = Force::new(0.0, 0.0, -4.0);

        let line = TraceFormat::new(1).format_record(&[p, p]);
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields.len(), 1 + 2 * 10);
        assert_eq!(fields[0], "2");
        assert_eq!(
            &fields[1..11],
            &[
                "2.0e+00", "1.0e+00", "-1.0e+00", "5.0e-01", "0.0e+00", "3.0e+00", "0.0e+00",
                "0.0e+00", "0.0e+00", "-4.0e+00"
            ]
        );
        assert_eq!(&fields[1..11], &fields[11..21]);
    }

    #[test]
    fn test_empty_record_is_just_the_count() {
        assert_eq!(TraceFormat::default().format_record(&[]), "0");
    }

    #[test]
    #[should_panic(expected = "Trace precision must be at most 17 digits")]
    fn test_excessive_precision_panics() {
        TraceFormat::new(18);
    }

    #[test]
    fn test_writer_appends_lines() {
        let p = Particle::new(1.0, Position::zero(), Velocity::zero());
        let mut writer = TraceWriter::new(Vec::new(), TraceFormat::default());
        writer.write_record(&[p]).unwrap();
        writer.write_record(&[p]).unwrap();
        assert_eq!(writer.records_written(), 2);

        let bytes = writer.finish().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with('\n'));
        assert!(text.lines().all(|l| l.starts_with("1\t1.000000e+00")));
    }
}
