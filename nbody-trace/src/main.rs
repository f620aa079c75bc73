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
//! nbody-trace command line entry point
//!
//! ```bash
//! # 1000 random bodies, one minute steps, one day, a record every hour
//! cargo run --release -- 1000 60 1440 60 simulation.tsv
//!
//! # Continue from the first record of an earlier trace
//! cargo run --release -- simulation.tsv 60 1440 60 continued.tsv
//! ```

use clap::Parser;
use std::process;
use std::time::Instant;

use nbody_trace::cli::{execute, Args};

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // --help and --version are reported through the same path
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            process::exit(code);
        }
    };

    let start = Instant::now();
    match execute(&args) {
        Ok(summary) => {
            let elapsed = start.elapsed();
            println!(
                "Simulated {} particles for {} steps, {} records written to {}",
                summary.particles,
                summary.steps,
                summary.records_written,
                args.output.display()
            );
            println!("Elapsed time: {:.3} s", elapsed.as_secs_f64());
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    }
}
