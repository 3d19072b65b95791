/*
cli_options.rs

Copyright 2025 Hervé Quatremain

This file is part of Luminode.

Luminode is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Luminode is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Luminode. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! These options are intended for developers tuning the level generator.
//! Luminode generates random levels, prints them as text, and can save the last one
//! in JSON format.
//!
//! # Examples
//!
//! Generate two 5x5 levels with a fixed seed and print their solutions:
//!
//! ```text
//! $ luminode -n 5 -c 2 --seed 7 --solution
//! ```
//!
//! Print a saved level:
//!
//! ```text
//! $ luminode --input level.json
//! ```

use clap::Parser;
use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::env;
use std::path::PathBuf;
use std::time::Instant;

use luminode::config::{COPYRIGHT_NOTICE, DEFAULT_BOARD_SIZE};
use luminode::connectivity::TileKind;
use luminode::generator::level::{GeneratedLevel, LevelError, generate_level, shuffle_tiles};
use luminode::saver::level::SaverLevel;

/// Build random Luminode levels for developers.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Number of cells on each side of the board
    #[arg(short = 'n', long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    /// Number of levels to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// Keep the tiles on their solution cells
    #[arg(long, default_value_t = false)]
    no_shuffle: bool,

    /// Also print the solution of each level
    #[arg(long, default_value_t = false)]
    solution: bool,

    /// Save the last generated level to this file
    #[arg(short, long, conflicts_with = "input")]
    output: Option<PathBuf>,

    /// Print the level saved in this file instead of generating levels
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print some statistics after generating the levels
    #[arg(short, long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options. Return the process exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    //
    // Print a saved level
    //
    if let Some(input) = args.input {
        let saver: SaverLevel = SaverLevel::from_file(input);
        return match saver.get_level() {
            Ok(Some(level)) => {
                print_level(&level, args.solution);
                0
            }
            Ok(None) => {
                eprintln!("{}: no such file", saver.save_file().display());
                1
            }
            Err(e) => {
                eprintln!("Cannot read {}: {e}", saver.save_file().display());
                1
            }
        };
    }

    let mut rng: ChaCha8Rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    };

    //
    // Generate the levels
    //
    let mut last: Option<GeneratedLevel> = None;
    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut route_total: usize = 0;
    let mut route_min: usize = usize::MAX;
    let mut route_max: usize = 0;
    let mut corners: usize = 0;
    let mut straights: usize = 0;
    for i in 0..args.count {
        debug!("Iteration {i}");

        let start: Instant = Instant::now();
        let ret: Result<GeneratedLevel, LevelError> = generate_level(args.size, &mut rng);
        let duration: f32 = start.elapsed().as_secs_f32();
        let mut level: GeneratedLevel = match ret {
            Ok(level) => level,
            Err(e) => {
                eprintln!("Error: {e}");
                return 1;
            }
        };
        if !args.no_shuffle {
            shuffle_tiles(&mut level, &mut rng);
        }

        // Verify that the tiles can still be laid along the route
        if !level.is_solvable() {
            eprintln!("Unsolvable level: {level:?}");
            return 1;
        }

        total += duration;
        if duration > max {
            max = duration;
        }
        route_total += level.route.len();
        route_min = route_min.min(level.route.len());
        route_max = route_max.max(level.route.len());
        corners += level.count(TileKind::Corner);
        straights += level.count(TileKind::Straight);

        println!(
            "Level {} ({}x{}, route of {} cells)",
            i + 1,
            level.size,
            level.size,
            level.route.len()
        );
        print_level(&level, args.solution);
        println!();
        last = Some(level);
    }

    //
    // Save the last level
    //
    if let Some(output) = args.output {
        match &last {
            Some(level) => {
                let saver: SaverLevel = SaverLevel::from_file(output);
                if let Err(e) = saver.save_level(level) {
                    eprintln!("Cannot write {}: {e}", saver.save_file().display());
                    return 1;
                }
            }
            None => eprintln!("No level to save"),
        }
    }

    // Print some stats
    if args.summary && args.count > 0 {
        println!(
            "
       total time = {}s
     average time = {}s
         max time = {}s
average route len = {}
    min route len = {}
    max route len = {}
          corners = {}
        straights = {}",
            total,
            total / args.count as f32,
            max,
            route_total as f32 / args.count as f32,
            route_min,
            route_max,
            corners,
            straights
        );
    }
    0
}

/// Print the level, and optionally its solution, as text.
fn print_level(level: &GeneratedLevel, solution: bool) {
    println!("{}", level.to_ascii());
    if !solution {
        return;
    }
    match level.solve() {
        Some(tiles) => {
            let solved: GeneratedLevel = GeneratedLevel {
                tiles,
                ..level.clone()
            };
            println!("\nSolution:\n{}", solved.to_ascii());
        }
        None => println!("\nNo solution"),
    }
}
