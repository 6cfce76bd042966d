#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates a cave and prints it as text.

use std::process::ExitCode;

use anyhow::{Context, Result};
use cave_core::CaveConfig;
use cave_rendering::{render_field, Summary};
use cave_system_generation::{resolve_seed, seed_from_signed, signed_seed, Generator};
use cave_world::query;
use clap::Parser;

const EXIT_INVALID_ARGUMENTS: u8 = 1;
const EXIT_GENERATION_FAILED: u8 = 2;

/// Generates a cave with start and finish markers, wall segments and collapsing spots.
#[derive(Debug, Parser)]
#[command(name = "cave-generator", version, allow_negative_numbers = true)]
struct Args {
    /// Number of columns; must be at least 3.
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,
    /// Number of rows; must be at least 3.
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,
    /// Number of wall segments to place.
    walls: u32,
    /// Number of collapsing spots to place.
    collapsing: u32,
    /// Random seed, any signed 64-bit value; 0 or absent draws a fresh seed.
    seed: Option<i64>,
    /// Print only the field, without the summary line.
    #[arg(long)]
    no_summary: bool,
}

impl Args {
    fn config(&self) -> Result<CaveConfig> {
        CaveConfig::new(self.width, self.height, self.walls, self.collapsing)
            .context("invalid cave configuration")
    }
}

/// Entry point for the cave generator command-line interface.
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) => {
            let _ = error.print();
            return if error.use_stderr() {
                ExitCode::from(EXIT_INVALID_ARGUMENTS)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let config = match args.config() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {error:#}");
            return ExitCode::from(EXIT_INVALID_ARGUMENTS);
        }
    };

    match run(&args, &config) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(EXIT_GENERATION_FAILED)
        }
    }
}

fn run(args: &Args, config: &CaveConfig) -> Result<String> {
    let seed = resolve_seed(args.seed.map(seed_from_signed));
    let cave = Generator::default()
        .generate(config, seed)
        .context("cave generation failed")?;
    let report = cave.report();
    log::info!(
        "placed {} wall cells and {} collapsing spots",
        report.wall_cells(),
        report.collapsing()
    );

    let mut output = String::new();
    if !args.no_summary {
        let summary = Summary {
            dimensions: config.dimensions(),
            walls: config.walls(),
            wall_cells: report.wall_cells(),
            collapsing: report.collapsing(),
            seed: signed_seed(report.seed()),
        };
        output.push_str(&summary.to_string());
        output.push('\n');
    }
    let field = render_field(query::cave_view(cave.world())).context("rendering failed")?;
    output.push_str(&field);
    Ok(output)
}
