use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use permafrost::{ComponentGraph, RockThrow, Storm, Terminals};

#[derive(Parser, Debug)]
#[command(version, about = "Snow island puzzle solvers")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find the rock which hits every hailstone and print the sum of its starting coordinates.
    Rock {
        #[arg(short, long, default_value = "puzzleInput")]
        input: PathBuf,
    },
    /// Count hailstone paths crossing inside the test area, ignoring the z axis.
    Crossings {
        #[arg(short, long, default_value = "puzzleInput")]
        input: PathBuf,
        #[arg(long, default_value_t = 200_000_000_000_000, allow_negative_numbers = true)]
        min: i64,
        #[arg(long, default_value_t = 400_000_000_000_000, allow_negative_numbers = true)]
        max: i64,
    },
    /// Cut the component graph in two and print the product of the sizes of the halves.
    Partition {
        #[arg(short, long, default_value = "puzzleInput")]
        input: PathBuf,
        /// Position of the source component, in order of first mention.
        #[arg(long, default_value_t = 0)]
        source: usize,
        /// Position of the sink component, in order of first mention.
        #[arg(long, default_value_t = 3)]
        sink: usize,
        /// Take the smallest cut over every sink instead of the given terminals.
        #[arg(long)]
        global: bool,
        /// Also write the wiring as a Graphviz file.
        #[arg(long)]
        dot: Option<PathBuf>,
    },
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read puzzle input from given file({}).", path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = CliArgs::parse();

    match args.command {
        Command::Rock { input } => {
            let text = read_input(&input)?;
            let storm = Storm::parse(&text).context("Failed to parse hailstones.")?;
            let rock = RockThrow::solve(&storm).context("Failed to find a rock hitting every hailstone.")?;
            info!("rock thrown from {} at {}", rock.position, rock.velocity);
            println!("{}", rock.coordinate_sum());
        }
        Command::Crossings { input, min, max } => {
            let text = read_input(&input)?;
            let storm = Storm::parse(&text).context("Failed to parse hailstones.")?;
            println!("{}", storm.crossings_in_xy(min, max));
        }
        Command::Partition { input, source, sink, global, dot } => {
            let text = read_input(&input)?;
            let graph = ComponentGraph::parse(&text).context("Failed to parse component wiring.")?;
            info!("{}", graph);

            if let Some(path) = dot {
                fs::write(&path, graph.to_dot())
                    .with_context(|| format!("Failed to write graph to given file({}).", path.display()))?;
            }

            let cut = if global {
                graph.global_minimum_cut()
            } else {
                graph.minimum_cut(Terminals { source, sink })
            }.context("Failed to cut the component graph.")?;

            println!("CUT SIZE: {}", cut.value);
            println!("{}", cut.partition_product());
        }
    }

    Ok(())
}
