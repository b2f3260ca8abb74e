//! Command line driver: generate mazes, place players and advance the pursuit one move
//! at a time. Grids are read from a file or stdin and written to stdout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mazechase::action_log::{Action, ActionLog};
use mazechase::config::Config;
use mazechase::pathfinding::{format_distance, path_distance};
use mazechase::{api, Grid, Metric, Position, Tag};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to ./config.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed, overrides the configured one
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a perfect maze
    Generate {
        #[arg(long)]
        rows: Option<i32>,
        #[arg(long)]
        cols: Option<i32>,
        /// Also place P and O
        #[arg(long)]
        players: bool,
    },
    /// Generate a walled open rectangle with P and O placed
    Arena {
        #[arg(long)]
        rows: Option<i32>,
        #[arg(long)]
        cols: Option<i32>,
    },
    /// Place P and O on a grid
    Place {
        /// Grid file, or - for stdin
        #[arg(default_value = "-")]
        grid: String,
    },
    /// Move one agent a single cell toward the other
    Step {
        /// Grid file, or - for stdin
        #[arg(default_value = "-")]
        grid: String,
        #[arg(long)]
        mover: Option<Tag>,
        #[arg(long)]
        target: Option<Tag>,
        /// manhattan or path
        #[arg(long)]
        metric: Option<Metric>,
    },
    /// Print Manhattan and path distance between P and O
    Distance {
        /// Grid file, or - for stdin
        #[arg(default_value = "-")]
        grid: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load_from(path).map_err(anyhow::Error::msg)?,
        None => Config::load(),
    };

    let mut rng: Box<dyn RngCore> = match args.seed.or(config.maze.seed) {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };
    let mut log = ActionLog::new();

    let result = run(args.command, &config, rng.as_mut(), &mut log);
    if let Err(e) = &result {
        log.log_finish(Action::Failed { message: e.to_string() });
    }

    if config.logging.trace {
        log.print_with_durations();
        eprintln!("{}", log.summary());
    }
    if config.logging.enable_action_log {
        log.save_to_file(&config.logging.action_log_path)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("writing {}", config.logging.action_log_path))?;
    }

    println!("{}", result?);
    Ok(())
}

fn run(command: Command, config: &Config, rng: &mut dyn RngCore, log: &mut ActionLog) -> Result<String> {
    match command {
        Command::Generate { rows, cols, players } => {
            let rows = rows.unwrap_or(config.maze.rows);
            let cols = cols.unwrap_or(config.maze.cols);
            let action = Action::GenerateMaze { rows, cols };
            log.log_start(action.clone());
            let maze = api::generate_maze(rows, cols, rng)?;
            log.log_finish(action);
            if players {
                place(&maze, rng, log)
            } else {
                Ok(maze)
            }
        }
        Command::Arena { rows, cols } => {
            let rows = rows.unwrap_or(config.maze.rows);
            let cols = cols.unwrap_or(config.maze.cols);
            let action = Action::GenerateArena { rows, cols };
            log.log_start(action.clone());
            let arena = api::generate_arena(rows, cols, rng)?;
            log.log_finish(action);
            Ok(arena)
        }
        Command::Place { grid } => place(&read_grid(&grid)?, rng, log),
        Command::Step { grid, mover, target, metric } => {
            let text = read_grid(&grid)?;
            let mover = mover.unwrap_or(config.pursuit.mover);
            let target = target.unwrap_or(config.pursuit.target);
            let metric = metric.unwrap_or(config.pursuit.metric);

            let from = locate(&text, mover);
            log.log_start(Action::Step { mover, target, metric, from, to: None });
            let next = api::step(&text, mover, target, metric)
                .with_context(|| format!("moving {} toward {}", mover, target))?;
            log.log_finish(Action::Step {
                mover,
                target,
                metric,
                from,
                to: locate(&next, mover),
            });
            Ok(next)
        }
        Command::Distance { grid } => {
            let grid: Grid = read_grid(&grid)?.parse()?;
            let p = grid.require(Tag::Pursuer)?;
            let o = grid.require(Tag::Target)?;
            let manhattan = p.manhattan(&o);
            let path = path_distance(&grid, p, o);
            log.log_finish(Action::Distance { manhattan, path });
            Ok(format!("manhattan: {}\npath: {}", manhattan, format_distance(path)))
        }
    }
}

fn place(text: &str, rng: &mut dyn RngCore, log: &mut ActionLog) -> Result<String> {
    log.log_start(Action::PlaceAgents { pursuer: None, target: None });
    let placed = api::place_players(text, rng)?;
    log.log_finish(Action::PlaceAgents {
        pursuer: locate(&placed, Tag::Pursuer),
        target: locate(&placed, Tag::Target),
    });
    Ok(placed)
}

/// Agent position in a grid text, for logging only
fn locate(text: &str, tag: Tag) -> Option<Position> {
    text.parse::<Grid>().ok()?.locate(tag)
}

fn read_grid(source: &str) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).context("reading grid from stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(source).with_context(|| format!("reading grid from {}", source))
    }
}
