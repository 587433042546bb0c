use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use kakuro::{board::Board, logger::SolveLogger, solver::Solver};
use once_cell::sync::Lazy;
use std::{
    fs,
    path::PathBuf,
    time::{Duration, Instant},
};

#[derive(Parser, Debug)]
#[command(name = "kakuro", version, about = "Kakuro solver with exhaustive backtracking")]
struct Cli {
    /// Path to a board file (token grid: X, . and down/across clues). If omitted, reads from stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Solve the embedded board suite instead of a single board
    #[arg(long)]
    suite: bool,

    /// Pause after each report. Press Enter to continue.
    #[arg(long)]
    step: bool,

    /// Re-check the finished grid run by run before reporting
    #[arg(long)]
    verify: bool,

    /// Maximum report files to write (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    max_logs: usize,

    /// Emit reports to console with colors
    #[arg(long)]
    color: bool,
}

static SUITE: Lazy<Vec<(&str, &str)>> = Lazy::new(|| {
    vec![
        ("four cells, 2x2", include_str!("../boards/simple.txt")),
        ("five cells, L-shape", include_str!("../boards/medium.txt")),
        ("forced pair {8,9}", include_str!("../boards/forced_pair.txt")),
        ("single forced cell", include_str!("../boards/single.txt")),
        ("no white cells", include_str!("../boards/empty.txt")),
        ("impossible, forced duplicate", include_str!("../boards/impossible.txt")),
    ]
});

struct Outcome {
    solved: bool,
    calls: u64,
    elapsed: Duration,
}

fn read_board(input: &Option<PathBuf>) -> Result<String> {
    match input {
        Some(p) => fs::read_to_string(p).with_context(|| format!("reading {}", p.display())),
        None => {
            use std::io::{self, Read};
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn solve_one(name: &str, text: &str, verify: bool, logger: &mut SolveLogger) -> Result<Outcome> {
    let mut board = Board::parse(text).with_context(|| format!("parsing board {name:?}"))?;
    let cells = board.cells().len();

    let mut solver = Solver::new(&board);
    let start = Instant::now();
    let solved = solver.solve(&mut board);
    let elapsed = start.elapsed();
    let calls = solver.call_count();

    let mut details = format!(
        "cells to fill: {cells}\nelapsed: {:.3} ms\nrecursive calls: {calls}\n",
        elapsed.as_secs_f64() * 1e3,
    );
    if solved {
        if verify {
            details.push_str(if board.is_complete() {
                "re-check: all runs satisfied\n"
            } else {
                "re-check: FAILED, a run is off target\n"
            });
        }
        details.push('\n');
        details.push_str(&board.to_pretty_string());
    } else {
        details.push_str("search exhausted; this board has no solution\n");
    }
    let verdict = if solved { "solved" } else { "no solution" };
    logger.log(&format!("{name}: {verdict}"), &details)?;

    Ok(Outcome { solved, calls, elapsed })
}

fn run_suite(cli: &Cli, logger: &mut SolveLogger) -> Result<()> {
    let mut solved = 0usize;
    let mut unsolved = 0usize;
    let mut total_calls = 0u64;
    let mut total_time = Duration::ZERO;

    for (name, text) in SUITE.iter() {
        let outcome = solve_one(name, text, cli.verify, logger)?;
        if outcome.solved {
            solved += 1;
        } else {
            unsolved += 1;
        }
        total_calls += outcome.calls;
        total_time += outcome.elapsed;
    }

    let heading = "suite summary";
    if cli.color {
        println!("{}", heading.bold());
    } else {
        println!("{heading}");
    }
    println!("  boards run: {}  solved: {solved}  without solution: {unsolved}", SUITE.len());
    println!(
        "  total time: {:.3} ms  total recursive calls: {total_calls}",
        total_time.as_secs_f64() * 1e3
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut logger = SolveLogger::new("reports", cli.color, cli.step, cli.max_logs)?;

    if cli.suite {
        return run_suite(&cli, &mut logger);
    }

    let text = read_board(&cli.input)?;
    let outcome = solve_one("board", &text, cli.verify, &mut logger)?;
    println!(
        "{} in {:.3} ms after {} recursive calls",
        if outcome.solved { "solved" } else { "exhausted the search space" },
        outcome.elapsed.as_secs_f64() * 1e3,
        outcome.calls
    );
    Ok(())
}
