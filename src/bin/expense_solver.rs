use anyhow::{bail, Context, Result};
use clap::Parser;
use expense_puzzle::engine::Board;
use expense_puzzle::solver::{solve, solve_traced, SearchOptions, SearchReport, Strategy};
use expense_puzzle::trace::JsonLinesTrace;
use expense_puzzle::utils::board_from_str;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Solve an expense 8-puzzle", long_about = None)]
struct Args {
    /// Path to the start board file
    start_file: PathBuf,

    /// Path to the goal board file
    goal_file: PathBuf,

    /// Search strategy
    #[clap(short, long, value_enum, default_value_t = Strategy::AStar)]
    strategy: Strategy,

    /// Depth limit, required by dls
    #[clap(short, long, allow_negative_numbers = true)]
    depth_limit: Option<i64>,

    /// Deepest limit ids tries before giving up (unbounded by default)
    #[clap(long)]
    max_depth: Option<u32>,

    /// Write a JSON-lines search trace to this file
    #[clap(short, long)]
    trace: Option<PathBuf>,
}

fn read_board_file(path: &Path) -> Result<Board> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read board file {}", path.display()))?;
    board_from_str(&content).with_context(|| format!("invalid board in {}", path.display()))
}

fn print_report(report: &SearchReport) {
    let Some(solution) = report.solution() else {
        println!("Solution Not Found");
        return;
    };

    println!("Nodes Popped: {}", report.stats.nodes_popped);
    println!("Nodes Expanded: {}", report.stats.nodes_expanded);
    println!("Nodes Generated: {}", report.stats.nodes_generated);
    println!("Max Fringe Size: {}", report.stats.max_fringe_size);
    println!(
        "Solution Found at depth {} with cost of {}.",
        solution.depth(),
        solution.cost
    );
    println!("Steps:");
    for step in &solution.steps {
        println!("\t{}", step);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.strategy == Strategy::Dls && args.depth_limit.is_none() {
        bail!("--depth-limit is required with --strategy dls");
    }

    let start = read_board_file(&args.start_file)?;
    let goal = read_board_file(&args.goal_file)?;
    let options = SearchOptions {
        depth_limit: args.depth_limit,
        max_depth: args.max_depth,
    };

    if args.strategy == Strategy::Ids && args.max_depth.is_none() {
        eprintln!("Note: ids runs until it finds the goal; pass --max-depth to bound it.");
    }

    let report = match &args.trace {
        Some(path) => {
            let mut sink = JsonLinesTrace::create(path)?;
            let report = solve_traced(&start, &goal, args.strategy, &options, &mut sink)?;
            println!("Search trace written to {}", path.display());
            report
        }
        None => solve(&start, &goal, args.strategy, &options)?,
    };

    print_report(&report);
    Ok(())
}
