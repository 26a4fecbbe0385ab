use anyhow::Result;
use clap::Parser;
use expense_puzzle::engine::Board;
use expense_puzzle::solver::{solve, SearchOptions, SearchReport, Strategy};
use std::collections::HashMap;

/// Goal used for every instance; tiles weigh 1 to 8.
const GOAL_GRID: [[i32; 3]; 3] = [[1, 2, 3], [4, 5, 6], [7, 8, 0]];

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare search strategies on random instances", long_about = None)]
struct Args {
    /// Number of random instances to evaluate
    #[clap(short, long, default_value_t = 10)]
    instances: u64,

    /// Random blank moves used to scramble the goal into a start board
    #[clap(short = 'm', long, default_value_t = 12)]
    scramble_moves: usize,

    /// Seed of the first instance; instance i uses seed + i
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Depth limit used for dls
    #[clap(short, long, default_value_t = 20)]
    depth_limit: i64,

    /// Leave out dfs, whose runs can cover most of the state space
    #[clap(long)]
    skip_dfs: bool,
}

/// Sums over the instances a strategy solved.
#[derive(Debug, Default)]
struct Totals {
    solved: u64,
    cost: u64,
    popped: u64,
}

impl Totals {
    fn record(&mut self, report: &SearchReport) {
        if let Some(solution) = report.solution() {
            self.solved += 1;
            self.cost += solution.cost;
            self.popped += report.stats.nodes_popped;
        }
    }

    /// Average cost and average nodes popped, or `None` if nothing was solved.
    fn averages(&self) -> Option<(f64, f64)> {
        if self.solved == 0 {
            return None;
        }
        let solved = self.solved as f64;
        Some((self.cost as f64 / solved, self.popped as f64 / solved))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let goal = Board::from_grid(GOAL_GRID)?;
    let options = SearchOptions {
        depth_limit: Some(args.depth_limit),
        max_depth: None,
    };

    let strategies: Vec<Strategy> = Strategy::ALL
        .into_iter()
        .filter(|s| !(args.skip_dfs && *s == Strategy::Dfs))
        .collect();
    let mut totals: HashMap<Strategy, Totals> = HashMap::new();

    println!("Starting strategy evaluation for {} instances...", args.instances);

    for instance in 0..args.instances {
        let seed = args.seed + instance;
        let start = goal.scramble(args.scramble_moves, seed);
        println!("\nInstance {} (Seed: {})\n{}", instance, seed, start);

        for &strategy in &strategies {
            let report = solve(&start, &goal, strategy, &options)?;
            totals.entry(strategy).or_default().record(&report);

            match report.solution() {
                Some(solution) => {
                    println!(
                        "  Strategy: {:<7} Cost: {:<6} Depth: {:<6} Popped: {}",
                        strategy,
                        solution.cost,
                        solution.depth(),
                        report.stats.nodes_popped
                    );
                }
                None => {
                    eprintln!(
                        "  Strategy: {:<7} found no solution (seed {})",
                        strategy, seed
                    );
                }
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Instances evaluated: {}", args.instances);
    println!("\n--- Averages over solved instances ---");

    for strategy in &strategies {
        let Some(total) = totals.get(strategy) else {
            continue;
        };
        let Some((avg_cost, avg_popped)) = total.averages() else {
            println!("Strategy {:<7}: no instance solved", strategy);
            continue;
        };
        println!(
            "Strategy {:<7}: Solved = {:<4} Average Cost = {:<8.2} Average Popped = {:.2}",
            strategy, total.solved, avg_cost, avg_popped
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_averages_ignore_unsolved_instances() {
        let goal = Board::from_grid(GOAL_GRID).unwrap();
        let start = goal.scramble(6, 1);
        let solved = solve(&start, &goal, Strategy::Bfs, &SearchOptions::default()).unwrap();
        let options = SearchOptions {
            depth_limit: Some(0),
            max_depth: None,
        };
        // Two tiles swapped: no sequence of slides reaches the goal.
        let swapped = Board::from_grid([[2, 1, 3], [4, 5, 6], [7, 8, 0]]).unwrap();
        let unsolved = solve(&swapped, &goal, Strategy::Dls, &options).unwrap();
        assert!(!unsolved.is_solved());

        let mut totals = Totals::default();
        totals.record(&solved);
        totals.record(&unsolved);
        totals.record(&solved);

        let cost = solved.solution().unwrap().cost as f64;
        let popped = solved.stats.nodes_popped as f64;
        assert_eq!(totals.averages(), Some((cost, popped)));
        assert_eq!(Totals::default().averages(), None);
    }
}
