use std::time::Instant;

use roadtrip::instance::MatrixTravelTimes;
use roadtrip::logging::init_logger;
use roadtrip::metrics::{self, SolveRecord};
use roadtrip::solver::{ExactTourSolver, SolverOptions};
use roadtrip::trip::travel_graph;
use roadtrip::types::Seconds;

const SIZES: [usize; 5] = [6, 8, 9, 10, 11];
const SEEDS: [u64; 3] = [1, 2, 3];
const MAX_SECONDS: Seconds = 36_000;

const VARIANTS: [(&str, bool, bool, bool); 5] = [
    ("exhaustive", false, true, false),
    ("unordered", true, false, false),
    ("pruned", true, true, false),
    ("unordered_parallel", true, false, true),
    ("parallel", true, true, true),
];

fn main() -> roadtrip::Result<()> {
    init_logger(log::LevelFilter::Warn, false)?;

    let mut records = Vec::new();

    for n in SIZES {
        for seed in SEEDS {
            let travel = MatrixTravelTimes::random(n, seed, MAX_SECONDS)?;
            let graph = travel_graph(travel.names(), &travel)?;
            let instance = format!("random_{}_{}", n, seed);

            println!("------");
            println!("Instance: {}", instance);

            let mut reference = None;

            for (run, (label, prune, order_candidates, parallel)) in VARIANTS.into_iter().enumerate() {
                let options = SolverOptions {
                    prune,
                    order_candidates,
                    time_limit: None,
                    parallel,
                };

                let start_time = Instant::now();
                let solution = ExactTourSolver::with_options(&graph, options).solve(0)?;
                let duration = start_time.elapsed();

                println!(
                    "{:>20}: cost {:>7} nodes {:>10} pruned {:>9} time {:?}",
                    label, solution.tour.cost, solution.stats.nodes, solution.stats.pruned, duration
                );

                match reference {
                    None => reference = Some(solution.tour.cost),
                    Some(cost) if cost != solution.tour.cost => {
                        return Err(roadtrip::Error::other(format!(
                            "{} found cost {} on {}, expected {}",
                            label, solution.tour.cost, instance, cost
                        )));
                    }
                    Some(_) => {}
                }

                records.push(SolveRecord::new(&instance, run + 1, n, 0, &solution));
            }
        }
    }

    std::fs::create_dir_all("instrumentation")?;
    metrics::serialize_to_parquet(&records, "instrumentation/bench.parquet")?;

    Ok(())
}
