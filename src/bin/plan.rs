use std::time::Instant;

use log::{error, info};
use roadtrip::instance::MatrixTravelTimes;
use roadtrip::logging::init_logger;
use roadtrip::metrics::{self, SolveRecord};
use roadtrip::trip::Trip;
use roadtrip::utils::{format_duration, Args, Parser, enumerate_input_files};

fn main() -> roadtrip::Result<()> {
    let args = Args::parse();
    init_logger(args.log_level, args.log_timestamp)?;

    let options = args.solver_options();
    let runs = args.runs.max(1) as usize;

    let mut instances = Vec::new();
    if let Some(n) = args.random {
        let name = format!("random_{}_{}", n, args.seed);
        instances.push((name, MatrixTravelTimes::random(n, args.seed, args.max_seconds)?));
    } else {
        for path in enumerate_input_files(&args)? {
            match MatrixTravelTimes::load(&path) {
                Ok(travel) => instances.push((path.display().to_string(), travel)),
                Err(e) => error!("Failed to load trip '{}': {}", path.display(), e),
            }
        }
    }

    let mut records = Vec::with_capacity(instances.len() * runs);

    for (name, travel) in &instances {
        let start = args
            .start
            .clone()
            .unwrap_or_else(|| travel.names()[0].clone());
        let destinations: Vec<&String> = travel.names().iter().filter(|n| **n != start).collect();

        println!("------");
        println!("Instance: {}", name);
        println!("Start: {} ({} destinations)", start, destinations.len());

        let setup_time = Instant::now();
        let mut best: Option<Trip> = None;

        for run in 1..=runs {
            let trip = match Trip::plan(&start, &destinations, travel, &options) {
                Ok(trip) => trip,
                Err(e) => {
                    error!("Run {}/{} of '{}' failed: {}", run, runs, name, e);
                    continue;
                }
            };

            info!(
                "Run {}/{}: {} nodes, {} pruned, {:?}",
                run,
                runs,
                trip.solution().stats.nodes,
                trip.solution().stats.pruned,
                trip.solution().stats.elapsed
            );

            records.push(SolveRecord::new(
                name,
                run,
                travel.names().len(),
                0,
                trip.solution(),
            ));
            best = Some(trip);
        }

        let duration = setup_time.elapsed();

        if let Some(trip) = best {
            println!("Time computing: {:?} per run", duration / runs as u32);
            if !trip.solution().complete {
                println!("Search stopped at the time limit; the route may not be optimal.");
            }
            println!("Total travel time: {}", format_duration(trip.total_seconds()));
            println!("Route: {}", trip.route().join(" -> "));
            println!("{}", trip);
        }
    }

    if let Some(path) = &args.metrics {
        metrics::serialize_to_parquet(&records, path)?;
        info!("Wrote {} solve records to {}", records.len(), path.display());
    }

    Ok(())
}
