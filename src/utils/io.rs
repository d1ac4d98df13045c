use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;

use crate::error::{Error, Result};
use crate::solver::SolverOptions;
use crate::types::Seconds;

#[derive(Parser, Debug)]
#[command(about = "Plan the fastest round trip through a set of locations")]
pub struct Args {
    /// Path to a directory containing trip files, or a base path for trip files
    #[arg(short, long)]
    prefix: Option<String>,

    /// Path to one or more trip files
    #[arg(short, long)]
    file: Option<Vec<String>>,

    /// Plan a randomly generated trip with this many locations instead of reading files
    #[arg(long)]
    pub random: Option<usize>,

    /// Seed for randomly generated trips
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Longest leg of a randomly generated trip, in seconds
    #[arg(long, default_value_t = 36_000)]
    pub max_seconds: Seconds,

    /// Location the trip starts and ends at (defaults to the first listed)
    #[arg(short, long)]
    pub start: Option<String>,

    /// Number of runs to perform with equal parameters
    #[arg(short, long, default_value_t = 1)]
    pub runs: u32,

    /// Maximum running time per solve in seconds
    #[arg(short, long)]
    pub time_limit: Option<u64>,

    /// Disable bound pruning (exhaustive search)
    #[arg(long)]
    pub no_prune: bool,

    /// Disable cheapest-edge-first candidate ordering
    #[arg(long)]
    pub no_order: bool,

    /// Explore the first level of the search tree in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Write one record per solve to this Parquet file
    #[arg(short, long)]
    pub metrics: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,

    /// Prefix log lines with a timestamp
    #[arg(long)]
    pub log_timestamp: bool,
}

impl Args {
    pub fn solver_options(&self) -> SolverOptions {
        SolverOptions {
            prune: !self.no_prune,
            order_candidates: !self.no_order,
            time_limit: self.time_limit.map(Duration::from_secs),
            parallel: self.parallel,
        }
    }
}

/// Orders file names naturally, so `trip_9` sorts before `trip_10`.
fn natural_key(name: &str) -> Vec<std::result::Result<u64, String>> {
    let mut parts = Vec::new();
    let mut buf = String::new();
    let mut is_digit = None;

    let flush = |buf: &str, digits: bool| {
        if digits {
            buf.parse::<u64>().map_err(|_| buf.to_string())
        } else {
            Err(buf.to_string())
        }
    };

    for c in name.chars() {
        let c = if c == '_' { ' ' } else { c.to_ascii_lowercase() };
        let current_is_digit = c.is_ascii_digit();

        match is_digit {
            Some(prev) if prev != current_is_digit => {
                parts.push(flush(buf.as_str(), prev));
                buf.clear();
            }
            _ => {}
        }
        buf.push(c);
        is_digit = Some(current_is_digit);
    }

    if !buf.is_empty() {
        parts.push(flush(buf.as_str(), is_digit == Some(true)));
    }

    parts
}

pub fn enumerate_input_files(args: &Args) -> Result<Vec<PathBuf>> {
    if let Some(files) = &args.file {
        if let Some(prefix) = &args.prefix {
            Ok(files.iter()
                .map(|f| Path::new(prefix).join(f))
                .collect())
        } else {
            Ok(files.iter()
                .map(|f| Path::new(f).to_path_buf())
                .collect())
        }
    } else if let Some(prefix) = &args.prefix {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(prefix)? {
            let path = entry?.path();
            if path.is_file() {
                files.push(path);
            }
        }

        files.sort_by_cached_key(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(natural_key)
                .unwrap_or_default()
        });

        Ok(files)
    } else {
        Err(Error::invalid_argument(
            "either --file and/or --prefix must be provided",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_order() {
        let mut names = vec!["trip_10.txt", "trip_9.txt", "Trip_1.txt", "alpha.txt"];
        names.sort_by_key(|n| natural_key(n));
        assert_eq!(names, vec!["alpha.txt", "Trip_1.txt", "trip_9.txt", "trip_10.txt"]);
    }

    #[test]
    fn test_prefix_directory_listing() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b_2.txt", "b_10.txt", "a.txt"] {
            std::fs::write(dir.path().join(name), "1\nHome\n").unwrap();
        }

        let args = Args::parse_from([
            "plan",
            "--prefix",
            dir.path().to_str().unwrap(),
        ]);
        let files = enumerate_input_files(&args).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.txt", "b_2.txt", "b_10.txt"]);
    }

    #[test]
    fn test_requires_an_input() {
        let args = Args::parse_from(["plan"]);
        assert!(matches!(
            enumerate_input_files(&args),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_solver_options_from_flags() {
        let args = Args::parse_from(["plan", "--no-prune", "--parallel", "-t", "5"]);
        let options = args.solver_options();
        assert!(!options.prune);
        assert!(options.order_candidates);
        assert!(options.parallel);
        assert_eq!(options.time_limit, Some(Duration::from_secs(5)));
    }
}
