use std::collections::HashMap;
use std::fmt;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::graph::WeightedDigraph;
use crate::solver::{ExactTourSolver, Solution, SolverOptions};
use crate::types::{Seconds, Vertex};

/// Travel information for one ordered pair of locations.
#[derive(Clone, Debug, PartialEq)]
pub struct Leg {
    pub origin: String,
    pub destination: String,
    /// Numeric travel time used as the edge weight.
    pub seconds: Seconds,
    /// Human readable travel time.
    pub text: String,
}

/// Source of travel times between named locations, e.g. a directions service.
pub trait TravelTimes {
    fn leg(&self, origin: &str, destination: &str) -> Result<Leg>;
}

/// One row of the itinerary.
#[derive(Clone, Debug, PartialEq)]
pub struct TravelSegment {
    pub start_city: String,
    pub destination_city: String,
    pub travel_time: String,
}

/// Builds a graph with one edge per ordered pair of distinct locations,
/// weighted by travel time and carrying the leg as payload. Vertex `i` is
/// `locations[i]`.
pub fn travel_graph<S, T>(locations: &[S], travel: &T) -> Result<WeightedDigraph<Seconds, Leg>>
where
    S: AsRef<str>,
    T: TravelTimes + ?Sized,
{
    let mut graph = WeightedDigraph::new(locations.len())?;
    for (s, origin) in locations.iter().enumerate() {
        for (d, destination) in locations.iter().enumerate() {
            if s == d {
                continue;
            }
            let leg = travel.leg(origin.as_ref(), destination.as_ref())?;
            graph.add_edge(s, d, leg.seconds, leg)?;
        }
    }
    Ok(graph)
}

/// A round trip from a start location through every destination and back,
/// ordered to minimise total travel time.
pub struct Trip {
    locations: Vec<String>,
    index_by_location: HashMap<String, Vertex>,
    graph: WeightedDigraph<Seconds, Leg>,
    solution: Solution<Seconds>,
}

impl Trip {
    /// Builds the travel graph over `[start] + destinations` and solves it.
    pub fn plan<S, T>(
        start: &str,
        destinations: &[S],
        travel: &T,
        options: &SolverOptions,
    ) -> Result<Self>
    where
        S: AsRef<str>,
        T: TravelTimes + ?Sized,
    {
        if destinations.is_empty() {
            return Err(Error::invalid_argument("a trip needs at least one destination"));
        }

        let locations: Vec<String> = std::iter::once(start)
            .chain(destinations.iter().map(|d| d.as_ref()))
            .map(str::to_string)
            .collect();

        let mut index_by_location = HashMap::with_capacity(locations.len());
        for (i, location) in locations.iter().enumerate() {
            if index_by_location.insert(location.clone(), i).is_some() {
                return Err(Error::invalid_argument(format!(
                    "location {:?} listed more than once",
                    location
                )));
            }
        }

        let graph = travel_graph(&locations, travel)?;
        debug!("travel graph:\n{}", graph);

        let solution = ExactTourSolver::with_options(&graph, options.clone()).solve(0)?;

        let trip = Trip {
            locations,
            index_by_location,
            graph,
            solution,
        };
        info!(
            "planned {} stops from {:?}: {}",
            trip.locations.len() - 1,
            start,
            crate::utils::format_duration(trip.total_seconds())
        );

        Ok(trip)
    }

    pub fn start(&self) -> &str {
        &self.locations[0]
    }

    pub fn destinations(&self) -> &[String] {
        &self.locations[1..]
    }

    pub fn index_of(&self, location: &str) -> Option<Vertex> {
        self.index_by_location.get(location).copied()
    }

    pub fn graph(&self) -> &WeightedDigraph<Seconds, Leg> {
        &self.graph
    }

    pub fn solution(&self) -> &Solution<Seconds> {
        &self.solution
    }

    pub fn total_seconds(&self) -> Seconds {
        self.solution.tour.cost
    }

    /// Location names in visiting order, starting and ending at the start.
    pub fn route(&self) -> Vec<&str> {
        self.solution
            .tour
            .path
            .iter()
            .map(|&v| self.locations[v].as_str())
            .collect()
    }

    /// The last destination visited before heading home.
    pub fn last_stop(&self) -> &str {
        let path = &self.solution.tour.path;
        &self.locations[path[path.len() - 2]]
    }

    /// Walks the tour leg by leg, looking each leg up in the graph.
    pub fn travel_data(&self) -> Vec<TravelSegment> {
        self.solution
            .tour
            .legs()
            .map(|(from, to)| TravelSegment {
                start_city: self.locations[from].clone(),
                destination_city: self.locations[to].clone(),
                travel_time: self
                    .graph
                    .find_edge(from, to)
                    .map(|(_, leg)| leg.text.clone())
                    .unwrap_or_else(|| "N/A".to_string()),
            })
            .collect()
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in self.travel_data() {
            writeln!(
                f,
                "{} -> {} ({})",
                segment.start_city, segment.destination_city, segment.travel_time
            )?;
        }
        write!(
            f,
            "Total: {}",
            crate::utils::format_duration(self.total_seconds())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::MatrixTravelTimes;

    const FOUR_CITIES: &str = "\
        # four cities, symmetric times in seconds
        4
        Orlando, FL
        Dallas, TX
        Baltimore, MD
        Chicago, IL
        1,2,600
        1,3,900
        1,4,1200
        2,1,600
        2,3,2100
        2,4,1500
        3,1,900
        3,2,2100
        3,4,1800
        4,1,1200
        4,2,1500
        4,3,1800
    ";

    #[test]
    fn test_plan_four_cities() {
        let travel = MatrixTravelTimes::parse(FOUR_CITIES).unwrap();
        let trip = Trip::plan(
            "Orlando, FL",
            &["Dallas, TX", "Baltimore, MD", "Chicago, IL"],
            &travel,
            &SolverOptions::default(),
        )
        .unwrap();

        assert_eq!(trip.total_seconds(), 4_800);
        assert_eq!(
            trip.route(),
            vec!["Orlando, FL", "Dallas, TX", "Chicago, IL", "Baltimore, MD", "Orlando, FL"]
        );
        assert_eq!(trip.last_stop(), "Baltimore, MD");
        assert_eq!(trip.index_of("Chicago, IL"), Some(3));
        assert_eq!(trip.start(), "Orlando, FL");
        assert_eq!(trip.destinations().len(), 3);
        assert_eq!(trip.graph().edge_count(), 12);
    }

    #[test]
    fn test_travel_data() {
        let travel = MatrixTravelTimes::parse(FOUR_CITIES).unwrap();
        let trip = Trip::plan(
            "Orlando, FL",
            &["Dallas, TX", "Baltimore, MD", "Chicago, IL"],
            &travel,
            &SolverOptions::default(),
        )
        .unwrap();

        let data = trip.travel_data();
        assert_eq!(data.len(), 4);
        assert_eq!(
            data[0],
            TravelSegment {
                start_city: "Orlando, FL".to_string(),
                destination_city: "Dallas, TX".to_string(),
                travel_time: "10 mins".to_string(),
            }
        );
        assert_eq!(data[3].destination_city, "Orlando, FL");
        assert_eq!(data[3].travel_time, "15 mins");

        let rendered = trip.to_string();
        assert!(rendered.starts_with("Orlando, FL -> Dallas, TX (10 mins)\n"));
        assert!(rendered.ends_with("Total: 1 hour 20 mins"));
    }

    #[test]
    fn test_rejects_duplicates_and_empty_trips() {
        let travel = MatrixTravelTimes::parse(FOUR_CITIES).unwrap();
        let options = SolverOptions::default();

        let duplicate = Trip::plan("Orlando, FL", &["Dallas, TX", "Dallas, TX"], &travel, &options);
        assert!(matches!(duplicate, Err(Error::InvalidArgument(_))));

        let home = Trip::plan("Orlando, FL", &["Orlando, FL"], &travel, &options);
        assert!(matches!(home, Err(Error::InvalidArgument(_))));

        let empty: [&str; 0] = [];
        let nowhere = Trip::plan("Orlando, FL", &empty, &travel, &options);
        assert!(matches!(nowhere, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_unknown_location() {
        let travel = MatrixTravelTimes::parse(FOUR_CITIES).unwrap();
        let result = Trip::plan(
            "Orlando, FL",
            &["Atlantis"],
            &travel,
            &SolverOptions::default(),
        );
        assert!(matches!(result, Err(Error::NoLeg { .. })));
    }

    #[test]
    fn test_custom_travel_source() {
        struct Flat;

        impl TravelTimes for Flat {
            fn leg(&self, origin: &str, destination: &str) -> Result<Leg> {
                Ok(Leg {
                    origin: origin.to_string(),
                    destination: destination.to_string(),
                    seconds: 60,
                    text: "1 min".to_string(),
                })
            }
        }

        let trip = Trip::plan("A", &["B", "C", "D"], &Flat, &SolverOptions::default()).unwrap();
        assert_eq!(trip.total_seconds(), 240);
        // Uniform weights: ascending vertex order wins the tie.
        assert_eq!(trip.route(), vec!["A", "B", "C", "D", "A"]);
    }
}
