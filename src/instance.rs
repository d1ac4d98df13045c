use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::error::{Error, Result};
use crate::trip::{Leg, TravelTimes};
use crate::types::Seconds;
use crate::utils::{format_duration, Matrix2};

/// Travel times between a fixed list of locations, held in memory.
///
/// Text format, one item per line, blank lines and `#` comments ignored:
///
/// ```text
/// 3
/// Orlando, FL
/// Dallas, TX
/// Chicago, IL
/// 1,2,64800,18 hours
/// 2,1,64500
/// ```
///
/// The first line is the number of locations, followed by that many location
/// names. Every remaining line is a leg `origin,destination,seconds[,text]`
/// with 1-based location indices. Legs without text get a rendered duration.
#[derive(Clone, Debug)]
pub struct MatrixTravelTimes {
    names: Vec<String>,
    index: HashMap<String, usize>,
    legs: Matrix2<Option<(Seconds, String)>>,
}

impl MatrixTravelTimes {
    /// Creates a source for the given locations with no legs.
    pub fn new(names: Vec<String>) -> Result<Self> {
        if names.is_empty() {
            return Err(Error::invalid_argument("at least one location is required"));
        }

        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(Error::invalid_argument(format!(
                    "location {:?} listed more than once",
                    name
                )));
            }
        }

        let n = names.len();
        Ok(MatrixTravelTimes {
            names,
            index,
            legs: Matrix2::new(n, n, None),
        })
    }

    /// Reads a trip file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        let (line_no, count_line) = lines
            .next()
            .ok_or_else(|| Error::parse(0, "expected number of locations"))?;
        let count: usize = count_line
            .parse()
            .map_err(|e| Error::parse(line_no, format!("could not parse location count: {}", e)))?;
        if count == 0 {
            return Err(Error::parse(line_no, "at least one location is required"));
        }

        let mut names = Vec::with_capacity(count);
        let mut last_line = line_no;
        for _ in 0..count {
            let (line_no, name) = lines.next().ok_or_else(|| {
                Error::parse(last_line, format!("expected {} location names", count))
            })?;
            names.push(name.to_string());
            last_line = line_no;
        }

        let mut travel = Self::new(names).map_err(|e| Error::parse(last_line, e.to_string()))?;

        for (line_no, line) in lines {
            let parts: Vec<&str> = line.splitn(4, ',').collect();
            if parts.len() < 3 {
                return Err(Error::parse(line_no, "leg line has insufficient parts"));
            }

            let origin = Self::parse_index(parts[0], count, line_no, "origin")?;
            let destination = Self::parse_index(parts[1], count, line_no, "destination")?;
            let seconds: Seconds = parts[2]
                .trim()
                .parse()
                .map_err(|e| Error::parse(line_no, format!("bad seconds: {}", e)))?;
            let text = parts
                .get(3)
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty());

            travel.set_leg(origin, destination, seconds, text);
        }

        Ok(travel)
    }

    fn parse_index(raw: &str, count: usize, line_no: usize, what: &str) -> Result<usize> {
        let value: usize = raw
            .trim()
            .parse()
            .map_err(|e| Error::parse(line_no, format!("bad {}: {}", what, e)))?;
        value
            .checked_sub(1)
            .filter(|&i| i < count)
            .ok_or_else(|| {
                Error::parse(line_no, format!("{} {} outside 1..={}", what, value, count))
            })
    }

    /// A complete instance named `Stop 1..n` with uniformly drawn leg times
    /// between one minute and `max_seconds`. The same seed gives the same trip.
    pub fn random(n: usize, seed: u64, max_seconds: Seconds) -> Result<Self> {
        if max_seconds < 60 {
            return Err(Error::invalid_argument("max_seconds must be at least 60"));
        }

        let names = (1..=n).map(|i| format!("Stop {}", i)).collect();
        let mut travel = Self::new(names)?;
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

        for origin in 0..n {
            for destination in 0..n {
                if origin != destination {
                    let seconds = rng.random_range(60..=max_seconds);
                    travel.set_leg(origin, destination, seconds, None);
                }
            }
        }

        Ok(travel)
    }

    /// Stores a leg between 0-based location indices, replacing any earlier one.
    ///
    /// Panics if an index is out of range.
    pub fn set_leg(&mut self, origin: usize, destination: usize, seconds: Seconds, text: Option<String>) {
        let text = text.unwrap_or_else(|| format_duration(seconds));
        *self.legs.get_mut(origin, destination) = Some((seconds, text));
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl TravelTimes for MatrixTravelTimes {
    fn leg(&self, origin: &str, destination: &str) -> Result<Leg> {
        let missing = || Error::NoLeg {
            origin: origin.to_string(),
            destination: destination.to_string(),
        };

        let o = *self.index.get(origin).ok_or_else(missing)?;
        let d = *self.index.get(destination).ok_or_else(missing)?;
        let (seconds, text) = self
            .legs
            .try_get(o, d)
            .and_then(Option::as_ref)
            .ok_or_else(missing)?;

        Ok(Leg {
            origin: origin.to_string(),
            destination: destination.to_string(),
            seconds: *seconds,
            text: text.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let travel = MatrixTravelTimes::parse(
            "# header\n2\nOrlando, FL\n\nDallas, TX\n1,2,64800,18 hours, give or take\n2,1,64500\n",
        )
        .unwrap();

        assert_eq!(travel.names(), &["Orlando, FL", "Dallas, TX"]);

        let out = travel.leg("Orlando, FL", "Dallas, TX").unwrap();
        assert_eq!(out.seconds, 64_800);
        assert_eq!(out.text, "18 hours, give or take");

        let back = travel.leg("Dallas, TX", "Orlando, FL").unwrap();
        assert_eq!(back.seconds, 64_500);
        assert_eq!(back.text, "17 hours 55 mins");

        assert!(matches!(
            travel.leg("Orlando, FL", "Orlando, FL"),
            Err(Error::NoLeg { .. })
        ));
    }

    #[test]
    fn test_parse_errors_name_the_line() {
        let cases = [
            ("", 0),
            ("x\n", 1),
            ("0\n", 1),
            ("2\nA\n", 2),
            ("2\nA\nB\n1,2\n", 4),
            ("2\nA\nB\n1,3,10\n", 4),
            ("2\nA\nB\n\n0,1,10\n", 5),
            ("2\nA\nB\n1,2,ten\n", 4),
            ("2\nA\nA\n", 3),
        ];

        for (text, expected_line) in cases {
            match MatrixTravelTimes::parse(text) {
                Err(Error::Parse { line, .. }) => assert_eq!(line, expected_line, "input {:?}", text),
                other => panic!("expected parse error for {:?}, got {:?}", text, other.map(|_| ())),
            }
        }
    }

    #[test]
    fn test_random_is_seeded() {
        let a = MatrixTravelTimes::random(5, 17, 3_600).unwrap();
        let b = MatrixTravelTimes::random(5, 17, 3_600).unwrap();
        let c = MatrixTravelTimes::random(5, 18, 3_600).unwrap();

        assert_eq!(a.legs, b.legs);
        assert_ne!(a.legs, c.legs);

        let leg = a.leg("Stop 1", "Stop 5").unwrap();
        assert!((60..=3_600).contains(&leg.seconds));
        assert!(a.leg("Stop 3", "Stop 3").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trip.txt");
        std::fs::write(&path, "2\nHome\nAway\n1,2,120\n2,1,180\n").unwrap();

        let travel = MatrixTravelTimes::load(&path).unwrap();
        assert_eq!(travel.leg("Away", "Home").unwrap().seconds, 180);

        assert!(matches!(
            MatrixTravelTimes::load(dir.path().join("missing.txt")),
            Err(Error::Io(_))
        ));
    }
}
