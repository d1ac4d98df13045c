use arrow::array::{BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_writer::ArrowWriter;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::solver::Solution;
use crate::types::{Vertex, Weight};

/// Summary of one solve, one row in the metrics file.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveRecord {
    pub instance: String,
    pub run: usize,
    pub vertices: usize,
    pub start: Vertex,
    pub cost: f64,
    pub nodes: u64,
    pub pruned: u64,
    pub dead_ends: u64,
    pub improvements: usize,
    pub complete: bool,
    pub time: f64,
}

impl SolveRecord {
    pub fn new<W: Weight>(
        instance: &str,
        run: usize,
        vertices: usize,
        start: Vertex,
        solution: &Solution<W>,
    ) -> Self {
        SolveRecord {
            instance: instance.to_string(),
            run,
            vertices,
            start,
            cost: solution.tour.cost.as_f64(),
            nodes: solution.stats.nodes,
            pruned: solution.stats.pruned,
            dead_ends: solution.stats.dead_ends,
            improvements: solution.stats.improvements.len(),
            complete: solution.complete,
            time: solution.stats.elapsed.as_secs_f64(),
        }
    }
}

pub fn serialize_to_parquet(records: &[SolveRecord], path: impl AsRef<Path>) -> Result<()> {
    let instances: StringArray = records.iter().map(|r| Some(r.instance.as_str())).collect();
    let runs: Int64Array = records.iter().map(|r| r.run as i64).collect();
    let vertices: Int64Array = records.iter().map(|r| r.vertices as i64).collect();
    let starts: Int64Array = records.iter().map(|r| r.start as i64).collect();
    let costs: Float64Array = records.iter().map(|r| r.cost).collect();
    let nodes: Int64Array = records.iter().map(|r| r.nodes as i64).collect();
    let pruned: Int64Array = records.iter().map(|r| r.pruned as i64).collect();
    let dead_ends: Int64Array = records.iter().map(|r| r.dead_ends as i64).collect();
    let improvements: Int64Array = records.iter().map(|r| r.improvements as i64).collect();
    let complete: BooleanArray = records.iter().map(|r| Some(r.complete)).collect();
    let times: Float64Array = records.iter().map(|r| r.time).collect();

    // Arrow schema
    let schema = Schema::new(vec![
        Field::new("instance", DataType::Utf8, false),
        Field::new("run", DataType::Int64, false),
        Field::new("vertices", DataType::Int64, false),
        Field::new("start", DataType::Int64, false),
        Field::new("cost", DataType::Float64, false),
        Field::new("nodes", DataType::Int64, false),
        Field::new("pruned", DataType::Int64, false),
        Field::new("dead_ends", DataType::Int64, false),
        Field::new("improvements", DataType::Int64, false),
        Field::new("complete", DataType::Boolean, false),
        Field::new("time", DataType::Float64, false),
    ]);

    let batch = RecordBatch::try_new(
        Arc::new(schema),
        vec![
            Arc::new(instances),
            Arc::new(runs),
            Arc::new(vertices),
            Arc::new(starts),
            Arc::new(costs),
            Arc::new(nodes),
            Arc::new(pruned),
            Arc::new(dead_ends),
            Arc::new(improvements),
            Arc::new(complete),
            Arc::new(times),
        ],
    )?;

    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::WeightedDigraph;
    use crate::solver::ExactTourSolver;
    use parquet::file::reader::{FileReader, SerializedFileReader};

    #[test]
    fn test_record_and_write() {
        let graph =
            WeightedDigraph::from_edges(2, vec![(0, 1, 4u32, ()), (1, 0, 6, ())]).unwrap();
        let solution = ExactTourSolver::new(&graph).solve(0).unwrap();

        let record = SolveRecord::new("pair", 1, 2, 0, &solution);
        assert_eq!(record.cost, 10.0);
        assert!(record.complete);
        assert_eq!(record.improvements, 1);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solves.parquet");
        serialize_to_parquet(&[record.clone(), record], &path).unwrap();

        let reader = SerializedFileReader::new(File::open(&path).unwrap()).unwrap();
        assert_eq!(reader.metadata().file_metadata().num_rows(), 2);
        assert_eq!(
            reader.metadata().file_metadata().schema_descr().num_columns(),
            11
        );
    }
}
