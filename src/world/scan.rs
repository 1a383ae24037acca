//! Queries over the decoded tile sequence.

use std::collections::BTreeMap;

use super::error::Result;
use super::models::TileRun;

/// Result of one tile scan.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Matched coordinates in discovery order: column-major, ascending row
    /// within a column.
    pub matches: Vec<(u32, u32)>,
    /// The match with the smallest row (the visually highest point).
    /// Ties go to the earliest discovery.
    pub extremal: Option<(u32, u32)>,
}

impl ScanResult {
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}

/// Occurrence count per tile id, one count per decoded record: an RLE run
/// of any length counts once. Ordered by id, so iteration is
/// deterministic.
pub type TileCensus = BTreeMap<u16, u64>;

/// Collect every coordinate whose tile id equals `target_id`.
///
/// Single forward pass over the run sequence; each matching run is
/// expanded into individual coordinates. Only the matches are retained,
/// never the grid. The first error in the sequence aborts the scan.
pub fn scan<I>(runs: I, target_id: u16) -> Result<ScanResult>
where
    I: IntoIterator<Item = Result<TileRun>>,
{
    let mut result = ScanResult::default();
    for run in runs {
        let run = run?;
        if run.tile_id != Some(target_id) {
            continue;
        }
        for i in 0..run.run_length {
            let coord = (run.column, run.row + i);
            match result.extremal {
                Some((_, row)) if row <= coord.1 => {}
                _ => result.extremal = Some(coord),
            }
            result.matches.push(coord);
        }
    }
    Ok(result)
}

/// Tally how many records carry each tile id.
pub fn census<I>(runs: I) -> Result<TileCensus>
where
    I: IntoIterator<Item = Result<TileRun>>,
{
    let mut counts = TileCensus::new();
    for run in runs {
        let run = run?;
        if let Some(id) = run.tile_id {
            *counts.entry(id).or_insert(0) += 1;
        }
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(column: u32, row: u32, tile_id: Option<u16>, run_length: u32) -> Result<TileRun> {
        Ok(TileRun {
            column,
            row,
            tile_id,
            run_length,
        })
    }

    #[test]
    fn expands_runs_and_keeps_discovery_order() {
        let runs = vec![
            run(0, 0, Some(42), 2),
            run(1, 0, None, 2),
            run(2, 1, Some(42), 1),
        ];
        let result = scan(runs, 42).unwrap();
        assert_eq!(result.matches, vec![(0, 0), (0, 1), (2, 1)]);
        assert_eq!(result.extremal, Some((0, 0)));
    }

    #[test]
    fn extremal_tie_goes_to_first_discovery() {
        let runs = vec![run(3, 5, Some(9), 1), run(7, 5, Some(9), 1)];
        let result = scan(runs, 9).unwrap();
        assert_eq!(result.extremal, Some((3, 5)));
    }

    #[test]
    fn empty_sequence_yields_no_extremal() {
        let runs: Vec<Result<TileRun>> = Vec::new();
        let result = scan(runs, 9).unwrap();
        assert_eq!(result.match_count(), 0);
        assert_eq!(result.extremal, None);
    }

    #[test]
    fn census_counts_records_not_covered_rows() {
        let runs = vec![run(0, 0, Some(1), 3), run(0, 3, None, 2), run(1, 0, Some(1), 1)];
        let counts = census(runs).unwrap();
        assert_eq!(counts.get(&1), Some(&2));
        assert_eq!(counts.len(), 1);
    }
}
