use std::ops::Range;

use vortex_error::{VortexResult, vortex_bail};

/// A contiguous row range of one file, scanned as a unit by a single worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanPartition {
    pub file_idx: usize,
    pub start_row: u64,
    pub end_row: u64,
}

impl ScanPartition {
    pub fn row_range(&self) -> Range<u64> {
        self.start_row..self.end_row
    }

    pub fn len(&self) -> u64 {
        self.end_row - self.start_row
    }

    pub fn is_empty(&self) -> bool {
        self.start_row == self.end_row
    }
}

/// Split every file into partitions of `partition_rows` rows, files in order and rows
/// ascending within a file.
///
/// The last partition of a file ends at the file's row count and may be shorter. A file
/// without rows still gets a single, empty, partition.
///
/// The partition count rounds up rather than stretching a last full partition over the
/// remainder, so 100000 rows at 65536 per partition plan as `0..65536` and `65536..100000`,
/// and no partition is longer than `partition_rows`.
pub fn plan_partitions(row_counts: &[u64], partition_rows: u64) -> VortexResult<Vec<ScanPartition>> {
    if partition_rows == 0 {
        vortex_bail!("partition rows must be positive");
    }

    let mut partitions = Vec::new();
    for (file_idx, &row_count) in row_counts.iter().enumerate() {
        let partition_count = row_count.div_ceil(partition_rows).max(1);
        partitions.extend((0..partition_count).map(|i| {
            // Below `row_count`, as `i` is less than the partition count.
            let start_row = i * partition_rows;
            ScanPartition {
                file_idx,
                start_row,
                end_row: start_row.saturating_add(partition_rows).min(row_count),
            }
        }));
    }
    Ok(partitions)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn ranges(partitions: &[ScanPartition]) -> Vec<(usize, u64, u64)> {
        partitions
            .iter()
            .map(|p| (p.file_idx, p.start_row, p.end_row))
            .collect()
    }

    #[test]
    fn remainder_goes_to_last_partition() {
        let partitions = plan_partitions(&[100_000], 65536).unwrap();
        assert_eq!(ranges(&partitions), vec![(0, 0, 65536), (0, 65536, 100_000)]);
    }

    #[test]
    fn empty_file() {
        let partitions = plan_partitions(&[0], 65536).unwrap();
        assert_eq!(ranges(&partitions), vec![(0, 0, 0)]);
        assert!(partitions[0].is_empty());
    }

    #[test]
    fn files_in_order() {
        let partitions = plan_partitions(&[5, 0, 12], 4).unwrap();
        assert_eq!(
            ranges(&partitions),
            vec![
                (0, 0, 4),
                (0, 4, 5),
                (1, 0, 0),
                (2, 0, 4),
                (2, 4, 8),
                (2, 8, 12),
            ]
        );
    }

    #[rstest]
    #[case(1, 1)]
    #[case(7, 3)]
    #[case(2048, 2048)]
    #[case(65536, 2048)]
    #[case(65537, 2048)]
    #[case(131_072, 65536)]
    #[case(3, 1000)]
    fn partitions_tile_the_file(#[case] row_count: u64, #[case] partition_rows: u64) {
        let partitions = plan_partitions(&[row_count], partition_rows).unwrap();
        let mut next = 0;
        for partition in &partitions {
            assert_eq!(partition.start_row, next);
            assert!(!partition.is_empty());
            assert!(partition.len() <= partition_rows);
            next = partition.end_row;
        }
        assert_eq!(next, row_count);
    }

    #[test]
    fn huge_partitions_do_not_overflow() {
        let half = u64::MAX / 2 + 1;
        let partitions = plan_partitions(&[u64::MAX], half).unwrap();
        assert_eq!(
            ranges(&partitions),
            vec![(0, 0, half), (0, half, u64::MAX)]
        );

        let partitions = plan_partitions(&[u64::MAX - 1], u64::MAX).unwrap();
        assert_eq!(ranges(&partitions), vec![(0, 0, u64::MAX - 1)]);
    }

    #[test]
    fn short_remainder_gets_its_own_partition() {
        let partitions = plan_partitions(&[65537], 65536).unwrap();
        assert_eq!(ranges(&partitions), vec![(0, 0, 65536), (0, 65536, 65537)]);
    }

    #[test]
    fn zero_partition_rows() {
        assert!(plan_partitions(&[10], 0).is_err());
    }
}
