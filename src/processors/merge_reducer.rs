use tracing::debug;

use crate::models::AggregateTable;

/// Folds per-worker tables into one global table.
///
/// Folding is associative and commutative except for the order in which
/// `f64` sums are added.
pub struct MergeReducer {
    initial_capacity: usize,
}

impl MergeReducer {
    pub fn new() -> Self {
        Self {
            initial_capacity: 0,
        }
    }

    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self { initial_capacity }
    }

    /// Merge all `tables` in order. Keys missing from a table contribute
    /// nothing to that step.
    pub fn merge_tables<I>(&self, tables: I) -> AggregateTable
    where
        I: IntoIterator<Item = AggregateTable>,
    {
        let mut tables = tables.into_iter();
        let mut global = match tables.next() {
            Some(first) => first,
            None => return AggregateTable::with_capacity(self.initial_capacity),
        };
        let additional = self.initial_capacity.saturating_sub(global.len());
        global.reserve(additional);

        let mut folded = 1;
        for local in tables {
            self.merge_into(&mut global, local);
            folded += 1;
        }

        debug!(tables = folded, stations = global.len(), "merged worker tables");
        global
    }

    /// Fold `local` into `global`.
    pub fn merge_into(&self, global: &mut AggregateTable, local: AggregateTable) {
        for (key, aggregate) in local {
            global
                .entry(key)
                .and_modify(|existing| existing.merge(&aggregate))
                .or_insert(aggregate);
        }
    }
}

impl Default for MergeReducer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ByteRange;
    use crate::processors::ChunkScanner;

    fn scan(input: &[u8]) -> AggregateTable {
        ChunkScanner::new(input, 0)
            .scan(ByteRange::new(0, input.len()))
            .unwrap()
            .table
    }

    #[test]
    fn test_merge_matches_single_scan() {
        let group1 = b"A;1.0\nB;-3.5\nA;7.0\n".as_slice();
        let group2 = b"A;-2.0\nC;4.4\nB;10.0\n".as_slice();
        let union = [group1, group2].concat();

        let merger = MergeReducer::new();
        let merged = merger.merge_tables(vec![scan(group1), scan(group2)]);
        let expected = scan(&union);

        assert_eq!(merged.len(), expected.len());
        for (key, aggregate) in &expected {
            let got = merged[key];
            assert_eq!(got.min, aggregate.min);
            assert_eq!(got.max, aggregate.max);
            assert_eq!(got.count, aggregate.count);
            assert!((got.sum - aggregate.sum).abs() < 1e-9);
        }
    }

    #[test]
    fn test_merge_is_order_independent() {
        let tables = || {
            vec![
                scan(b"A;1.0\n"),
                scan(b"B;2.0\nA;5.0\n"),
                scan(b"A;-1.0\nC;0.0\n"),
            ]
        };

        let merger = MergeReducer::new();
        let forward = merger.merge_tables(tables());
        let backward = merger.merge_tables(tables().into_iter().rev());

        assert_eq!(forward.len(), 3);
        for (key, aggregate) in &forward {
            assert_eq!(backward[key], *aggregate);
        }
    }

    #[test]
    fn test_merge_with_empty_tables() {
        let merger = MergeReducer::default();

        assert!(merger.merge_tables(Vec::new()).is_empty());

        let merged = merger.merge_tables(vec![
            AggregateTable::default(),
            scan(b"A;1.0\n"),
            AggregateTable::default(),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[b"A".as_slice()].count, 1);
    }

    #[test]
    fn test_merge_with_reserved_capacity() {
        let merger = MergeReducer::with_capacity(64);

        let merged = merger.merge_tables(vec![scan(b"A;1.0\nB;2.0\n"), scan(b"A;3.0\n")]);
        assert!(merged.capacity() >= 64);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[b"A".as_slice()].count, 2);

        assert!(merger.merge_tables(Vec::new()).capacity() >= 64);
    }
}
