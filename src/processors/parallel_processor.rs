use crate::error::{ProcessingError, Result};
use crate::models::AggregateTable;
use crate::processors::{partition, ChunkScanner, MergeReducer, ScannedChunk};
use crate::utils::constants::DEFAULT_TABLE_CAPACITY;
use crate::utils::progress::ProgressReporter;
use rayon::prelude::*;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Counters describing one completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStatistics {
    pub bytes: usize,
    pub lines: u64,
    pub stations: usize,
    pub workers: usize,
    pub elapsed: Duration,
}

impl RunStatistics {
    pub fn summary(&self) -> String {
        format!(
            "Processed {} lines ({} bytes) into {} stations using {} workers in {:.3?}",
            self.lines, self.bytes, self.stations, self.workers, self.elapsed
        )
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

/// Global table plus the statistics of the run that produced it.
#[derive(Debug)]
pub struct ProcessingOutcome {
    pub table: AggregateTable,
    pub statistics: RunStatistics,
}

/// Fork-join driver: partition the buffer, scan every range on its own
/// worker, then merge the per-worker tables on the calling thread.
pub struct ParallelProcessor {
    max_workers: usize,
}

impl ParallelProcessor {
    pub fn new(max_workers: usize) -> Self {
        Self { max_workers }
    }

    /// Aggregate every line of `buffer`. The first malformed line in any
    /// worker fails the whole run.
    pub fn process(
        &self,
        buffer: &[u8],
        progress: Option<&ProgressReporter>,
    ) -> Result<ProcessingOutcome> {
        let started = Instant::now();
        let ranges = partition(buffer.len(), self.max_workers)?;

        info!(
            workers = self.max_workers,
            bytes = buffer.len(),
            "starting aggregation"
        );

        if let Some(p) = progress {
            p.set_message(&format!(
                "Scanning {} bytes with {} workers...",
                buffer.len(),
                self.max_workers
            ));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .thread_name(|i| format!("scanner-{}", i))
            .build()
            .map_err(|e| ProcessingError::Config(e.to_string()))?;

        let chunks: Vec<ScannedChunk> = pool.install(|| {
            ranges
                .par_iter()
                .enumerate()
                .map(|(worker, range)| ChunkScanner::new(buffer, worker).scan(*range))
                .collect::<Result<Vec<_>>>()
        })?;

        let lines: u64 = chunks.iter().map(|chunk| chunk.lines).sum();
        debug!(chunks = chunks.len(), lines, "all workers finished");

        if let Some(p) = progress {
            p.set_message("Merging worker results...");
        }

        let reducer = MergeReducer::with_capacity(DEFAULT_TABLE_CAPACITY);
        let table = reducer.merge_tables(chunks.into_iter().map(|chunk| chunk.table));

        let statistics = RunStatistics {
            bytes: buffer.len(),
            lines,
            stations: table.len(),
            workers: self.max_workers,
            elapsed: started.elapsed(),
        };

        info!(
            lines = statistics.lines,
            stations = statistics.stations,
            elapsed = ?statistics.elapsed,
            "aggregation complete"
        );

        Ok(ProcessingOutcome { table, statistics })
    }
}

impl Default for ParallelProcessor {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}
