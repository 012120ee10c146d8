pub mod chunk_scanner;
pub mod merge_reducer;
pub mod parallel_processor;
pub mod partitioner;

pub use chunk_scanner::{line_start_at_or_after, ChunkScanner, ScannedChunk};
pub use merge_reducer::MergeReducer;
pub use parallel_processor::{ParallelProcessor, ProcessingOutcome, RunStatistics};
pub use partitioner::partition;
