pub mod constants;
pub mod decimal;
pub mod profiler;
pub mod progress;

pub use constants::*;
pub use decimal::{parse_decimal, parse_decimal_at};
pub use profiler::CpuProfiler;
pub use progress::ProgressReporter;
