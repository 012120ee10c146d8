/// Longest station name accepted, in bytes
pub const MAX_KEY_BYTES: usize = 100;

/// Line grammar
pub const FIELD_SEPARATOR: u8 = b';';
pub const LINE_TERMINATOR: u8 = b'\n';

/// Default paths
pub const DEFAULT_INPUT_PATH: &str = "data/measurements.txt";
pub const DEFAULT_OUTPUT_PATH: &str = "result.txt";

/// Environment variable prefix for configuration overrides (BRC_WORKER_COUNT, ...)
pub const ENV_PREFIX: &str = "BRC";

/// Processing defaults
pub const MAX_WORKERS: usize = 4096;
pub const DEFAULT_TABLE_CAPACITY: usize = 1024;

/// Output formats
pub const FORMAT_TEXT: &str = "text";
pub const FORMAT_JSON: &str = "json";
pub const FORMAT_CSV: &str = "csv";
