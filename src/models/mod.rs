pub mod aggregate;
pub mod byte_range;
pub mod station_key;
pub mod summary;

pub use aggregate::{Aggregate, AggregateTable};
pub use byte_range::ByteRange;
pub use station_key::StationKey;
pub use summary::StationSummary;
