use serde::Serialize;

use crate::models::{Aggregate, StationKey};

/// Finished statistics for one station, as written to JSON and CSV output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationSummary {
    pub station: String,
    pub min: f64,
    pub mean: f64,
    pub max: f64,
    pub count: u64,
}

impl StationSummary {
    pub fn new(key: &StationKey, aggregate: &Aggregate) -> Self {
        Self {
            station: key.to_str_lossy().into_owned(),
            min: aggregate.min,
            mean: aggregate.mean(),
            max: aggregate.max,
            count: aggregate.count,
        }
    }

    /// `name=min/mean/max` with one fractional digit each.
    pub fn report_entry(&self) -> String {
        format!(
            "{}={:.1}/{:.1}/{:.1}",
            self.station, self.min, self.mean, self.max
        )
    }
}
