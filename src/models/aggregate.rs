use ahash::AHashMap;

use crate::models::StationKey;

/// Per-worker or global mapping from station to its running statistics.
pub type AggregateTable = AHashMap<StationKey, Aggregate>;

/// Running min/max/sum/count for one station. The mean is always derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub sum: f64,
    pub count: u64,
    pub min: f64,
    pub max: f64,
}

impl Aggregate {
    /// Start from the first observed value.
    pub fn new(value: f64) -> Self {
        Self {
            sum: value,
            count: 1,
            min: value,
            max: value,
        }
    }

    pub fn observe(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += value;
        self.count += 1;
    }

    /// Fold another aggregate of the same station into this one.
    pub fn merge(&mut self, other: &Aggregate) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }

    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_observe() {
        let mut agg = Aggregate::new(3.0);
        agg.observe(-1.5);
        agg.observe(7.5);

        assert_eq!(agg.min, -1.5);
        assert_eq!(agg.max, 7.5);
        assert_eq!(agg.sum, 9.0);
        assert_eq!(agg.count, 3);
        assert_eq!(agg.mean(), 3.0);
    }

    #[test]
    fn test_aggregate_merge() {
        let mut left = Aggregate::new(1.0);
        left.observe(2.0);

        let mut right = Aggregate::new(-4.0);
        right.observe(10.0);

        left.merge(&right);

        assert_eq!(left.min, -4.0);
        assert_eq!(left.max, 10.0);
        assert_eq!(left.sum, 9.0);
        assert_eq!(left.count, 4);
    }
}
