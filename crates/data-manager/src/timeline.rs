//! Sorted, immutable record set with half-open window queries

use gaia_shared::{EventRecord, GaiaError, GaiaResult, TimeRange};

/// The loaded event records, validated to be non-empty and sorted by time
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    records: Vec<EventRecord>,
    range: TimeRange,
}

impl Timeline {
    /// Build a timeline, rejecting empty or unsorted input
    pub fn new(records: Vec<EventRecord>) -> GaiaResult<Self> {
        let (first, last) = match (records.first(), records.last()) {
            (Some(first), Some(last)) => (first.time, last.time),
            _ => return Err(GaiaError::EmptyTimeline),
        };

        if let Some(index) = records.windows(2).position(|w| w[1].time < w[0].time) {
            return Err(GaiaError::UnsortedRecords {
                index: index + 1,
                time: records[index + 1].time,
                previous: records[index].time,
            });
        }

        Ok(Self {
            records,
            range: TimeRange::new(first, last),
        })
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; an empty timeline cannot be built
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    pub fn start(&self) -> i64 {
        self.range.start
    }

    pub fn end(&self) -> i64 {
        self.range.end
    }

    /// Records with `after < time <= through`, in time order
    pub fn window(&self, after: f64, through: f64) -> &[EventRecord] {
        let lo = self.records.partition_point(|r| (r.time as f64) <= after);
        self.slice_through(lo, through)
    }

    /// Records with `from <= time <= through`, in time order
    pub fn window_inclusive(&self, from: f64, through: f64) -> &[EventRecord] {
        let lo = self.records.partition_point(|r| (r.time as f64) < from);
        self.slice_through(lo, through)
    }

    fn slice_through(&self, lo: usize, through: f64) -> &[EventRecord] {
        let hi = self.records.partition_point(|r| (r.time as f64) <= through);
        if hi <= lo {
            return &[];
        }
        &self.records[lo..hi]
    }
}
