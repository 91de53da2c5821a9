//! Counters and histograms keyed by segment label.

use core::fmt;
use std::collections::BTreeMap;
use std::time::Duration;

/// A monotonically increasing counter.
#[derive(Debug, Clone)]
pub struct Counter {
    name: String,
    value: u64,
}

impl Counter {
    /// Creates a new counter with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: 0,
        }
    }

    /// Returns the counter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Increments the counter by the given amount.
    pub fn increment(&mut self, amount: u64) {
        self.value = self.value.saturating_add(amount);
    }

    /// Increments the counter by 1.
    pub fn inc(&mut self) {
        self.increment(1);
    }

    /// Resets the counter to zero.
    pub fn reset(&mut self) {
        self.value = 0;
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// A histogram for tracking value distributions.
#[derive(Debug, Clone)]
pub struct Histogram {
    name: String,
    /// Bucket upper bounds.
    buckets: Vec<f64>,
    /// Counts per bucket (includes +Inf bucket at end).
    counts: Vec<u64>,
    sum: f64,
    count: u64,
    max: f64,
}

impl Histogram {
    /// Creates a new histogram with the given bucket boundaries.
    ///
    /// Buckets should be sorted in ascending order. An implicit +Inf bucket
    /// is added automatically.
    #[must_use]
    pub fn new(name: impl Into<String>, buckets: Vec<f64>) -> Self {
        let count_len = buckets.len() + 1;
        Self {
            name: name.into(),
            buckets,
            counts: vec![0; count_len],
            sum: 0.0,
            count: 0,
            max: 0.0,
        }
    }

    /// Creates a histogram with default latency buckets (in milliseconds).
    ///
    /// Resolver segments are short, so the low end is finer than a typical
    /// request-latency layout.
    #[must_use]
    pub fn with_latency_buckets(name: impl Into<String>) -> Self {
        Self::new(
            name,
            vec![
                0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 1000.0,
            ],
        )
    }

    /// Returns the histogram name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Records a value in the histogram.
    pub fn observe(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
        if value > self.max {
            self.max = value;
        }

        let slot = self
            .buckets
            .iter()
            .position(|&bound| value <= bound)
            .unwrap_or(self.buckets.len());
        self.counts[slot] += 1;
    }

    /// Records a duration in milliseconds.
    pub fn observe_duration(&mut self, elapsed: Duration) {
        self.observe(elapsed.as_secs_f64() * 1000.0);
    }

    /// Returns the sum of all observed values.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Returns the total count of observations.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Returns the largest observed value, or 0 when empty.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Returns the mean of observed values.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    /// Returns the bucket boundaries.
    #[must_use]
    pub fn buckets(&self) -> &[f64] {
        &self.buckets
    }

    /// Returns the counts per bucket.
    #[must_use]
    pub fn bucket_counts(&self) -> &[u64] {
        &self.counts
    }

    /// Resets the histogram.
    pub fn reset(&mut self) {
        self.counts.fill(0);
        self.sum = 0.0;
        self.count = 0;
        self.max = 0.0;
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} count={} sum={:.3}ms max={:.3}ms",
            self.name, self.count, self.sum, self.max
        )
    }
}

/// Call count and latency distribution for one segment label.
#[derive(Debug, Clone)]
pub struct SegmentStats {
    calls: Counter,
    latency: Histogram,
}

impl SegmentStats {
    fn new(label: &str) -> Self {
        Self {
            calls: Counter::new(label),
            latency: Histogram::with_latency_buckets(label),
        }
    }

    /// Returns how many segments with this label finished.
    #[must_use]
    pub const fn calls(&self) -> u64 {
        self.calls.value()
    }

    /// Returns the latency histogram, in milliseconds.
    #[must_use]
    pub fn latency(&self) -> &Histogram {
        &self.latency
    }
}

/// Registry of [`SegmentStats`] keyed by label.
///
/// Labels iterate in sorted order so text output is stable.
#[derive(Debug, Clone, Default)]
pub struct SegmentMetrics {
    segments: BTreeMap<String, SegmentStats>,
}

impl SegmentMetrics {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one finished segment.
    pub fn record(&mut self, label: &str, elapsed: Duration) {
        if !self.segments.contains_key(label) {
            self.segments
                .insert(label.to_owned(), SegmentStats::new(label));
        }
        let Some(stats) = self.segments.get_mut(label) else {
            return;
        };
        stats.calls.inc();
        stats.latency.observe_duration(elapsed);
    }

    /// Returns stats for a label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&SegmentStats> {
        self.segments.get(label)
    }

    /// Returns an iterator over all labels and their stats.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SegmentStats)> {
        self.segments.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of distinct labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Drops all recorded stats.
    pub fn reset(&mut self) {
        self.segments.clear();
    }

    /// Formats all segments as a human-readable table, slowest total first.
    #[must_use]
    pub fn format_text(&self) -> String {
        use std::fmt::Write;

        let mut rows: Vec<_> = self.segments.values().collect();
        rows.sort_by(|a, b| b.latency.sum().total_cmp(&a.latency.sum()));

        let mut s = String::from("# Segments\n");
        for stats in rows {
            let _ = writeln!(s, "{} calls={}", stats.latency, stats.calls());
        }
        s
    }
}
