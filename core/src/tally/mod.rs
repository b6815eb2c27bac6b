//! Accumulates outcomes from concurrently running shots.

use std::cmp::Ordering;
use std::sync::Mutex;

use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TallyKind {
    /// One increment per observed shot.
    Counts,
    /// Weights reported by a runner that aggregated the shots itself.
    Weights,
}

/// Final result of a run: canonical label to count or weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "entries", rename_all = "lowercase")]
pub enum Tally {
    Counts(IndexMap<String, u64>),
    Weights(IndexMap<String, f64>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Aggregation order (payload order for histograms).
    #[default]
    Source,
    Label,
    /// Largest value first, ties broken by label.
    Value,
}

impl Tally {
    pub fn empty(kind: TallyKind) -> Self {
        match kind {
            TallyKind::Counts => Tally::Counts(IndexMap::new()),
            TallyKind::Weights => Tally::Weights(IndexMap::new()),
        }
    }

    pub fn kind(&self) -> TallyKind {
        match self {
            Tally::Counts(_) => TallyKind::Counts,
            Tally::Weights(_) => TallyKind::Weights,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Tally::Counts(m) => m.len(),
            Tally::Weights(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        match self {
            Tally::Counts(m) => m.get(label).map(|&c| c as f64),
            Tally::Weights(m) => m.get(label).copied(),
        }
    }

    /// Sum of all values (number of recorded shots for a count tally).
    pub fn total(&self) -> f64 {
        match self {
            Tally::Counts(m) => m.values().sum::<u64>() as f64,
            Tally::Weights(m) => m.values().sum(),
        }
    }

    /// Label/value pairs as `f64`, in iteration order. This is what renderers consume.
    pub fn entries(&self) -> Vec<(&str, f64)> {
        match self {
            Tally::Counts(m) => m.iter().map(|(k, &v)| (k.as_str(), v as f64)).collect(),
            Tally::Weights(m) => m.iter().map(|(k, &v)| (k.as_str(), v)).collect(),
        }
    }

    pub fn sort(&mut self, order: SortOrder) {
        match self {
            Tally::Counts(m) => sort_map(m, order, |a, b| b.cmp(a)),
            Tally::Weights(m) => sort_map(m, order, |a, b| b.total_cmp(a)),
        }
    }
}

fn sort_map<V>(map: &mut IndexMap<String, V>, order: SortOrder, desc: impl Fn(&V, &V) -> Ordering) {
    match order {
        SortOrder::Source => {}
        SortOrder::Label => map.sort_keys(),
        SortOrder::Value => map.sort_by(|ka, va, kb, vb| desc(va, vb).then_with(|| ka.cmp(kb))),
    }
}

/// Shared accumulator for one run.
///
/// Writers hold the lock only for the insert-or-increment; parsing and process I/O happen
/// outside of it. [`TallyAggregator::snapshot`] consumes the aggregator, so the tally can only be
/// read once every writer has been dropped.
#[derive(Debug)]
pub struct TallyAggregator {
    inner: Mutex<Tally>,
}

impl TallyAggregator {
    pub fn new(kind: TallyKind) -> Self {
        Self {
            inner: Mutex::new(Tally::empty(kind)),
        }
    }

    pub fn record(&self, label: &str) {
        let mut tally = self.lock();
        match &mut *tally {
            Tally::Counts(m) => bump(m, label, 1),
            Tally::Weights(m) => bump(m, label, 1.0),
        }
    }

    pub fn record_weighted(&self, label: &str, weight: f64) {
        let mut tally = self.lock();
        match &mut *tally {
            Tally::Weights(m) => bump(m, label, weight),
            Tally::Counts(_) => {
                tracing::warn!(label, weight, "weighted outcome recorded into a count tally, ignoring");
            }
        }
    }

    pub fn snapshot(self) -> Tally {
        self.inner
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tally> {
        // A writer that panicked mid-increment cannot leave the map half-updated.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn bump<V: std::ops::AddAssign>(map: &mut IndexMap<String, V>, label: &str, by: V) {
    match map.get_mut(label) {
        Some(v) => *v += by,
        None => {
            map.insert(label.to_string(), by);
        }
    }
}
