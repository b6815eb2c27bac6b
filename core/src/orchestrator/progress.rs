/// Receives run progress as a percentage in `[0, 100]`, never decreasing, ending at exactly 100.
pub trait ProgressSink: Send + Sync {
    fn report(&self, percent: f64);
}

/// Progress sink that discards every update.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&self, _percent: f64) {}
}

pub(crate) struct ProgressTracker<'a> {
    sink: &'a dyn ProgressSink,
    total: usize,
    done: usize,
    last: f64,
}

impl<'a> ProgressTracker<'a> {
    pub(crate) fn new(sink: &'a dyn ProgressSink, total: usize) -> Self {
        Self {
            sink,
            total: total.max(1),
            done: 0,
            last: 0.0,
        }
    }

    pub(crate) fn advance(&mut self, steps: usize) {
        self.done = (self.done + steps).min(self.total);
        // Derived from the step count rather than summed increments, so no rounding drift.
        let percent = (self.done as f64 * 100.0 / self.total as f64).clamp(self.last, 100.0);
        self.emit(percent);
    }

    pub(crate) fn finish(&mut self) {
        if self.last < 100.0 {
            self.emit(100.0);
        }
    }

    fn emit(&mut self, percent: f64) {
        self.last = percent;
        self.sink.report(percent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<f64>>);

    impl ProgressSink for Recorder {
        fn report(&self, percent: f64) {
            self.0.lock().unwrap().push(percent);
        }
    }

    #[test]
    fn uneven_steps_end_at_exactly_100() {
        let rec = Recorder::default();
        let mut tracker = ProgressTracker::new(&rec, 7);
        tracker.advance(5);
        tracker.advance(2);
        tracker.finish();

        let seen = rec.0.lock().unwrap().clone();
        assert_eq!(seen.len(), 2);
        assert!((seen[0] - 500.0 / 7.0).abs() < 1e-9);
        assert_eq!(seen[1], 100.0);
    }

    #[test]
    fn finish_fills_up_when_steps_fall_short() {
        let rec = Recorder::default();
        let mut tracker = ProgressTracker::new(&rec, 3);
        tracker.advance(1);
        tracker.finish();
        assert_eq!(*rec.0.lock().unwrap().last().unwrap(), 100.0);
    }

    #[test]
    fn over_advancing_is_clamped() {
        let rec = Recorder::default();
        let mut tracker = ProgressTracker::new(&rec, 2);
        tracker.advance(5);
        tracker.advance(1);
        let seen = rec.0.lock().unwrap().clone();
        assert_eq!(seen, vec![100.0, 100.0]);
    }
}
