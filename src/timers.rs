//! Stage timing for pipeline runs.
//!
//! An RAII timer adds the elapsed time to a slot in [`StageTimings`] when
//! dropped, so a stage that exits early through `?` is still accounted for.

use std::time::{Duration, Instant};

use serde::Serialize;

/// RAII timer that records elapsed time to a mutable slot on Drop.
///
/// ```rust,ignore
/// let mut timings = StageTimings::default();
/// {
///     let _timer = StageTimer::new(&mut timings.parse);
///     // ... parse ...
/// } // timings.parse is updated here
/// ```
pub struct StageTimer<'a> {
    start: Instant,
    slot: &'a mut Duration,
}

impl<'a> StageTimer<'a> {
    pub fn new(slot: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            slot,
        }
    }
}

impl Drop for StageTimer<'_> {
    fn drop(&mut self) {
        *self.slot += self.start.elapsed();
    }
}

/// Wall-clock time spent per stage of one dataset pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageTimings {
    pub fetch: Duration,
    pub unwrap: Duration,
    pub parse: Duration,
    pub normalize: Duration,
    pub sort: Duration,
    pub render: Duration,
}

impl StageTimings {
    pub fn total(&self) -> Duration {
        self.fetch + self.unwrap + self.parse + self.normalize + self.sort + self.render
    }
}

/// Run `f`, adding its duration to `slot`.
pub(crate) fn timed<T>(slot: &mut Duration, f: impl FnOnce() -> T) -> T {
    let _timer = StageTimer::new(slot);
    f()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_stage_timer_records_elapsed() {
        let mut duration = Duration::ZERO;
        {
            let _timer = StageTimer::new(&mut duration);
            thread::sleep(Duration::from_millis(10));
        }
        assert!(duration.as_millis() >= 10);
    }

    #[test]
    fn test_stage_timer_accumulates() {
        let mut duration = Duration::ZERO;
        for _ in 0..3 {
            timed(&mut duration, || thread::sleep(Duration::from_millis(5)));
        }
        assert!(duration.as_millis() >= 15);
    }

    #[test]
    fn test_timed_records_on_error_path() {
        let mut timings = StageTimings::default();
        let result: Result<(), &str> = timed(&mut timings.parse, || {
            thread::sleep(Duration::from_millis(2));
            Err("boom")
        });
        assert!(result.is_err());
        assert!(timings.parse >= Duration::from_millis(2));
        assert_eq!(timings.total(), timings.parse);
    }
}
