use std::time::{Duration, Instant};

/// Soft frame-rate limiter.
///
/// Each frame is limited independently: if the measured work time is below
/// the target frame duration, the calling thread sleeps for the remainder.
/// Oversleep is not carried into the next frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FramePacer {
    target: Option<Duration>,
}

impl FramePacer {
    /// No limiting; `finish_frame` never sleeps.
    pub const fn unlimited() -> Self {
        Self { target: None }
    }

    /// Limits to `fps` frames per second.
    ///
    /// Non-positive or non-finite values disable limiting, as do rates so low
    /// that the frame duration does not fit a [`Duration`].
    pub fn from_fps(fps: f64) -> Self {
        if !(fps.is_finite() && fps > 0.0) {
            return Self::unlimited();
        }
        match Duration::try_from_secs_f64(1.0 / fps) {
            Ok(target) => Self::with_target(target),
            Err(err) => {
                log::warn!("frame rate {fps} is out of range ({err}); limiter disabled");
                Self::unlimited()
            }
        }
    }

    pub const fn with_target(target: Duration) -> Self {
        Self { target: Some(target) }
    }

    pub fn target(&self) -> Option<Duration> {
        self.target
    }

    /// Sleep needed after a frame that took `work`, if any.
    pub fn remaining(&self, work: Duration) -> Option<Duration> {
        self.target
            .and_then(|target| target.checked_sub(work))
            .filter(|rest| !rest.is_zero())
    }

    /// Ends a frame that began at `frame_start`, sleeping out the remaining budget.
    ///
    /// Returns the requested sleep duration (zero when over budget).
    pub fn finish_frame(&self, frame_start: Instant) -> Duration {
        self.finish_frame_with(frame_start.elapsed(), std::thread::sleep)
    }

    /// Like [`finish_frame`](Self::finish_frame) with an explicit work time and sleep function.
    pub fn finish_frame_with<S>(&self, work: Duration, sleep: S) -> Duration
    where
        S: FnOnce(Duration),
    {
        match self.remaining(work) {
            Some(rest) => {
                sleep(rest);
                rest
            }
            None => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn under_budget_sleeps_for_the_remainder() {
        let pacer = FramePacer::with_target(Duration::from_millis(16));
        let mut slept = None;
        let requested = pacer.finish_frame_with(Duration::from_millis(5), |d| slept = Some(d));
        assert_eq!(slept, Some(Duration::from_millis(11)));
        assert_eq!(requested, Duration::from_millis(11));
    }

    #[test]
    fn over_budget_does_not_sleep() {
        let pacer = FramePacer::with_target(Duration::from_millis(16));
        let mut called = false;
        let requested = pacer.finish_frame_with(Duration::from_millis(20), |_| called = true);
        assert!(!called);
        assert_eq!(requested, Duration::ZERO);
    }

    #[test]
    fn exactly_on_budget_does_not_sleep() {
        let pacer = FramePacer::with_target(Duration::from_millis(16));
        assert_eq!(pacer.remaining(Duration::from_millis(16)), None);
    }

    #[test]
    fn sixty_fps_target() {
        let pacer = FramePacer::from_fps(60.0);
        let target = pacer.target().unwrap();
        assert!((target.as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn non_positive_fps_disables_limiting() {
        assert_eq!(FramePacer::from_fps(0.0), FramePacer::unlimited());
        assert_eq!(FramePacer::from_fps(-5.0), FramePacer::unlimited());
        assert_eq!(FramePacer::from_fps(f64::NAN), FramePacer::unlimited());
        assert_eq!(FramePacer::unlimited().remaining(Duration::ZERO), None);
    }

    #[test]
    fn vanishingly_small_fps_disables_limiting() {
        assert_eq!(FramePacer::from_fps(1e-30), FramePacer::unlimited());
        assert_eq!(FramePacer::from_fps(f64::MIN_POSITIVE), FramePacer::unlimited());
    }

    #[test]
    fn one_frame_per_minute_is_representable() {
        let target = FramePacer::from_fps(1.0 / 60.0).target().unwrap();
        assert!((target.as_secs_f64() - 60.0).abs() < 1e-6);
    }

    #[test]
    fn each_frame_is_limited_independently() {
        let pacer = FramePacer::with_target(Duration::from_millis(10));
        let first = pacer.finish_frame_with(Duration::from_millis(2), |_| {});
        let second = pacer.finish_frame_with(Duration::from_millis(2), |_| {});
        assert_eq!(first, second);
    }
}
