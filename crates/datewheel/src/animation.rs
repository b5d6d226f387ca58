use std::time::{Duration, Instant};

/// Visual correction from a release angle to an exact slot angle.
///
/// The wheel state is committed to `to` before the animation starts; this only tells the
/// renderer which angle to show in between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapAnimation {
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
}

impl SnapAnimation {
    pub fn new(from: f64, to: f64, started: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started,
            duration,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, now: Instant) -> f64 {
        let t = ease_out_cubic(self.progress(now));
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let start = Instant::now();
        let anim = SnapAnimation::new(1.0, 2.0, start, Duration::from_millis(200));
        assert_eq!(anim.value_at(start), 1.0);
        assert!(!anim.is_finished(start));
        assert_eq!(anim.value_at(start + Duration::from_millis(200)), 2.0);
        assert!(anim.is_finished(start + Duration::from_secs(5)));
    }

    #[test]
    fn test_eases_out() {
        let start = Instant::now();
        let anim = SnapAnimation::new(0.0, 1.0, start, Duration::from_millis(100));
        let halfway = anim.value_at(start + Duration::from_millis(50));
        assert!(halfway > 0.5 && halfway < 1.0);
    }

    #[test]
    fn test_zero_duration_is_immediate() {
        let start = Instant::now();
        let anim = SnapAnimation::new(0.0, -1.0, start, Duration::ZERO);
        assert!(anim.is_finished(start));
        assert_eq!(anim.value_at(start), -1.0);
    }
}
