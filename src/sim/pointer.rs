//! Pointer position with idle expiry
//!
//! Each move event stores the position and pushes the idle deadline out to
//! `now + idle_ms`. Only one deadline exists at a time, so a new move always
//! supersedes the pending expiry.

use glam::DVec2;

#[derive(Debug, Clone)]
pub struct PointerTracker {
    pos: DVec2,
    /// Timestamp (ms) at which the pointer goes idle; None before the first move
    deadline: Option<f64>,
    idle_ms: f64,
}

impl PointerTracker {
    pub fn new(idle_ms: f64) -> Self {
        Self {
            pos: DVec2::ZERO,
            deadline: None,
            idle_ms,
        }
    }

    /// Record a move event at surface-relative `(x, y)`, time `now` (ms)
    pub fn on_move(&mut self, x: f64, y: f64, now: f64) {
        self.pos = DVec2::new(x, y);
        self.deadline = Some(now + self.idle_ms);
    }

    /// Whether a move happened less than `idle_ms` before `now`
    #[inline]
    pub fn is_active(&self, now: f64) -> bool {
        self.deadline.is_some_and(|deadline| now < deadline)
    }

    /// Pointer position if active at `now`
    pub fn active_position(&self, now: f64) -> Option<DVec2> {
        self.is_active(now).then_some(self.pos)
    }

    /// Last reported position, active or not
    pub fn position(&self) -> DVec2 {
        self.pos
    }

    /// Pending idle deadline, if any
    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_before_first_move() {
        let pointer = PointerTracker::new(100.0);
        assert!(!pointer.is_active(0.0));
        assert!(pointer.active_position(1e9).is_none());
    }

    #[test]
    fn test_goes_idle_after_timeout() {
        let mut pointer = PointerTracker::new(100.0);
        pointer.on_move(10.0, 20.0, 0.0);
        assert!(pointer.is_active(0.0));
        assert!(pointer.is_active(50.0));
        assert!(pointer.is_active(99.9));
        assert!(!pointer.is_active(100.0));
        assert!(!pointer.is_active(150.0));
        assert_eq!(pointer.position(), DVec2::new(10.0, 20.0));
    }

    #[test]
    fn test_move_rearms_deadline() {
        let mut pointer = PointerTracker::new(100.0);
        pointer.on_move(0.0, 0.0, 0.0);
        pointer.on_move(5.0, 5.0, 80.0);
        // First deadline (100) no longer applies
        assert!(pointer.is_active(150.0));
        assert_eq!(pointer.deadline(), Some(180.0));
        assert_eq!(pointer.active_position(150.0), Some(DVec2::new(5.0, 5.0)));
        assert!(!pointer.is_active(180.0));
    }

    #[test]
    fn test_steady_stream_never_expires() {
        let mut pointer = PointerTracker::new(100.0);
        let mut t = 0.0;
        while t < 2000.0 {
            pointer.on_move(t, t, t);
            assert!(pointer.is_active(t + 60.0));
            t += 60.0;
        }
    }
}
