//! Run-while-mounted frame loop
//!
//! Two states, `Stopped` and `Running`. The browser glue checks
//! [`FrameLoop::begin_frame`] at the top of every scheduled callback and only
//! re-arms while running. Stopping hands back the pending request handle so
//! the caller can cancel it.

/// Loop lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Stopped,
    Running,
}

/// Frame loop bookkeeping, generic over the scheduler's request handle
#[derive(Debug, Clone)]
pub struct FrameLoop<H = i32> {
    state: LoopState,
    pending: Option<H>,
    frames: u64,
}

impl<H> Default for FrameLoop<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> FrameLoop<H> {
    pub fn new() -> Self {
        Self {
            state: LoopState::Stopped,
            pending: None,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Stopped -> Running. Returns true if the caller must schedule the first
    /// frame; false if the loop was already running.
    pub fn start(&mut self) -> bool {
        match self.state {
            LoopState::Running => false,
            LoopState::Stopped => {
                self.state = LoopState::Running;
                true
            }
        }
    }

    /// Called first thing in a scheduled callback. The request that fired is
    /// no longer pending. Returns whether the frame should run.
    pub fn begin_frame(&mut self) -> bool {
        self.pending = None;
        if self.is_running() {
            self.frames += 1;
            true
        } else {
            false
        }
    }

    /// Remember the handle of the next scheduled callback
    pub fn set_pending(&mut self, handle: H) {
        self.pending = Some(handle);
    }

    pub fn pending(&self) -> Option<&H> {
        self.pending.as_ref()
    }

    /// Running -> Stopped. Returns the outstanding request to cancel, if any.
    pub fn stop(&mut self) -> Option<H> {
        self.state = LoopState::Stopped;
        self.pending.take()
    }

    /// Frames run since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_stopped() {
        let mut frame_loop: FrameLoop = FrameLoop::new();
        assert_eq!(frame_loop.state(), LoopState::Stopped);
        assert!(!frame_loop.begin_frame());
        assert_eq!(frame_loop.frames(), 0);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut frame_loop: FrameLoop = FrameLoop::new();
        assert!(frame_loop.start());
        assert!(!frame_loop.start());
        assert!(frame_loop.is_running());
    }

    #[test]
    fn test_running_frames_rearm() {
        let mut frame_loop = FrameLoop::new();
        frame_loop.start();
        frame_loop.set_pending(1);

        for handle in 2..5 {
            assert!(frame_loop.begin_frame());
            assert!(frame_loop.pending().is_none());
            frame_loop.set_pending(handle);
        }
        assert_eq!(frame_loop.frames(), 3);
        assert_eq!(frame_loop.pending(), Some(&4));
    }

    #[test]
    fn test_stop_returns_pending_and_blocks_next_frame() {
        let mut frame_loop = FrameLoop::new();
        frame_loop.start();
        frame_loop.set_pending(7);

        assert_eq!(frame_loop.stop(), Some(7));
        assert_eq!(frame_loop.state(), LoopState::Stopped);
        assert_eq!(frame_loop.stop(), None);

        // A callback that slipped through after stop does nothing
        assert!(!frame_loop.begin_frame());
        assert_eq!(frame_loop.frames(), 0);
    }

    #[test]
    fn test_restart_after_stop() {
        let mut frame_loop: FrameLoop<u32> = FrameLoop::new();
        frame_loop.start();
        frame_loop.stop();
        assert!(frame_loop.start());
        assert!(frame_loop.begin_frame());
    }
}
