use winit::dpi::PhysicalSize;

use super::message::SizeMode;

/// Resize debouncer state.
///
/// Interactive drags flood the queue with size notifications; reallocating the
/// surface on each one is wasteful. The latest size is always remembered, but
/// only committed when armed, on maximize, or when the drag ends.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ResizePending {
    pub width: u32,
    pub height: u32,

    /// Armed: the next size notification commits immediately.
    pub check_resize: bool,
}

impl Default for ResizePending {
    fn default() -> Self {
        // Armed so the very first size notification can commit.
        Self {
            width: 0,
            height: 0,
            check_resize: true,
        }
    }
}

impl ResizePending {
    /// Records a size notification and returns the size to commit, if any.
    pub fn on_size(&mut self, width: u32, height: u32, mode: SizeMode) -> Option<PhysicalSize<u32>> {
        self.width = width;
        self.height = height;

        if self.check_resize || mode == SizeMode::Maximized {
            self.check_resize = false;
            Some(self.pending())
        } else {
            None
        }
    }

    /// Re-arms on restore. The size notification that follows commits.
    pub fn on_restore(&mut self) {
        self.check_resize = true;
    }

    /// Drag finished: the last recorded size always commits.
    pub fn on_exit_size_move(&self) -> PhysicalSize<u32> {
        self.pending()
    }

    #[inline]
    pub fn pending(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disarmed() -> ResizePending {
        ResizePending { check_resize: false, ..ResizePending::default() }
    }

    // ── arming ────────────────────────────────────────────────────────────

    #[test]
    fn first_notification_commits() {
        let mut r = ResizePending::default();
        assert_eq!(r.on_size(800, 600, SizeMode::Restored), Some(PhysicalSize::new(800, 600)));
        assert!(!r.check_resize);
    }

    #[test]
    fn disarmed_notification_only_records() {
        let mut r = disarmed();
        assert_eq!(r.on_size(640, 480, SizeMode::Restored), None);
        assert_eq!(r.pending(), PhysicalSize::new(640, 480));
    }

    #[test]
    fn maximize_commits_while_disarmed() {
        let mut r = disarmed();
        assert_eq!(r.on_size(1920, 1080, SizeMode::Maximized), Some(PhysicalSize::new(1920, 1080)));
    }

    #[test]
    fn restore_rearms_without_committing() {
        let mut r = disarmed();
        r.on_restore();
        assert!(r.check_resize);
        assert_eq!(r.on_size(1000, 700, SizeMode::Restored), Some(PhysicalSize::new(1000, 700)));
        assert_eq!(r.on_size(1001, 700, SizeMode::Restored), None);
    }

    // ── drag ──────────────────────────────────────────────────────────────

    #[test]
    fn drag_end_commits_last_size() {
        let mut r = disarmed();
        for w in 500..520 {
            assert_eq!(r.on_size(w, 400, SizeMode::Restored), None);
        }
        assert_eq!(r.on_exit_size_move(), PhysicalSize::new(519, 400));
    }

    #[test]
    fn drag_end_commits_even_when_armed() {
        let r = ResizePending { width: 3, height: 4, check_resize: true };
        assert_eq!(r.on_exit_size_move(), PhysicalSize::new(3, 4));
    }
}
