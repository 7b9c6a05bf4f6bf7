use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Process-level "continue running" flag.
///
/// Cloned into whoever needs to observe or end the run; the window clears it
/// when the user closes the window.
#[derive(Debug, Clone)]
pub struct RunFlag(Arc<AtomicBool>);

impl RunFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn stop(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let a = RunFlag::new();
        let b = a.clone();
        b.stop();
        assert!(!a.is_running());
    }
}
