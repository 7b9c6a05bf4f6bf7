/// What to do after the surface refused to hand out a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; drawing resumes next step.
    Reconfigured,
    /// Transient; drop this step's frame.
    SkipFrame,
    /// Unrecoverable (commonly OOM); the frame loop must stop.
    Fatal,
}

impl SurfaceErrorAction {
    #[inline]
    pub fn is_fatal(self) -> bool {
        self == SurfaceErrorAction::Fatal
    }
}
