/// Where a recorder is reading from.
///
/// ```text
/// live ──rewind──→ replay ──rewind──→ replay
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingMode {
    /// Pulling from the wrapped source and caching every block.
    Live,
    /// Reading the materialized recording from memory.
    Replay,
}

impl RecordingMode {
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }

    pub fn is_replay(&self) -> bool {
        matches!(self, Self::Replay)
    }
}

/// Progress of an overlapping-window sequence.
///
/// ```text
/// not started → running → exhausted
///      ↑____________ rewind ____|
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    /// No window produced since construction or the last rewind.
    #[default]
    NotStarted,
    /// At least one window produced; the carry buffer is live.
    Running,
    /// End of stream reached; only a rewind restarts the sequence.
    Exhausted,
}

impl WindowState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}
