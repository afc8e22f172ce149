//! Staged reveal timeline.
//!
//! A finite, cancellable sequence of timed stages driven by elapsed-time
//! deltas from the game loop. Used for the path hint and the echo playback.
//! Presentation only needs `current()` and `is_terminal()`.

/// What the player should see during one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealCue {
    /// Highlight the element at this index of the revealed sequence.
    Show(usize),
    /// Nothing highlighted.
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub cue: RevealCue,
    pub duration_ms: u64,
}

#[derive(Debug, Clone)]
pub struct StagedReveal {
    stages: Vec<Stage>,
    elapsed_ms: u64,
    cancelled: bool,
}

impl StagedReveal {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self {
            stages,
            elapsed_ms: 0,
            cancelled: false,
        }
    }

    /// Reveal `count` elements in order: each shown for `visible_ms`, then
    /// `gap_ms` of blank, then a final `settle_ms` blank before finishing.
    pub fn sequence(count: usize, visible_ms: u64, gap_ms: u64, settle_ms: u64) -> Self {
        let mut stages = Vec::with_capacity(count * 2 + 1);
        for index in 0..count {
            stages.push(Stage {
                cue: RevealCue::Show(index),
                duration_ms: visible_ms,
            });
            stages.push(Stage {
                cue: RevealCue::Blank,
                duration_ms: gap_ms,
            });
        }
        stages.push(Stage {
            cue: RevealCue::Blank,
            duration_ms: settle_ms,
        });
        Self::new(stages)
    }

    /// A timeline that is already finished.
    pub fn finished() -> Self {
        Self::new(Vec::new())
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.stages.iter().map(|s| s.duration_ms).sum()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Advance by `dt_ms`. Returns true if the current stage changed.
    pub fn advance(&mut self, dt_ms: u64) -> bool {
        if self.is_terminal() {
            return false;
        }
        let before = self.current_index();
        self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.total_duration_ms());
        self.current_index() != before
    }

    /// Index of the running stage, `None` once finished or cancelled.
    pub fn current_index(&self) -> Option<usize> {
        if self.cancelled {
            return None;
        }
        let mut stage_end = 0;
        for (index, stage) in self.stages.iter().enumerate() {
            stage_end += stage.duration_ms;
            if self.elapsed_ms < stage_end {
                return Some(index);
            }
        }
        None
    }

    pub fn current(&self) -> Option<RevealCue> {
        self.current_index().map(|i| self.stages[i].cue)
    }

    /// The element currently highlighted, if any.
    pub fn highlighted(&self) -> Option<usize> {
        match self.current() {
            Some(RevealCue::Show(index)) => Some(index),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.current_index().is_none()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Stop the timeline. It never advances again.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }
}
