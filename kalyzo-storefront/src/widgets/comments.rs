//! "Load more" pagination over pre-rendered, hidden comments.
use crate::config::RevealMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentPager {
    total: usize,
    visible: usize,
    mode: RevealMode,
}

impl CommentPager {
    #[must_use]
    pub fn new(total: usize, initially_visible: usize, mode: RevealMode) -> Self {
        Self {
            total,
            visible: initially_visible.min(total),
            mode,
        }
    }

    #[must_use]
    pub const fn visible(&self) -> usize {
        self.visible
    }

    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.total - self.visible
    }

    /// The "load more" button is shown only while comments stay hidden.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.remaining() > 0
    }

    #[must_use]
    pub fn is_visible(&self, index: usize) -> bool {
        index < self.visible
    }

    /// Reveal the next batch. Returns how many comments became visible.
    pub fn load_more(&mut self) -> usize {
        let step = match self.mode {
            RevealMode::All => self.remaining(),
            RevealMode::Batched { size } => size.max(1).min(self.remaining()),
        };
        self.visible += step;
        step
    }
}
