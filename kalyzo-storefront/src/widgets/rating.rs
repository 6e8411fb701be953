//! Star rating input with hover preview.

pub const FILLED_STAR: char = '★';
pub const EMPTY_STAR: char = '☆';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    stars: u8,
    committed: u8,
    preview: Option<u8>,
}

impl Default for StarRating {
    fn default() -> Self {
        Self::new(5)
    }
}

impl StarRating {
    #[must_use]
    pub const fn new(stars: u8) -> Self {
        Self {
            stars,
            committed: 0,
            preview: None,
        }
    }

    #[must_use]
    pub const fn stars(&self) -> u8 {
        self.stars
    }

    /// Value written to the hidden form field (0 when nothing was picked).
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.committed
    }

    /// Click on the star at zero-based `index`: commits `index + 1`.
    pub fn click(&mut self, index: u8) {
        if index < self.stars {
            self.committed = index + 1;
            self.preview = None;
        }
    }

    /// Pointer enters the star at `index`: preview without committing.
    pub fn hover(&mut self, index: u8) {
        if index < self.stars {
            self.preview = Some(index + 1);
        }
    }

    /// Pointer leaves the widget: show the committed value again.
    pub fn leave(&mut self) {
        self.preview = None;
    }

    #[must_use]
    pub fn displayed(&self) -> u8 {
        self.preview.unwrap_or(self.committed)
    }

    /// Filled flags for each star: index < displayed value.
    #[must_use]
    pub fn filled(&self) -> Vec<bool> {
        let shown = self.displayed();
        (0..self.stars).map(|idx| idx < shown).collect()
    }

    #[must_use]
    pub fn glyphs(&self) -> String {
        self.filled()
            .into_iter()
            .map(|on| if on { FILLED_STAR } else { EMPTY_STAR })
            .collect()
    }
}
