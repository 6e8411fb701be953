//! Featured-products horizontal carousel.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Previous,
    Next,
}

impl ScrollDirection {
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Previous => -1.0,
            Self::Next => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Carousel {
    item_count: usize,
    gap_px: f64,
    nav_threshold: usize,
}

impl Carousel {
    #[must_use]
    pub const fn new(item_count: usize, gap_px: f64, nav_threshold: usize) -> Self {
        Self {
            item_count,
            gap_px,
            nav_threshold,
        }
    }

    /// Navigation buttons are hidden when every card already fits.
    #[must_use]
    pub const fn shows_navigation(&self) -> bool {
        self.item_count > self.nav_threshold
    }

    /// Horizontal scroll-by amount: one card plus the gap.
    #[must_use]
    pub fn scroll_by(&self, direction: ScrollDirection, card_width: f64) -> f64 {
        if self.item_count == 0 {
            return 0.0;
        }
        direction.sign() * (card_width + self.gap_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_hidden_for_three_or_fewer() {
        assert!(!Carousel::new(0, 12.0, 3).shows_navigation());
        assert!(!Carousel::new(3, 12.0, 3).shows_navigation());
        assert!(Carousel::new(4, 12.0, 3).shows_navigation());
    }

    #[test]
    fn scrolls_one_card_plus_gap() {
        let carousel = Carousel::new(6, 12.0, 3);
        assert!((carousel.scroll_by(ScrollDirection::Next, 240.0) - 252.0).abs() < f64::EPSILON);
        assert!(
            (carousel.scroll_by(ScrollDirection::Previous, 240.0) + 252.0).abs() < f64::EPSILON
        );
        assert!(Carousel::new(0, 12.0, 3).scroll_by(ScrollDirection::Next, 240.0).abs() < f64::EPSILON);
    }
}
