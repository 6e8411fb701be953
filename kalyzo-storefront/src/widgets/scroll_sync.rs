//! Sticky sidebar that scrolls faster than the window on desktop viewports.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl PanelMetrics {
    #[must_use]
    pub fn max_scroll(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSync {
    multiplier: f64,
    desktop_min_width: f64,
    last_scroll: f64,
}

impl ScrollSync {
    #[must_use]
    pub const fn new(multiplier: f64, desktop_min_width: f64) -> Self {
        Self {
            multiplier,
            desktop_min_width,
            last_scroll: 0.0,
        }
    }

    #[must_use]
    pub fn is_enabled(&self, viewport_width: f64) -> bool {
        viewport_width >= self.desktop_min_width
    }

    /// Window scrolled to `window_scroll`: returns the panel's new `scrollTop`,
    /// the amplified delta clamped to `[0, max_scroll]`.
    pub fn on_scroll(&mut self, window_scroll: f64, panel: PanelMetrics) -> f64 {
        let delta = window_scroll - self.last_scroll;
        self.last_scroll = window_scroll.max(0.0);
        (delta.mul_add(self.multiplier, panel.scroll_top)).clamp(0.0, panel.max_scroll())
    }

    /// Resize handler: below the breakpoint the panel goes back to the top.
    #[must_use]
    pub fn on_resize(&self, viewport_width: f64) -> Option<f64> {
        (!self.is_enabled(viewport_width)).then_some(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(scroll_top: f64) -> PanelMetrics {
        PanelMetrics {
            scroll_top,
            scroll_height: 2000.0,
            client_height: 800.0,
        }
    }

    #[test]
    fn desktop_only() {
        let sync = ScrollSync::new(50.0, 992.0);
        assert!(sync.is_enabled(1280.0));
        assert!(!sync.is_enabled(991.0));
        assert_eq!(sync.on_resize(700.0), Some(0.0));
        assert_eq!(sync.on_resize(1200.0), None);
    }

    #[test]
    fn amplifies_delta_in_both_directions() {
        let mut sync = ScrollSync::new(50.0, 992.0);
        let down = sync.on_scroll(4.0, panel(100.0));
        assert!((down - 300.0).abs() < f64::EPSILON);
        let up = sync.on_scroll(2.0, panel(down));
        assert!((up - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn clamps_to_scrollable_range() {
        let mut sync = ScrollSync::new(50.0, 992.0);
        assert!((sync.on_scroll(100.0, panel(0.0)) - 1200.0).abs() < f64::EPSILON);
        assert!(sync.on_scroll(0.0, panel(1200.0)).abs() < f64::EPSILON);
        let short = PanelMetrics {
            scroll_top: 0.0,
            scroll_height: 300.0,
            client_height: 500.0,
        };
        assert!(sync.on_scroll(50.0, short).abs() < f64::EPSILON);
    }
}
