use crate::config::OffsetConfig;

/// Live page measurements shared by every scroll-driven controller.
///
/// Heights are the rendered heights of the fixed bars, `0.0` when the bar
/// is absent or not laid out.
pub trait Layout {
    fn scroll_offset(&self) -> f64;
    fn viewport_height(&self) -> f64;
    fn sticky_bar_height(&self) -> f64;
    fn anchor_bar_height(&self) -> f64;
}

fn or_fallback(height: f64, fallback: f64) -> f64 {
    if height > 0.0 {
        height
    } else {
        fallback
    }
}

/// Distance below the scroll offset at which a section counts as reached.
pub fn trigger_offset(layout: &impl Layout, offsets: &OffsetConfig) -> f64 {
    or_fallback(layout.sticky_bar_height(), offsets.sticky_bar_fallback)
        + or_fallback(layout.anchor_bar_height(), offsets.anchor_bar_fallback)
        + offsets.buffer
}

/// Space the fixed bars will occupy once a jump lands. The anchor bar is
/// measured collapsed since the jump collapses it.
pub fn jump_offset(layout: &impl Layout, offsets: &OffsetConfig) -> f64 {
    or_fallback(layout.sticky_bar_height(), offsets.sticky_bar_fallback)
        + offsets.anchor_bar_collapsed
        + offsets.buffer
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Layout;
    use std::cell::Cell;

    /// Hand-set measurements.
    #[derive(Debug, Default)]
    pub struct FixedLayout {
        pub scroll: Cell<f64>,
        pub viewport: f64,
        pub sticky: f64,
        pub anchor: f64,
    }

    impl FixedLayout {
        pub fn new(viewport: f64, sticky: f64, anchor: f64) -> Self {
            Self {
                scroll: Cell::new(0.0),
                viewport,
                sticky,
                anchor,
            }
        }

        pub fn scroll_to(&self, offset: f64) {
            self.scroll.set(offset);
        }
    }

    impl Layout for FixedLayout {
        fn scroll_offset(&self) -> f64 {
            self.scroll.get()
        }
        fn viewport_height(&self) -> f64 {
            self.viewport
        }
        fn sticky_bar_height(&self) -> f64 {
            self.sticky
        }
        fn anchor_bar_height(&self) -> f64 {
            self.anchor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FixedLayout;
    use super::*;

    #[test]
    fn trigger_offset_uses_rendered_heights() {
        let layout = FixedLayout::new(800.0, 64.0, 48.0);
        assert_eq!(trigger_offset(&layout, &OffsetConfig::default()), 120.0);
    }

    #[test]
    fn trigger_offset_falls_back_for_unrendered_bars() {
        let layout = FixedLayout::new(800.0, 0.0, 0.0);
        assert_eq!(trigger_offset(&layout, &OffsetConfig::default()), 70.0 + 60.0 + 8.0);
    }

    #[test]
    fn jump_offset_assumes_collapsed_anchor_bar() {
        let layout = FixedLayout::new(800.0, 64.0, 400.0);
        assert_eq!(jump_offset(&layout, &OffsetConfig::default()), 64.0 + 56.0 + 8.0);

        let hidden = FixedLayout::new(800.0, 0.0, 400.0);
        assert_eq!(jump_offset(&hidden, &OffsetConfig::default()), 70.0 + 56.0 + 8.0);
    }
}
