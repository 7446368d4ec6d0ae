use crate::layout::Layout;
use log::debug;

/// The elements the sticky CTA controller reads and writes.
pub trait StickyView {
    /// Bottom edge of the reference ("Apply now") button in document coordinates.
    fn reference_bottom(&self) -> f64;
    /// Toggles `visible` on the sticky bar.
    fn set_cta_visible(&mut self, visible: bool);
    /// `Some(top)` docks the anchor bar (`sticky-active`, inline `top`);
    /// `None` releases it and clears the override.
    fn dock_anchor_bar(&mut self, top: Option<f64>);
}

/// Shows the sticky CTA once the page has scrolled strictly past the bottom
/// of the reference button.
#[derive(Debug, Default)]
pub struct StickyCta {
    visible: bool,
    sampled: bool,
}

impl StickyCta {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// One scroll sample. Returns whether the bar is visible afterwards.
    pub fn sample(&mut self, layout: &impl Layout, view: &mut impl StickyView) -> bool {
        let trigger = view.reference_bottom();
        let visible = layout.scroll_offset() > trigger;

        if visible != self.visible || !self.sampled {
            debug!(
                "Sticky CTA {} (scroll {} / trigger {})",
                if visible { "shown" } else { "hidden" },
                layout.scroll_offset(),
                trigger
            );
        }

        view.set_cta_visible(visible);
        if visible {
            // Measured after the bar is shown so the anchor bar stacks under it.
            view.dock_anchor_bar(Some(layout.sticky_bar_height()));
        } else {
            view.dock_anchor_bar(None);
        }

        self.visible = visible;
        self.sampled = true;
        visible
    }
}
