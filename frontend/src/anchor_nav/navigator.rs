use super::fade::{active_section, option_opacity};
use super::label::{LabelView, ScrollDirection, SlideLabel};
use crate::config::PageConfig;
use crate::layout::{jump_offset, trigger_offset, Layout};
use crate::timers::Timers;
use log::{debug, info};

pub const EXPAND_LABEL: &str = "Expand";
pub const COLLAPSE_LABEL: &str = "Collapse";

/// Timed steps of the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavTimer {
    /// Close the option list after a jump.
    Collapse,
    /// Let scroll samples drive the selection again.
    ReleaseGuard,
    SlideOutDone,
    SlideInDone,
}

/// The anchor bar elements the navigator reads and writes.
pub trait NavView: LabelView {
    /// Document top of section `section` (index into the navigator's sections).
    fn section_top(&self, section: usize) -> f64;
    fn set_expanded(&mut self, expanded: bool);
    fn set_toggle_label(&mut self, label: &str);
    fn set_option_active(&mut self, option: usize, active: bool);
    fn set_option_opacity(&mut self, option: usize, opacity: f64);
    fn smooth_scroll_to(&mut self, top: f64);
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavOption {
    pub section_id: String,
    pub display_text: String,
    pub opacity: f64,
    pub is_active: bool,
    section: Option<usize>,
}

impl NavOption {
    pub fn new(section_id: impl Into<String>, display_text: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
            display_text: display_text.into(),
            opacity: 1.0,
            is_active: false,
            section: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigatorViewState {
    pub expanded: bool,
    pub current_label_text: String,
    pub last_active_section_id: Option<String>,
    pub manual_navigation_in_progress: bool,
}

struct Sample {
    tops: Vec<f64>,
    probe: f64,
    active: usize,
}

/// Keeps the anchor bar in step with the page: which section is active, how
/// visible each option is, what the collapsed label says, and whether the
/// option list is open.
pub struct AnchorNavigator {
    config: PageConfig,
    sections: Vec<String>,
    options: Vec<NavOption>,
    state: NavigatorViewState,
    label: SlideLabel,
    last_scroll: f64,
}

impl AnchorNavigator {
    /// `sections` are the ids present in the document, in document order.
    /// Options pointing at any other id stay inert.
    pub fn new(
        config: PageConfig,
        sections: Vec<String>,
        options: Vec<NavOption>,
        initial_label: impl Into<String>,
        initial_scroll: f64,
    ) -> Self {
        let options = options
            .into_iter()
            .map(|mut option| {
                option.section = sections.iter().position(|id| *id == option.section_id);
                if option.section.is_none() {
                    debug!("Anchor option #{} has no matching section", option.section_id);
                }
                option
            })
            .collect();

        let label = SlideLabel::new(initial_label, &config.timing);
        let state = NavigatorViewState {
            current_label_text: label.text().to_string(),
            ..Default::default()
        };

        Self {
            config,
            sections,
            options,
            state,
            label,
            last_scroll: initial_scroll,
        }
    }

    pub fn state(&self) -> &NavigatorViewState {
        &self.state
    }

    #[cfg(test)]
    pub fn options(&self) -> &[NavOption] {
        &self.options
    }

    #[cfg(test)]
    pub fn label(&self) -> &SlideLabel {
        &self.label
    }

    #[cfg(test)]
    pub fn option_index(&self, section_id: &str) -> Option<usize> {
        self.options.iter().position(|o| o.section_id == section_id)
    }

    /// Toggle button or a click on the bar outside any option.
    pub fn toggle(
        &mut self,
        layout: &impl Layout,
        view: &mut impl NavView,
        timers: &mut impl Timers<NavTimer>,
    ) {
        let expanded = !self.state.expanded;
        self.set_expanded(expanded, view, timers);
        self.refresh_opacity(layout, view);
    }

    /// Jump to the section behind option `option`. Returns false, touching
    /// nothing, when the option has no section on the page.
    pub fn select(
        &mut self,
        option: usize,
        layout: &impl Layout,
        view: &mut impl NavView,
        timers: &mut impl Timers<NavTimer>,
    ) -> bool {
        let Some((section, section_id, text)) = self.options.get(option).and_then(|o| {
            o.section
                .map(|s| (s, o.section_id.clone(), o.display_text.clone()))
        }) else {
            return false;
        };

        self.state.manual_navigation_in_progress = true;

        let target = view.section_top(section) - jump_offset(layout, &self.config.offsets);
        view.smooth_scroll_to(target);

        self.mark_active(section, view);
        self.state.last_active_section_id = Some(section_id.clone());
        self.label.swap(&text, view, timers);
        self.sync_label();

        timers.start(NavTimer::Collapse, self.config.timing.collapse_delay_ms);
        timers.start(NavTimer::ReleaseGuard, self.config.timing.manual_guard_ms);

        info!("Jumping to #{} at {}", section_id, target);
        true
    }

    /// One debounced scroll sample.
    pub fn on_scroll(
        &mut self,
        layout: &impl Layout,
        view: &mut impl NavView,
        timers: &mut impl Timers<NavTimer>,
    ) {
        let offset = layout.scroll_offset();
        let direction = if offset > self.last_scroll {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        };
        self.last_scroll = offset;

        let Some(sample) = self.measure(layout, &*view) else {
            return;
        };
        self.apply_opacity(&sample, layout.viewport_height(), view);

        if self.state.manual_navigation_in_progress {
            return;
        }

        // A section without an option leaves the previous selection in place.
        if !self.options.iter().any(|o| o.section == Some(sample.active)) {
            debug!("Section #{} has no anchor option", self.sections[sample.active]);
            return;
        }

        self.mark_active(sample.active, view);

        let section_id = &self.sections[sample.active];
        if self.state.last_active_section_id.as_ref() == Some(section_id) {
            return;
        }
        let previous = self
            .state
            .last_active_section_id
            .replace(section_id.clone());
        debug!("Active section {:?} -> {}", previous, section_id);

        let text = self
            .options
            .iter()
            .find(|o| o.section == Some(sample.active))
            .map(|o| o.display_text.clone());

        if let Some(text) = text {
            if previous.is_none() || self.state.expanded {
                self.label.swap(&text, view, timers);
            } else {
                self.label.transition(&text, direction, view, timers);
            }
            self.sync_label();
        }
    }

    /// The browser reports that scrolling has come to rest.
    pub fn on_scroll_end(&mut self, timers: &mut impl Timers<NavTimer>) {
        if self.config.release_guard_on_scroll_end && self.state.manual_navigation_in_progress {
            debug!("Scroll settled, releasing manual navigation guard");
            self.state.manual_navigation_in_progress = false;
            timers.cancel(NavTimer::ReleaseGuard);
        }
    }

    pub fn on_timer(
        &mut self,
        timer: NavTimer,
        layout: &impl Layout,
        view: &mut impl NavView,
        timers: &mut impl Timers<NavTimer>,
    ) {
        match timer {
            NavTimer::Collapse => {
                self.set_expanded(false, view, timers);
                self.refresh_opacity(layout, view);
            }
            NavTimer::ReleaseGuard => {
                self.state.manual_navigation_in_progress = false;
            }
            NavTimer::SlideOutDone | NavTimer::SlideInDone => {
                self.label.on_timer(timer, view, timers);
                self.sync_label();
            }
        }
    }

    fn set_expanded(
        &mut self,
        expanded: bool,
        view: &mut impl NavView,
        timers: &mut impl Timers<NavTimer>,
    ) {
        self.state.expanded = expanded;
        view.set_expanded(expanded);
        view.set_toggle_label(if expanded { COLLAPSE_LABEL } else { EXPAND_LABEL });
        self.label.settle(view, timers);
        self.sync_label();
    }

    fn measure(&self, layout: &impl Layout, view: &impl NavView) -> Option<Sample> {
        let tops: Vec<f64> = (0..self.sections.len()).map(|i| view.section_top(i)).collect();
        let probe = layout.scroll_offset() + trigger_offset(layout, &self.config.offsets);
        let active = active_section(&tops, probe)?;
        Some(Sample { tops, probe, active })
    }

    fn refresh_opacity(&mut self, layout: &impl Layout, view: &mut impl NavView) {
        if let Some(sample) = self.measure(layout, &*view) {
            self.apply_opacity(&sample, layout.viewport_height(), view);
        }
    }

    fn apply_opacity(&mut self, sample: &Sample, viewport_height: f64, view: &mut impl NavView) {
        let expanded = self.state.expanded;
        let fade = self.config.fade;
        for (index, option) in self.options.iter_mut().enumerate() {
            let Some(section) = option.section else {
                continue;
            };
            let opacity = if expanded {
                1.0
            } else {
                option_opacity(
                    section,
                    sample.active,
                    sample.tops[section],
                    sample.probe,
                    viewport_height,
                    &fade,
                )
            };
            option.opacity = opacity;
            view.set_option_opacity(index, opacity);
        }
    }

    fn mark_active(&mut self, section: usize, view: &mut impl NavView) {
        for (index, option) in self.options.iter_mut().enumerate() {
            let active = option.section == Some(section);
            option.is_active = active;
            view.set_option_active(index, active);
        }
    }

    fn sync_label(&mut self) {
        if self.state.current_label_text != self.label.text() {
            self.state.current_label_text = self.label.text().to_string();
        }
    }
}
