use super::navigator::NavTimer;
use crate::config::TimingConfig;
use crate::timers::Timers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Slide animation classes on the label's text wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slide {
    OutUp,
    OutDown,
    InFromBottom,
    InFromTop,
}

impl Slide {
    pub const ALL: [Slide; 4] = [
        Slide::OutUp,
        Slide::OutDown,
        Slide::InFromBottom,
        Slide::InFromTop,
    ];

    pub fn class(self) -> &'static str {
        match self {
            Slide::OutUp => "slide-out-up",
            Slide::OutDown => "slide-out-down",
            Slide::InFromBottom => "slide-in-from-bottom",
            Slide::InFromTop => "slide-in-from-top",
        }
    }

    /// Scrolling down pushes the old text up and out.
    pub fn out(direction: ScrollDirection) -> Self {
        match direction {
            ScrollDirection::Down => Slide::OutUp,
            ScrollDirection::Up => Slide::OutDown,
        }
    }

    pub fn enter(direction: ScrollDirection) -> Self {
        match direction {
            ScrollDirection::Down => Slide::InFromBottom,
            ScrollDirection::Up => Slide::InFromTop,
        }
    }
}

/// Output surface of the current-section label.
pub trait LabelView {
    fn set_label_text(&mut self, text: &str);
    /// Removes every slide class, then adds `slide` if given.
    fn set_label_slide(&mut self, slide: Option<Slide>);
    /// Reads a layout property so the next class change starts a fresh transition.
    fn flush_label_layout(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlidePhase {
    Idle,
    SlidingOut(ScrollDirection),
    SlidingIn(ScrollDirection),
}

/// Two-phase text replacement for the collapsed label.
///
/// `shown` is what the DOM currently displays, `target` is what it settles on.
/// The two differ only while sliding out.
#[derive(Debug, Clone)]
pub struct SlideLabel {
    shown: String,
    target: String,
    phase: SlidePhase,
    slide_out_ms: u32,
    slide_in_ms: u32,
}

impl SlideLabel {
    pub fn new(text: impl Into<String>, timing: &TimingConfig) -> Self {
        let text = text.into();
        Self {
            shown: text.clone(),
            target: text,
            phase: SlidePhase::Idle,
            slide_out_ms: timing.slide_out_ms,
            slide_in_ms: timing.slide_in_ms,
        }
    }

    pub fn text(&self) -> &str {
        &self.target
    }

    #[cfg(test)]
    pub fn shown(&self) -> &str {
        &self.shown
    }

    #[cfg(test)]
    pub fn phase(&self) -> SlidePhase {
        self.phase
    }

    /// Replaces the text with no animation, cancelling any in flight.
    pub fn swap(
        &mut self,
        text: &str,
        view: &mut impl LabelView,
        timers: &mut impl Timers<NavTimer>,
    ) {
        Self::cancel(timers);
        view.set_label_slide(None);
        if self.shown != text {
            view.set_label_text(text);
        }
        self.shown = text.to_string();
        self.target = text.to_string();
        self.phase = SlidePhase::Idle;
    }

    /// Drops any running animation and lands on the target text.
    pub fn settle(&mut self, view: &mut impl LabelView, timers: &mut impl Timers<NavTimer>) {
        let target = self.target.clone();
        self.swap(&target, view, timers);
    }

    /// Starts a slide towards `text`. Returns false when nothing needs to move.
    pub fn transition(
        &mut self,
        text: &str,
        direction: ScrollDirection,
        view: &mut impl LabelView,
        timers: &mut impl Timers<NavTimer>,
    ) -> bool {
        if self.target == text {
            return false;
        }

        Self::cancel(timers);
        self.target = text.to_string();

        if self.shown == text {
            // Reverted mid slide-out; the old text never left.
            view.set_label_slide(None);
            self.phase = SlidePhase::Idle;
            return false;
        }

        view.set_label_slide(Some(Slide::out(direction)));
        self.phase = SlidePhase::SlidingOut(direction);
        timers.start(NavTimer::SlideOutDone, self.slide_out_ms);
        true
    }

    pub fn on_timer(
        &mut self,
        timer: NavTimer,
        view: &mut impl LabelView,
        timers: &mut impl Timers<NavTimer>,
    ) {
        match (timer, self.phase) {
            (NavTimer::SlideOutDone, SlidePhase::SlidingOut(direction)) => {
                view.set_label_text(&self.target);
                self.shown = self.target.clone();
                view.set_label_slide(None);
                view.flush_label_layout();
                view.set_label_slide(Some(Slide::enter(direction)));
                self.phase = SlidePhase::SlidingIn(direction);
                timers.start(NavTimer::SlideInDone, self.slide_in_ms);
            }
            (NavTimer::SlideInDone, SlidePhase::SlidingIn(_)) => {
                view.set_label_slide(None);
                self.phase = SlidePhase::Idle;
            }
            _ => {}
        }
    }

    fn cancel(timers: &mut impl Timers<NavTimer>) {
        timers.cancel(NavTimer::SlideOutDone);
        timers.cancel(NavTimer::SlideInDone);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Recorder {
        text: String,
        slide: Option<Slide>,
        events: Vec<String>,
    }

    impl LabelView for Recorder {
        fn set_label_text(&mut self, text: &str) {
            self.text = text.to_string();
            self.events.push(format!("text:{text}"));
        }
        fn set_label_slide(&mut self, slide: Option<Slide>) {
            self.slide = slide;
            self.events
                .push(format!("slide:{}", slide.map(Slide::class).unwrap_or("none")));
        }
        fn flush_label_layout(&mut self) {
            self.events.push("flush".into());
        }
    }

    #[derive(Default)]
    struct Pending(HashMap<NavTimer, u32>);

    impl Timers<NavTimer> for Pending {
        fn start(&mut self, key: NavTimer, delay_ms: u32) {
            self.0.insert(key, delay_ms);
        }
        fn cancel(&mut self, key: NavTimer) {
            self.0.remove(&key);
        }
    }

    fn label(text: &str) -> SlideLabel {
        SlideLabel::new(text, &TimingConfig::default())
    }

    #[test]
    fn downward_change_slides_out_up_then_in_from_bottom() {
        let mut label = label("About");
        let mut view = Recorder::default();
        let mut timers = Pending::default();

        assert!(label.transition("Fees", ScrollDirection::Down, &mut view, &mut timers));
        assert_eq!(view.slide, Some(Slide::OutUp));
        assert_eq!(timers.0.get(&NavTimer::SlideOutDone), Some(&200));
        assert_eq!(label.shown(), "About");

        timers.0.remove(&NavTimer::SlideOutDone);
        label.on_timer(NavTimer::SlideOutDone, &mut view, &mut timers);
        assert_eq!(
            view.events[1..],
            [
                "text:Fees".to_string(),
                "slide:none".into(),
                "flush".into(),
                "slide:slide-in-from-bottom".into()
            ]
        );
        assert_eq!(timers.0.get(&NavTimer::SlideInDone), Some(&250));

        timers.0.remove(&NavTimer::SlideInDone);
        label.on_timer(NavTimer::SlideInDone, &mut view, &mut timers);
        assert_eq!(view.slide, None);
        assert_eq!(label.phase(), SlidePhase::Idle);
    }

    #[test]
    fn upward_change_uses_mirrored_classes() {
        let mut label = label("Fees");
        let mut view = Recorder::default();
        let mut timers = Pending::default();

        label.transition("About", ScrollDirection::Up, &mut view, &mut timers);
        assert_eq!(view.slide, Some(Slide::OutDown));
        label.on_timer(NavTimer::SlideOutDone, &mut view, &mut timers);
        assert_eq!(view.slide, Some(Slide::InFromTop));
    }

    #[test]
    fn same_text_never_animates() {
        let mut label = label("About");
        let mut view = Recorder::default();
        let mut timers = Pending::default();

        assert!(!label.transition("About", ScrollDirection::Down, &mut view, &mut timers));
        assert!(view.events.is_empty());
        assert!(timers.0.is_empty());
    }

    #[test]
    fn reverting_mid_slide_out_cancels_without_rewriting_text() {
        let mut label = label("About");
        let mut view = Recorder::default();
        let mut timers = Pending::default();

        label.transition("Fees", ScrollDirection::Down, &mut view, &mut timers);
        assert!(!label.transition("About", ScrollDirection::Up, &mut view, &mut timers));
        assert!(timers.0.is_empty());
        assert_eq!(view.slide, None);
        assert_eq!(label.text(), "About");
        assert!(!view.events.iter().any(|e| e.starts_with("text:")));
    }

    #[test]
    fn stale_timer_is_ignored() {
        let mut label = label("About");
        let mut view = Recorder::default();
        let mut timers = Pending::default();

        label.on_timer(NavTimer::SlideInDone, &mut view, &mut timers);
        label.on_timer(NavTimer::SlideOutDone, &mut view, &mut timers);
        assert!(view.events.is_empty());
    }

    #[test]
    fn settle_lands_on_target_mid_animation() {
        let mut label = label("About");
        let mut view = Recorder::default();
        let mut timers = Pending::default();

        label.transition("Fees", ScrollDirection::Down, &mut view, &mut timers);
        label.settle(&mut view, &mut timers);
        assert_eq!(view.text, "Fees");
        assert_eq!(view.slide, None);
        assert!(timers.0.is_empty());
        assert_eq!(label.phase(), SlidePhase::Idle);
    }
}
