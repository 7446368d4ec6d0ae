use crate::config::FadeConfig;

/// Index of the last section whose top has reached `probe`, scanning from the
/// bottom. Falls back to the first section; `None` only when there are none.
pub fn active_section(tops: &[f64], probe: f64) -> Option<usize> {
    if tops.is_empty() {
        return None;
    }
    Some(tops.iter().rposition(|top| *top <= probe).unwrap_or(0))
}

/// Opacity of the option for section `index` while collapsed.
///
/// Reached sections are opaque. Otherwise the option fades in linearly as its
/// section approaches: over `fade.trailing` of the viewport for sections at or
/// before the active one, and over the tighter `fade.leading` for sections
/// after it.
pub fn option_opacity(
    index: usize,
    active: usize,
    section_top: f64,
    probe: f64,
    viewport_height: f64,
    fade: &FadeConfig,
) -> f64 {
    if probe >= section_top {
        return 1.0;
    }

    let fraction = if index <= active {
        fade.trailing
    } else {
        fade.leading
    };
    let span = viewport_height * fraction;
    if span <= 0.0 {
        return 0.0;
    }

    let distance = section_top - probe;
    (1.0 - distance / span).clamp(0.0, 1.0)
}
