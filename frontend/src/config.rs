use log::{warn, Level};
use serde::Deserialize;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Id of the optional `<script type="application/json">` block carrying overrides.
pub const CONFIG_ELEMENT_ID: &str = "pageConfig";

/// Tunables for the scroll-driven page behaviours. Every field has a default,
/// so an override only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Section anchors in document order.
    pub sections: Vec<String>,
    pub timing: TimingConfig,
    pub offsets: OffsetConfig,
    pub fade: FadeConfig,
    /// Release the manual navigation guard on `scrollend` instead of only on the timer.
    pub release_guard_on_scroll_end: bool,
    /// Label shown before any section has been sampled.
    pub default_label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub scroll_debounce_ms: u32,
    /// Matches the CSS collapse transition.
    pub collapse_delay_ms: u32,
    /// Upper bound on how long a jump suppresses scroll-driven selection.
    pub manual_guard_ms: u32,
    pub slide_out_ms: u32,
    pub slide_in_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct OffsetConfig {
    pub sticky_bar_fallback: f64,
    pub anchor_bar_fallback: f64,
    /// Height of the anchor bar when collapsed (padding 33 + content 23).
    pub anchor_bar_collapsed: f64,
    pub buffer: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FadeConfig {
    /// Fraction of the viewport over which passed sections fade in.
    pub trailing: f64,
    /// Fraction of the viewport over which upcoming sections fade in.
    pub leading: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            sections: ["about", "redeem", "fees", "earn", "deals", "manage", "faq", "terms"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            timing: TimingConfig::default(),
            offsets: OffsetConfig::default(),
            fade: FadeConfig::default(),
            release_guard_on_scroll_end: true,
            default_label: "About the Everyday Card".to_string(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            scroll_debounce_ms: 10,
            collapse_delay_ms: 300,
            manual_guard_ms: 1000,
            slide_out_ms: 200,
            slide_in_ms: 250,
        }
    }
}

impl Default for OffsetConfig {
    fn default() -> Self {
        Self {
            sticky_bar_fallback: 70.0,
            anchor_bar_fallback: 60.0,
            anchor_bar_collapsed: 56.0,
            buffer: 8.0,
        }
    }
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            trailing: 0.5,
            leading: 0.3,
        }
    }
}

impl PageConfig {
    /// Parses an override block. Blank input means "no overrides".
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw)
    }

    /// Reads the in-page override block, falling back to defaults when it is
    /// absent or malformed.
    pub fn from_document(document: &web_sys::Document) -> Self {
        let raw = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content());

        match raw {
            Some(raw) => Self::from_json(&raw).unwrap_or_else(|e| {
                warn!("Ignoring malformed #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }),
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_constants() {
        let config = PageConfig::default();
        assert_eq!(config.sections.len(), 8);
        assert_eq!(config.sections.first().map(String::as_str), Some("about"));
        assert_eq!(config.sections.last().map(String::as_str), Some("terms"));
        assert_eq!(config.timing.scroll_debounce_ms, 10);
        assert_eq!(config.timing.manual_guard_ms, 1000);
        assert_eq!(config.offsets.anchor_bar_collapsed, 56.0);
        assert!(config.release_guard_on_scroll_end);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = PageConfig::from_json(
            r#"{ "timing": { "manual_guard_ms": 1500 }, "fade": { "leading": 0.25 } }"#,
        )
        .unwrap();

        assert_eq!(config.timing.manual_guard_ms, 1500);
        assert_eq!(config.timing.collapse_delay_ms, 300);
        assert_eq!(config.fade.leading, 0.25);
        assert_eq!(config.fade.trailing, 0.5);
        assert_eq!(config.sections, PageConfig::default().sections);
    }

    #[test]
    fn section_order_can_be_replaced() {
        let config = PageConfig::from_json(r#"{ "sections": ["fees", "faq"] }"#).unwrap();
        assert_eq!(config.sections, vec!["fees".to_string(), "faq".to_string()]);
    }

    #[test]
    fn blank_block_is_default() {
        assert_eq!(PageConfig::from_json("  \n").unwrap(), PageConfig::default());
    }

    #[test]
    fn malformed_block_is_an_error() {
        assert!(PageConfig::from_json("{ timing: 3 ").is_err());
        assert!(PageConfig::from_json(r#"{ "timing": { "slide_in_ms": "fast" } }"#).is_err());
    }
}
