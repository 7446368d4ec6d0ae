use crate::anchor_nav::label::{LabelView, Slide};
use crate::anchor_nav::navigator::NavView;
use crate::error::SetupError;
use crate::layout::Layout;
use crate::sticky_cta::StickyView;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, ScrollBehavior,
    ScrollToOptions, Window,
};

pub const ACTIVE: &str = "active";
pub const VISIBLE: &str = "visible";
pub const STICKY_ACTIVE: &str = "sticky-active";
pub const EXPANDED: &str = "expanded";
pub const LABEL_WRAPPER: &str = "anchor-text-wrapper";

pub fn html_by_id(document: &Document, id: &str) -> Result<HtmlElement, SetupError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| SetupError::MissingElement(format!("#{}", id)))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| SetupError::NotHtml(format!("#{}", id)))
}

pub fn query(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub fn query_document(document: &Document, selector: &str) -> Result<Element, SetupError> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .ok_or_else(|| SetupError::MissingElement(selector.to_string()))
}

pub fn query_all_html(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// `pageYOffset`, falling back to the root element's `scrollTop`.
pub fn page_offset(window: &Window) -> f64 {
    window
        .scroll_y()
        .ok()
        .or_else(|| {
            window
                .document()?
                .document_element()
                .map(|root| root.scroll_top() as f64)
        })
        .unwrap_or(0.0)
}

fn toggle_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

/// An event listener that unregisters itself when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, SetupError> {
        Self::register(target, event, handler, false)
    }

    /// Registered with `{ passive: true }`, for scroll listeners.
    pub fn passive(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, SetupError> {
        Self::register(target, event, handler, true)
    }

    fn register(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
        passive: bool,
    ) -> Result<Self, SetupError> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|_| SetupError::Listener { event })?;

        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Live measurements of the viewport and the two fixed bars.
#[derive(Clone)]
pub struct DomLayout {
    window: Window,
    sticky_bar: Option<HtmlElement>,
    anchor_bar: Option<HtmlElement>,
}

impl DomLayout {
    pub fn new(window: Window, document: &Document) -> Self {
        Self {
            window,
            sticky_bar: html_by_id(document, "productStickyCTA").ok(),
            anchor_bar: html_by_id(document, "anchorLinkMobile").ok(),
        }
    }
}

impl Layout for DomLayout {
    fn scroll_offset(&self) -> f64 {
        page_offset(&self.window)
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0)
    }

    fn sticky_bar_height(&self) -> f64 {
        self.sticky_bar
            .as_ref()
            .map_or(0.0, |bar| bar.offset_height() as f64)
    }

    fn anchor_bar_height(&self) -> f64 {
        self.anchor_bar
            .as_ref()
            .map_or(0.0, |bar| bar.offset_height() as f64)
    }
}

pub struct DomStickyView {
    window: Window,
    reference: Element,
    cta: HtmlElement,
    anchor_bar: HtmlElement,
}

impl DomStickyView {
    pub fn find(window: Window, document: &Document) -> Result<Self, SetupError> {
        Ok(Self {
            reference: query_document(document, ".btn-apply")?,
            cta: html_by_id(document, "productStickyCTA")?,
            anchor_bar: html_by_id(document, "anchorLinkMobile")?,
            window,
        })
    }
}

impl StickyView for DomStickyView {
    fn reference_bottom(&self) -> f64 {
        let rect = self.reference.get_bounding_client_rect();
        rect.top() + page_offset(&self.window) + rect.height()
    }

    fn set_cta_visible(&mut self, visible: bool) {
        toggle_class(&self.cta, VISIBLE, visible);
    }

    fn dock_anchor_bar(&mut self, top: Option<f64>) {
        toggle_class(&self.anchor_bar, STICKY_ACTIVE, top.is_some());
        let style = self.anchor_bar.style();
        let _ = match top {
            Some(top) => style.set_property("top", &format!("{}px", top)),
            None => style.remove_property("top").map(|_| ()),
        };
    }
}

/// Cached anchor bar elements.
pub struct DomNavView {
    window: Window,
    anchor_bar: HtmlElement,
    toggle: Element,
    label: HtmlElement,
    options: Vec<HtmlElement>,
    sections: Vec<HtmlElement>,
}

impl DomNavView {
    pub fn new(
        window: Window,
        anchor_bar: HtmlElement,
        toggle: Element,
        label: HtmlElement,
        options: Vec<HtmlElement>,
        sections: Vec<HtmlElement>,
    ) -> Self {
        Self {
            window,
            anchor_bar,
            toggle,
            label,
            options,
            sections,
        }
    }
}

/// Returns the label's text wrapper, creating it around the current text if
/// the markup does not have one yet.
pub fn label_wrapper(
    document: &Document,
    label: &Element,
    initial_text: &str,
) -> Result<HtmlElement, SetupError> {
    if let Some(existing) = query(label, &format!(".{}", LABEL_WRAPPER)) {
        return existing
            .dyn_into::<HtmlElement>()
            .map_err(|_| SetupError::NotHtml(LABEL_WRAPPER.to_string()));
    }

    let wrapper = document
        .create_element("span")
        .map_err(|_| SetupError::MissingElement(LABEL_WRAPPER.to_string()))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| SetupError::NotHtml(LABEL_WRAPPER.to_string()))?;
    wrapper.set_class_name(LABEL_WRAPPER);
    wrapper.set_text_content(Some(initial_text));
    label.set_text_content(None);
    label
        .append_child(&wrapper)
        .map_err(|_| SetupError::MissingElement(LABEL_WRAPPER.to_string()))?;
    Ok(wrapper)
}

impl LabelView for DomNavView {
    fn set_label_text(&mut self, text: &str) {
        self.label.set_text_content(Some(text));
    }

    fn set_label_slide(&mut self, slide: Option<Slide>) {
        let classes = self.label.class_list();
        for class in Slide::ALL {
            let _ = classes.remove_1(class.class());
        }
        if let Some(slide) = slide {
            let _ = classes.add_1(slide.class());
        }
    }

    fn flush_label_layout(&mut self) {
        let _ = self.label.offset_width();
    }
}

impl NavView for DomNavView {
    fn section_top(&self, section: usize) -> f64 {
        self.sections
            .get(section)
            .map_or(0.0, |s| s.offset_top() as f64)
    }

    fn set_expanded(&mut self, expanded: bool) {
        toggle_class(&self.anchor_bar, EXPANDED, expanded);
    }

    fn set_toggle_label(&mut self, label: &str) {
        let _ = self.toggle.set_attribute("aria-label", label);
    }

    fn set_option_active(&mut self, option: usize, active: bool) {
        if let Some(el) = self.options.get(option) {
            toggle_class(el, ACTIVE, active);
        }
    }

    fn set_option_opacity(&mut self, option: usize, opacity: f64) {
        if let Some(el) = self.options.get(option) {
            let _ = el.style().set_property("opacity", &opacity.to_string());
        }
    }

    fn smooth_scroll_to(&mut self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}
