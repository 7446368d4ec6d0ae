use crate::anchor_nav::navigator::{AnchorNavigator, NavOption, NavTimer};
use crate::config::PageConfig;
use crate::dom::{
    html_by_id, label_wrapper, page_offset, query, query_all_html, query_document, DomLayout,
    DomNavView, DomStickyView, Listener,
};
use crate::error::SetupError;
use crate::sticky_cta::StickyCta;
use crate::timers::{BrowserScheduler, Debounced, TimerSlots};
use log::{debug, info, warn};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, Window};

/// Scroll-driven behaviours bound to the rendered page. Dropping this removes
/// every listener and cancels every pending timer.
pub struct Behaviors {
    _sticky: Option<StickyBinding>,
    _anchor: Option<AnchorBinding>,
}

impl Behaviors {
    /// Binds each controller independently; one failing to find its elements
    /// does not stop the other.
    pub fn install(config: &PageConfig) -> Result<Self, SetupError> {
        let window = web_sys::window().ok_or(SetupError::NoWindow)?;
        let document = window.document().ok_or(SetupError::NoDocument)?;
        let layout = DomLayout::new(window.clone(), &document);

        let sticky_layout = layout.clone();
        let (sticky, anchor) = bind_each(
            || StickyBinding::bind(&window, &document, sticky_layout, config),
            || AnchorBinding::bind(&window, &document, layout, config),
        );

        info!(
            "Card page behaviours installed (sticky CTA: {}, anchor link: {})",
            sticky.is_some(),
            anchor.is_some()
        );
        Ok(Self {
            _sticky: sticky,
            _anchor: anchor,
        })
    }
}

/// Runs both binders and keeps whichever succeeded. A failure is logged and
/// never stops the other binder from running.
fn bind_each<S, A>(
    sticky: impl FnOnce() -> Result<S, SetupError>,
    anchor: impl FnOnce() -> Result<A, SetupError>,
) -> (Option<S>, Option<A>) {
    let sticky = sticky()
        .map_err(|e| warn!("Sticky CTA elements not found: {}", e))
        .ok();
    let anchor = anchor()
        .map_err(|e| warn!("Anchor link elements not found: {}", e))
        .ok();
    (sticky, anchor)
}

struct StickyHost {
    cta: StickyCta,
    layout: DomLayout,
    view: DomStickyView,
}

impl StickyHost {
    fn sample(&mut self) {
        self.cta.sample(&self.layout, &mut self.view);
    }
}

struct StickyBinding {
    _scroll: Listener,
}

impl StickyBinding {
    fn bind(
        window: &Window,
        document: &Document,
        layout: DomLayout,
        config: &PageConfig,
    ) -> Result<Self, SetupError> {
        let host = Rc::new(RefCell::new(StickyHost {
            cta: StickyCta::new(),
            layout,
            view: DomStickyView::find(window.clone(), document)?,
        }));

        // Correct state for pages restored mid-scroll.
        host.borrow_mut().sample();

        let debounced = Debounced::new(
            BrowserScheduler,
            config.timing.scroll_debounce_ms,
            move || {
                if let Ok(mut host) = host.try_borrow_mut() {
                    host.sample();
                }
            },
        );
        let scroll = Listener::passive(window, "scroll", move |_| debounced.call())?;

        Ok(Self { _scroll: scroll })
    }
}

struct NavHost {
    nav: AnchorNavigator,
    layout: DomLayout,
    view: DomNavView,
    timers: TimerSlots<NavTimer, BrowserScheduler>,
}

impl NavHost {
    fn on_scroll(&mut self) {
        let Self {
            nav,
            layout,
            view,
            timers,
        } = self;
        nav.on_scroll(layout, view, timers);
    }

    fn toggle(&mut self) {
        let Self {
            nav,
            layout,
            view,
            timers,
        } = self;
        nav.toggle(layout, view, timers);
    }

    fn select(&mut self, option: usize) {
        let Self {
            nav,
            layout,
            view,
            timers,
        } = self;
        if nav.select(option, layout, view, timers) {
            debug!(
                "Manual navigation to {:?}",
                nav.state().last_active_section_id
            );
        } else {
            debug!("Anchor option {} has no target section", option);
        }
    }

    fn on_timer(&mut self, timer: NavTimer) {
        let Self {
            nav,
            layout,
            view,
            timers,
        } = self;
        nav.on_timer(timer, layout, view, timers);
    }
}

/// Runs `f` unless the host is already mid-update.
fn with_host(host: &RefCell<NavHost>, f: impl FnOnce(&mut NavHost)) {
    match host.try_borrow_mut() {
        Ok(mut host) => f(&mut host),
        Err(_) => debug!("Anchor navigator busy, dropping event"),
    }
}

fn upgrade_and(host: &Weak<RefCell<NavHost>>, f: impl FnOnce(&mut NavHost)) {
    if let Some(host) = host.upgrade() {
        with_host(&host, f);
    }
}

fn event_element(event: &Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}

fn option_text(option: &HtmlElement) -> String {
    query(option, ".anchor-link-text")
        .and_then(|text| text.text_content())
        .or_else(|| option.text_content())
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn option_section_id(option: &HtmlElement) -> Option<String> {
    option
        .get_attribute("href")
        .and_then(|href| href.strip_prefix('#').map(str::to_string))
        .or_else(|| option.get_attribute("data-section"))
        .filter(|id| !id.is_empty())
}

struct AnchorBinding {
    host: Rc<RefCell<NavHost>>,
    _listeners: Vec<Listener>,
}

impl Drop for AnchorBinding {
    fn drop(&mut self) {
        if let Ok(mut host) = self.host.try_borrow_mut() {
            host.timers.cancel_all();
        }
    }
}

impl AnchorBinding {
    fn bind(
        window: &Window,
        document: &Document,
        layout: DomLayout,
        config: &PageConfig,
    ) -> Result<Self, SetupError> {
        let anchor_bar = html_by_id(document, "anchorLinkMobile")?;
        let toggle = html_by_id(document, "anchorLinkToggle")?;
        let current = html_by_id(document, "anchorLinkCurrent")?;
        let wrapper = query_document(document, ".anchor-link-wrapper").ok();
        let option_elements = query_all_html(document, ".anchor-link-option");

        let mut section_ids = Vec::new();
        let mut section_elements = Vec::new();
        for id in &config.sections {
            match html_by_id(document, id) {
                Ok(el) => {
                    section_ids.push(id.clone());
                    section_elements.push(el);
                }
                Err(_) => debug!("Section #{} not on page, skipping", id),
            }
        }

        let options: Vec<NavOption> = option_elements
            .iter()
            .map(|el| NavOption::new(option_section_id(el).unwrap_or_default(), option_text(el)))
            .collect();

        let initial_label = current
            .text_content()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .or_else(|| options.first().map(|o| o.display_text.clone()))
            .unwrap_or_else(|| config.default_label.clone());
        let label = label_wrapper(document, &current, &initial_label)?;

        let view = DomNavView::new(
            window.clone(),
            anchor_bar,
            toggle.clone().into(),
            label,
            option_elements.clone(),
            section_elements,
        );
        let nav = AnchorNavigator::new(
            config.clone(),
            section_ids,
            options,
            initial_label,
            page_offset(window),
        );

        let host = Rc::new_cyclic(|weak: &Weak<RefCell<NavHost>>| {
            let weak = weak.clone();
            let timers = TimerSlots::new(BrowserScheduler, move |timer| {
                upgrade_and(&weak, |host| host.on_timer(timer));
            });
            RefCell::new(NavHost {
                nav,
                layout,
                view,
                timers,
            })
        });

        host.borrow_mut().on_scroll();

        let mut listeners = Vec::new();

        let scroll_host = Rc::downgrade(&host);
        let debounced = Debounced::new(
            BrowserScheduler,
            config.timing.scroll_debounce_ms,
            move || upgrade_and(&scroll_host, NavHost::on_scroll),
        );
        listeners.push(Listener::passive(window, "scroll", move |_| debounced.call())?);

        let end_host = Rc::downgrade(&host);
        listeners.push(Listener::passive(window, "scrollend", move |_| {
            upgrade_and(&end_host, |host| host.nav.on_scroll_end(&mut host.timers));
        })?);

        let toggle_host = Rc::downgrade(&host);
        listeners.push(Listener::new(&toggle, "click", move |event| {
            event.prevent_default();
            // The wrapper would toggle a second time.
            event.stop_propagation();
            upgrade_and(&toggle_host, NavHost::toggle);
        })?);

        if let Some(wrapper) = wrapper {
            let wrapper_host = Rc::downgrade(&host);
            listeners.push(Listener::new(&wrapper, "click", move |event| {
                let on_option = event_element(&event)
                    .and_then(|el| el.closest(".anchor-link-option").ok().flatten())
                    .is_some();
                if !on_option {
                    event.prevent_default();
                    upgrade_and(&wrapper_host, NavHost::toggle);
                }
            })?);
        }

        for (index, option) in option_elements.iter().enumerate() {
            let option_host = Rc::downgrade(&host);
            listeners.push(Listener::new(option, "click", move |event| {
                event.prevent_default();
                event.stop_propagation();
                upgrade_and(&option_host, |host| host.select(index));
            })?);
        }

        Ok(Self {
            host,
            _listeners: listeners,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn failed_sticky_binding_still_binds_anchor() {
        let anchor_ran = Cell::new(false);
        let (sticky, anchor) = bind_each(
            || Err::<(), _>(SetupError::MissingElement(".btn-apply".into())),
            || {
                anchor_ran.set(true);
                Ok("anchor")
            },
        );

        assert!(anchor_ran.get());
        assert_eq!(sticky, None);
        assert_eq!(anchor, Some("anchor"));
    }

    #[test]
    fn failed_anchor_binding_keeps_sticky() {
        let (sticky, anchor) = bind_each(
            || Ok(1),
            || Err::<(), _>(SetupError::MissingElement("#anchorLinkToggle".into())),
        );

        assert_eq!(sticky, Some(1));
        assert_eq!(anchor, None);
    }

    #[test]
    fn both_bindings_can_fail_independently() {
        let (sticky, anchor) = bind_each(
            || Err::<(), _>(SetupError::NoDocument),
            || Err::<(), _>(SetupError::Listener { event: "scroll" }),
        );

        assert!(sticky.is_none() && anchor.is_none());
    }
}
