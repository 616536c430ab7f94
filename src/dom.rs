//! Thin wrappers over the browser APIs the page uses.
//!
//! Everything that can fail returns `SiteError`; callers decide whether the
//! failure just disables their feature.

use gloo_utils::{document, window};
use log::{debug, warn};
use std::fmt;
use tarteel_landing::config::{IN_APP_QUERY_KEY, NAVBAR_FALLBACK_HEIGHT_PX};
use tarteel_landing::effects::{
    anchor_target, document_loaded, in_viewport, section_scroll_top, AnchorTarget,
};
use tarteel_landing::in_app::{self, BrowserAction};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, EventTarget, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollToOptions, Url,
};

#[derive(Debug)]
pub enum SiteError {
    /// An element the feature needs is not on the page.
    MissingElement(&'static str),
    /// A browser API call threw.
    Js(String),
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteError::MissingElement(what) => write!(f, "{} not found", what),
            SiteError::Js(msg) => write!(f, "browser call failed: {}", msg),
        }
    }
}

impl std::error::Error for SiteError {}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        SiteError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

/// Log a feature's init result. Missing elements only disable the feature.
pub fn report<T>(feature: &str, result: Result<T, SiteError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(SiteError::MissingElement(what)) => {
            debug!("{} disabled: {} not found", feature, what);
            None
        }
        Err(err) => {
            warn!("{} failed: {}", feature, err);
            None
        }
    }
}

/// Registered DOM listener, removed again on drop.
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, SiteError> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// IntersectionObserver that calls back once per element entering the viewport.
pub struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl RevealObserver {
    pub fn observe(
        element: &Element,
        threshold: f64,
        mut on_visible: impl FnMut() + 'static,
    ) -> Result<Self, SiteError> {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        on_visible();
                        observer.unobserve(&entry.target());
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_root_margin("0px");
        options.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        observer.observe(element);

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

pub fn scroll_y() -> f64 {
    window().scroll_y().unwrap_or(0.0)
}

pub fn page_hidden() -> bool {
    document().hidden()
}

pub fn viewport_height() -> f64 {
    window()
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

pub fn element_in_viewport(element: &Element) -> bool {
    let rect = element.get_bounding_client_rect();
    in_viewport(rect.top(), rect.bottom(), viewport_height())
}

pub fn set_style(element: &Element, property: &str, value: &str) -> Result<(), SiteError> {
    let element = element
        .dyn_ref::<HtmlElement>()
        .ok_or(SiteError::MissingElement("html element"))?;
    element.style().set_property(property, value)?;
    Ok(())
}

/// Lock page scrolling while the mobile menu is open.
pub fn set_body_scroll_locked(locked: bool) -> Result<(), SiteError> {
    let body = document().body().ok_or(SiteError::MissingElement("body"))?;
    body.style()
        .set_property("overflow", if locked { "hidden" } else { "" })?;
    Ok(())
}

pub fn add_body_class(class: &str) -> Result<(), SiteError> {
    let body = document().body().ok_or(SiteError::MissingElement("body"))?;
    body.class_list().add_1(class)?;
    Ok(())
}

/// Run `f` on the next animation frame.
pub fn next_frame(f: impl FnOnce() + 'static) -> Result<(), SiteError> {
    let callback = Closure::once_into_js(f);
    window().request_animation_frame(callback.unchecked_ref())?;
    Ok(())
}

fn navbar_height() -> f64 {
    document()
        .query_selector(".navbar")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|el| f64::from(el.offset_height()))
        .unwrap_or(NAVBAR_FALLBACK_HEIGHT_PX)
}

fn smooth_scroll_to(top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window().scroll_to_with_scroll_to_options(&options);
}

/// Smooth-scroll for same-page links. Leaves the default navigation alone
/// when the link is not an anchor or its target does not exist.
pub fn handle_anchor_click(event: &Event) {
    let href = event
        .current_target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.get_attribute("href"));
    let Some(target) = href.as_deref().and_then(anchor_target) else {
        return;
    };

    match target {
        AnchorTarget::Top => {
            event.prevent_default();
            smooth_scroll_to(0.0);
        }
        AnchorTarget::Section(id) => {
            if let Some(section) = document().get_element_by_id(&id) {
                event.prevent_default();
                let top = section_scroll_top(
                    section.get_bounding_client_rect().top(),
                    window().page_y_offset().unwrap_or(0.0),
                    navbar_height(),
                );
                smooth_scroll_to(top);
            }
        }
    }
}

fn user_agent() -> String {
    let navigator = window().navigator();
    let vendor = js_sys::Reflect::get(&navigator, &JsValue::from_str("vendor"))
        .ok()
        .and_then(|v| v.as_string());
    in_app::browser_identity(navigator.user_agent().ok(), vendor)
}

/// Wait for the window `load` event, or run `f` now if it already fired.
/// The returned listener must be kept alive until then.
pub fn on_window_load(f: impl FnOnce() + 'static) -> Result<Option<EventListener>, SiteError> {
    if document_loaded(&document().ready_state()) {
        f();
        return Ok(None);
    }
    let mut f = Some(f);
    let listener = EventListener::new(&window().into(), "load", move |_| {
        if let Some(f) = f.take() {
            f();
        }
    })?;
    Ok(Some(listener))
}

fn current_url() -> Result<Url, SiteError> {
    let href = window().location().href()?;
    Ok(Url::new(&href)?)
}

/// Inspect the browser and apply the tagging / redirect side effects.
/// Returns whether the "open in browser" toast should be shown.
pub fn apply_browser_workaround() -> Result<bool, SiteError> {
    let url = current_url()?;
    let from = url.search_params().get(IN_APP_QUERY_KEY);

    match in_app::decide(&user_agent(), from.as_deref()) {
        BrowserAction::ShowToast { tag_url } => {
            debug!("In-app browser detected");
            if tag_url {
                let (key, value) = in_app::tag();
                url.search_params().set(key, value);
                window().history()?.replace_state_with_url(
                    &js_sys::Object::new(),
                    "",
                    Some(&url.href()),
                )?;
            }
            Ok(true)
        }
        BrowserAction::RedirectToStore(store) => {
            debug!("Opened from the in-app browser, redirecting to the App Store");
            window().location().set_href(store)?;
            Ok(false)
        }
        BrowserAction::Nothing => Ok(false),
    }
}
