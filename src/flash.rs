//! Dismissible flash banners, both the ones rendered by the server and the
//! ones created at runtime through `showFlashMessage`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlElement};

use crate::config::{PageConfig, Timings};
use crate::dom;

pub const DEFAULT_CATEGORY: &str = "success";
pub const EXIT_ANIMATION: &str = "slideOut 0.3s ease forwards";

thread_local! {
    // Timings used by banners created after start-up
    static TIMINGS: Cell<Timings> = Cell::new(Timings::default());
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BannerPhase {
    #[default]
    Visible,
    Exiting,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    StartExit,
    Ignore,
}

/// Visible -> Exiting -> Removed. Only the first dismissal starts the exit and
/// only the exit timer of that dismissal may remove the banner.
#[derive(Debug, Default)]
pub struct BannerLifecycle {
    phase: BannerPhase,
}

impl BannerLifecycle {
    pub fn phase(&self) -> BannerPhase {
        self.phase
    }

    pub fn dismiss(&mut self) -> Dismissal {
        match self.phase {
            BannerPhase::Visible => {
                self.phase = BannerPhase::Exiting;
                Dismissal::StartExit
            }
            BannerPhase::Exiting | BannerPhase::Removed => Dismissal::Ignore,
        }
    }

    /// Returns true exactly once, when the exit animation has played out.
    pub fn finish_exit(&mut self) -> bool {
        if self.phase == BannerPhase::Exiting {
            self.phase = BannerPhase::Removed;
            true
        } else {
            false
        }
    }

    /// Something else took the banner off the page.
    pub fn detached(&mut self) {
        self.phase = BannerPhase::Removed;
    }
}

pub fn banner_class(category: &str) -> String {
    let category = category.trim();
    let category = if category.is_empty() { DEFAULT_CATEGORY } else { category };
    format!("flash-message flash-{}", category)
}

/// Close listener and auto-dismiss timer, dropped once the banner is gone.
#[derive(Default)]
struct BannerHandles {
    close: Option<(HtmlElement, Closure<dyn FnMut(Event)>)>,
    auto_dismiss: Option<Timeout>,
}

#[derive(Clone)]
pub struct FlashBanner {
    element: HtmlElement,
    lifecycle: Rc<RefCell<BannerLifecycle>>,
    handles: Rc<RefCell<BannerHandles>>,
    exit_ms: u32,
}

impl FlashBanner {
    pub fn new(element: HtmlElement, timings: &Timings) -> Self {
        Self {
            element,
            lifecycle: Rc::new(RefCell::new(BannerLifecycle::default())),
            handles: Rc::new(RefCell::new(BannerHandles::default())),
            exit_ms: timings.flash_exit_ms,
        }
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    pub fn phase(&self) -> BannerPhase {
        self.lifecycle.borrow().phase()
    }

    /// Starts the exit animation and schedules removal. Safe to call any
    /// number of times from any trigger.
    pub fn dismiss(&self) {
        if !self.element.is_connected() {
            if self.phase() != BannerPhase::Removed {
                self.lifecycle.borrow_mut().detached();
                self.release_later();
            }
            return;
        }
        if self.lifecycle.borrow_mut().dismiss() == Dismissal::Ignore {
            return;
        }

        let _ = self.element.style().set_property("animation", EXIT_ANIMATION);
        let banner = self.clone();
        Timeout::new(self.exit_ms, move || banner.finish()).forget();
    }

    fn finish(&self) {
        if !self.lifecycle.borrow_mut().finish_exit() {
            return;
        }
        if self.element.is_connected() {
            self.element.remove();
        }
        self.release();
    }

    /// True once the close listener and auto-dismiss timer have been dropped.
    pub fn is_released(&self) -> bool {
        let handles = self.handles.borrow();
        handles.close.is_none() && handles.auto_dismiss.is_none()
    }

    /// Unhooks the close button and drops both closures. Must not run inside
    /// either of them.
    fn release(&self) {
        let handles = self.handles.take();
        if let Some((button, listener)) = &handles.close {
            let _ = button.remove_event_listener_with_callback("click", listener.as_ref().unchecked_ref());
        }
    }

    fn release_later(&self) {
        let banner = self.clone();
        Timeout::new(0, move || banner.release()).forget();
    }

    /// Hooks up the close button (if any) and the auto-dismiss timer.
    fn arm(&self, close_button: Option<HtmlElement>, auto_dismiss_ms: u32) -> Result<(), JsValue> {
        if let Some(button) = close_button {
            let banner = self.clone();
            let listener = Closure::wrap(Box::new(move |_: Event| banner.dismiss()) as Box<dyn FnMut(Event)>);
            button.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
            self.handles.borrow_mut().close = Some((button, listener));
        }

        let banner = self.clone();
        let timer = Timeout::new(auto_dismiss_ms, move || banner.dismiss());
        self.handles.borrow_mut().auto_dismiss = Some(timer);
        Ok(())
    }
}

/// Wires every banner already present in the page.
pub fn setup_flash_messages(document: &Document, config: &PageConfig) -> Result<(), JsValue> {
    TIMINGS.with(|timings| timings.set(config.timings));

    let messages = dom::query_all(document, &config.selectors.flash_message)?;
    let count = messages.len();
    for message in messages {
        let Ok(element) = message.dyn_into::<HtmlElement>() else {
            continue;
        };
        let close_button = element
            .query_selector(&config.selectors.flash_close)?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        FlashBanner::new(element, &config.timings)
            .arm(close_button, config.timings.flash_auto_dismiss_ms)?;
    }

    debug!("Wired {} flash messages", count);
    Ok(())
}

/// Builds a banner, appends it to `<body>` and wires it like a server-rendered one.
pub fn show(document: &Document, message: &str, category: &str) -> Result<FlashBanner, JsValue> {
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    let timings = TIMINGS.with(Cell::get);

    let element: HtmlElement = document.create_element("div")?.dyn_into()?;
    element.set_class_name(&banner_class(category));
    element.append_child(&document.create_text_node(message))?;

    let close_button: HtmlElement = document.create_element("button")?.dyn_into()?;
    close_button.set_class_name("flash-close");
    close_button.set_text_content(Some("\u{00d7}"));
    element.append_child(&close_button)?;

    body.append_child(&element)?;

    let banner = FlashBanner::new(element, &timings);
    banner.arm(Some(close_button), timings.flash_auto_dismiss_ms)?;
    Ok(banner)
}

/// Shows a flash banner from page scripts. `category` defaults to "success".
#[wasm_bindgen(js_name = showFlashMessage)]
pub fn show_flash_message(message: &str, category: Option<String>) -> Result<(), JsValue> {
    let document = dom::document()?;
    let category = category.as_deref().unwrap_or(DEFAULT_CATEGORY);
    show(&document, message, category)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_then_timeout_removes_once() {
        let mut banner = BannerLifecycle::default();
        assert_eq!(banner.dismiss(), Dismissal::StartExit);
        // auto-dismiss fires while the exit animation is still running
        assert_eq!(banner.dismiss(), Dismissal::Ignore);
        assert!(banner.finish_exit());
        assert!(!banner.finish_exit());
        assert_eq!(banner.phase(), BannerPhase::Removed);
    }

    #[test]
    fn dismiss_after_removal_is_a_no_op() {
        let mut banner = BannerLifecycle::default();
        banner.dismiss();
        banner.finish_exit();
        assert_eq!(banner.dismiss(), Dismissal::Ignore);
        assert!(!banner.finish_exit());
    }

    #[test]
    fn finish_without_dismiss_does_nothing() {
        let mut banner = BannerLifecycle::default();
        assert!(!banner.finish_exit());
        assert_eq!(banner.phase(), BannerPhase::Visible);
    }

    #[test]
    fn detached_banner_never_exits() {
        let mut banner = BannerLifecycle::default();
        banner.detached();
        assert_eq!(banner.dismiss(), Dismissal::Ignore);
        assert!(!banner.finish_exit());
    }

    #[test]
    fn class_carries_category() {
        assert_eq!(banner_class("error"), "flash-message flash-error");
        assert_eq!(banner_class(""), "flash-message flash-success");
        assert_eq!(banner_class("  warning "), "flash-message flash-warning");
    }
}
