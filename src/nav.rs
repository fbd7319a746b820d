//! Mobile menu toggling and smooth scrolling for same-page anchors.

use std::rc::Rc;

use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::config::PageConfig;
use crate::dom;

pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn toggled(self) -> Self {
        match self {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }

    /// Inline styles for the three hamburger bars: an X when open, three lines
    /// when closed.
    pub fn bar_styles(self) -> [(&'static str, &'static str); 3] {
        match self {
            MenuState::Open => [
                ("transform", "rotate(-45deg) translate(-5px, 6px)"),
                ("opacity", "0"),
                ("transform", "rotate(45deg) translate(-5px, -6px)"),
            ],
            MenuState::Closed => [
                ("transform", "none"),
                ("opacity", "1"),
                ("transform", "none"),
            ],
        }
    }
}

/// Id of the element a same-page link points at. Bare `#` and anything that
/// isn't a fragment yields `None`.
pub fn anchor_target_id(href: &str) -> Option<String> {
    let fragment = href.strip_prefix('#')?;
    if fragment.is_empty() {
        return None;
    }
    let id = urlencoding::decode(fragment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| fragment.to_string());
    Some(id)
}

/// Scroll offset that puts `target_top` just below the fixed navbar.
pub fn anchor_scroll_top(target_top: f64, nav_height: f64, buffer: f64) -> f64 {
    (target_top - nav_height - buffer).max(0.0)
}

/// Height of the fixed navbar, or the configured fallback when it's missing.
pub fn navbar_height(document: &Document, config: &PageConfig) -> f64 {
    dom::html_by_selector(document, &config.selectors.navbar)
        .map(|navbar| navbar.offset_height() as f64)
        .unwrap_or(config.offsets.default_nav_height_px)
}

/// The hamburger button together with the menu it controls.
#[derive(Clone)]
pub struct MobileMenu {
    button: Element,
    menu: Element,
    bar_selector: String,
}

impl MobileMenu {
    pub fn find(document: &Document, config: &PageConfig) -> Option<Self> {
        let button = document.get_element_by_id(&config.selectors.hamburger_id)?;
        let menu = document.get_element_by_id(&config.selectors.nav_menu_id)?;
        Some(Self {
            button,
            menu,
            bar_selector: config.selectors.bar.clone(),
        })
    }

    /// The class list on the menu is the source of truth.
    pub fn state(&self) -> MenuState {
        if self.menu.class_list().contains(ACTIVE_CLASS) {
            MenuState::Open
        } else {
            MenuState::Closed
        }
    }

    pub fn toggle(&self) -> Result<MenuState, JsValue> {
        let next = self.state().toggled();
        self.apply(next)?;
        Ok(next)
    }

    pub fn close(&self) -> Result<(), JsValue> {
        self.apply(MenuState::Closed)
    }

    fn apply(&self, state: MenuState) -> Result<(), JsValue> {
        if state.is_open() {
            self.menu.class_list().add_1(ACTIVE_CLASS)?;
        } else {
            self.menu.class_list().remove_1(ACTIVE_CLASS)?;
        }

        let bars = dom::query_all(&self.button, &self.bar_selector)?;
        for (bar, (property, value)) in bars.iter().zip(state.bar_styles()) {
            if let Some(bar) = bar.dyn_ref::<HtmlElement>() {
                bar.style().set_property(property, value)?;
            }
        }
        Ok(())
    }
}

/// Wires the hamburger toggle and closes the menu whenever one of its links
/// is clicked.
pub fn setup_mobile_menu(document: &Document, config: &PageConfig) -> Result<(), JsValue> {
    let Some(menu) = MobileMenu::find(document, config) else {
        debug!("Hamburger or nav menu missing, mobile menu not wired");
        return Ok(());
    };

    {
        let menu_for_toggle = menu.clone();
        dom::listen(&menu.button, "click", move |_| {
            if let Ok(state) = menu_for_toggle.toggle() {
                debug!("Mobile menu is now {:?}", state);
            }
        })?;
    }

    for link in dom::query_all(&menu.menu, &config.selectors.nav_link)? {
        let menu = menu.clone();
        dom::listen(&link, "click", move |_| {
            let _ = menu.close();
        })?;
    }

    debug!("Mobile menu wired");
    Ok(())
}

/// Replaces jump navigation on `#fragment` links with a smooth scroll that
/// clears the fixed navbar.
pub fn setup_smooth_scroll(document: &Document, config: &PageConfig) -> Result<(), JsValue> {
    let config = Rc::new(config.clone());
    let menu = MobileMenu::find(document, &config);
    let links = dom::query_all(document, &config.selectors.anchor_link)?;
    let count = links.len();

    for link in links {
        let config = config.clone();
        let menu = menu.clone();
        let document = document.clone();
        let href_source = link.clone();
        dom::listen(&link, "click", move |event| {
            let href = href_source.get_attribute("href").unwrap_or_default();
            let Some(id) = anchor_target_id(&href) else {
                return;
            };
            event.prevent_default();

            let Some(target) = dom::html_by_id(&document, &id) else {
                debug!("Anchor target #{} not found", id);
                return;
            };

            let top = anchor_scroll_top(
                target.offset_top() as f64,
                navbar_height(&document, &config),
                config.offsets.anchor_buffer_px,
            );
            if let Ok(window) = dom::window() {
                let options = ScrollToOptions::new();
                options.set_top(top);
                options.set_behavior(ScrollBehavior::Smooth);
                window.scroll_with_scroll_to_options(&options);
            }

            if let Some(menu) = &menu {
                if menu.state().is_open() {
                    let _ = menu.close();
                }
            }
        })?;
    }

    debug!("Smooth scrolling wired on {} anchor links", count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_starts_closed_and_alternates() {
        let mut state = MenuState::default();
        assert_eq!(state, MenuState::Closed);

        for click in 1..=7 {
            state = state.toggled();
            assert_eq!(state.is_open(), click % 2 == 1, "after {} clicks", click);
        }
    }

    #[test]
    fn open_bars_form_an_x() {
        let [top, middle, bottom] = MenuState::Open.bar_styles();
        assert_eq!(top, ("transform", "rotate(-45deg) translate(-5px, 6px)"));
        assert_eq!(middle, ("opacity", "0"));
        assert_eq!(bottom, ("transform", "rotate(45deg) translate(-5px, -6px)"));
    }

    #[test]
    fn closed_bars_are_reset() {
        assert_eq!(
            MenuState::Closed.bar_styles(),
            [("transform", "none"), ("opacity", "1"), ("transform", "none")]
        );
    }

    #[test]
    fn only_real_fragments_are_targets() {
        assert_eq!(anchor_target_id("#about"), Some("about".to_string()));
        assert_eq!(anchor_target_id("#"), None);
        assert_eq!(anchor_target_id(""), None);
        assert_eq!(anchor_target_id("/blog#top"), None);
    }

    #[test]
    fn encoded_fragments_are_decoded() {
        assert_eq!(anchor_target_id("#my%20work"), Some("my work".to_string()));
    }

    #[test]
    fn scroll_top_subtracts_navbar_and_buffer() {
        assert_eq!(anchor_scroll_top(800.0, 70.0, 20.0), 710.0);
        assert_eq!(anchor_scroll_top(90.0, 70.0, 20.0), 0.0);
    }

    #[test]
    fn scroll_top_never_goes_negative() {
        for target in [0.0, 10.0, 50.0, 89.0] {
            assert_eq!(anchor_scroll_top(target, 70.0, 20.0), 0.0);
        }
    }
}
