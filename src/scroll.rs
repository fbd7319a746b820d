//! Scroll-driven behaviour: the active nav link and the navbar background.

use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

use crate::config::PageConfig;
use crate::dom;
use crate::nav::{navbar_height, ACTIVE_CLASS};

#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

/// The section whose link should be highlighted, if any. Sections are
/// checked in document order and a later match overrides an earlier one.
pub fn active_section(
    scroll_y: f64,
    nav_height: f64,
    buffer: f64,
    sections: &[SectionBounds],
) -> Option<&SectionBounds> {
    let position = scroll_y + nav_height + buffer;
    sections.iter().rev().find(|section| section.contains(position))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarStyle {
    Light,
    Solid,
}

impl NavbarStyle {
    pub fn for_scroll(scroll_top: f64, solid_after: f64) -> Self {
        if scroll_top > solid_after {
            NavbarStyle::Solid
        } else {
            NavbarStyle::Light
        }
    }

    pub fn properties(self) -> [(&'static str, &'static str); 4] {
        let (background, border) = match self {
            NavbarStyle::Solid => ("rgba(10, 10, 15, 0.98)", "1px solid var(--border-color)"),
            NavbarStyle::Light => ("rgba(10, 10, 15, 0.95)", "1px solid var(--border-light)"),
        };
        [
            ("transform", "translateY(0)"),
            ("background", background),
            ("backdrop-filter", "blur(20px)"),
            ("border-bottom", border),
        ]
    }
}

fn section_bounds(sections: &[HtmlElement]) -> Vec<SectionBounds> {
    sections
        .iter()
        .map(|section| SectionBounds {
            id: section.id(),
            top: section.offset_top() as f64,
            height: section.offset_height() as f64,
        })
        .collect()
}

/// Marks the nav link for the section under the navbar. Leaves the current
/// highlight alone when no section matches.
pub fn update_active_link(
    window: &Window,
    document: &Document,
    sections: &[HtmlElement],
    nav_links: &[Element],
    config: &PageConfig,
) -> Result<(), JsValue> {
    let bounds = section_bounds(sections);
    let Some(active) = active_section(
        window.scroll_y()?,
        navbar_height(document, config),
        config.offsets.active_section_buffer_px,
        &bounds,
    ) else {
        return Ok(());
    };

    for link in nav_links {
        link.class_list().remove_1(ACTIVE_CLASS)?;
    }
    let selector = format!("a[href=\"#{}\"]", active.id);
    if let Some(link) = document.query_selector(&selector)? {
        link.class_list().add_1(ACTIVE_CLASS)?;
    }
    Ok(())
}

pub fn setup_active_links(document: &Document, config: &PageConfig) -> Result<(), JsValue> {
    let window = dom::window()?;
    let sections: Vec<HtmlElement> = dom::query_all(document, &config.selectors.section)?
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();
    let nav_links = dom::query_all(document, &config.selectors.nav_link)?;
    debug!("Tracking {} sections for nav highlighting", sections.len());

    let config = config.clone();
    let document = document.clone();
    let window_for_scroll = window.clone();
    dom::listen(&window, "scroll", move |_| {
        let _ = update_active_link(&window_for_scroll, &document, &sections, &nav_links, &config);
    })
}

fn scroll_top(window: &Window, document: &Document) -> f64 {
    window
        .page_y_offset()
        .ok()
        .filter(|offset| *offset != 0.0)
        .or_else(|| document.document_element().map(|root| root.scroll_top() as f64))
        .unwrap_or(0.0)
}

pub fn apply_navbar_style(navbar: &HtmlElement, style: NavbarStyle) -> Result<(), JsValue> {
    dom::set_styles(navbar, &style.properties())
}

/// Keeps the navbar pinned and switches to the solid background once the
/// page has scrolled past the configured threshold.
pub fn setup_navbar_effect(document: &Document, config: &PageConfig) -> Result<(), JsValue> {
    let Some(navbar) = dom::html_by_selector(document, &config.selectors.navbar) else {
        debug!("No navbar, scroll effect not wired");
        return Ok(());
    };
    let window = dom::window()?;
    let solid_after = config.offsets.navbar_solid_after_px;

    let document = document.clone();
    let window_for_scroll = window.clone();
    dom::listen(&window, "scroll", move |_| {
        let style = NavbarStyle::for_scroll(scroll_top(&window_for_scroll, &document), solid_after);
        let _ = apply_navbar_style(&navbar, style);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<SectionBounds> {
        vec![
            SectionBounds { id: "home".into(), top: 0.0, height: 600.0 },
            SectionBounds { id: "about".into(), top: 600.0, height: 400.0 },
            SectionBounds { id: "projects".into(), top: 1000.0, height: 800.0 },
        ]
    }

    #[test]
    fn picks_section_under_navbar() {
        let sections = sections();
        let active = active_section(0.0, 70.0, 30.0, &sections).unwrap();
        assert_eq!(active.id, "home");

        // 500 + 70 + 30 = 600 lands on the first pixel of "about"
        let active = active_section(500.0, 70.0, 30.0, &sections).unwrap();
        assert_eq!(active.id, "about");

        let active = active_section(499.0, 70.0, 30.0, &sections).unwrap();
        assert_eq!(active.id, "home");
    }

    #[test]
    fn no_match_past_last_section() {
        assert_eq!(active_section(5_000.0, 70.0, 30.0, &sections()), None);
    }

    #[test]
    fn recomputing_is_idempotent() {
        let sections = sections();
        let first = active_section(1_234.0, 70.0, 30.0, &sections).cloned();
        let second = active_section(1_234.0, 70.0, 30.0, &sections).cloned();
        assert_eq!(first, second);
        assert_eq!(first.unwrap().id, "projects");
    }

    #[test]
    fn later_overlapping_section_wins() {
        let sections = vec![
            SectionBounds { id: "outer".into(), top: 0.0, height: 2_000.0 },
            SectionBounds { id: "inner".into(), top: 100.0, height: 200.0 },
        ];
        assert_eq!(active_section(100.0, 70.0, 30.0, &sections).unwrap().id, "inner");
        assert_eq!(active_section(500.0, 70.0, 30.0, &sections).unwrap().id, "outer");
    }

    #[test]
    fn navbar_boundary_is_light() {
        assert_eq!(NavbarStyle::for_scroll(0.0, 50.0), NavbarStyle::Light);
        assert_eq!(NavbarStyle::for_scroll(50.0, 50.0), NavbarStyle::Light);
        assert_eq!(NavbarStyle::for_scroll(51.0, 50.0), NavbarStyle::Solid);
    }

    #[test]
    fn navbar_is_always_pinned() {
        for style in [NavbarStyle::Light, NavbarStyle::Solid] {
            assert!(style.properties().contains(&("transform", "translateY(0)")));
            assert!(style.properties().contains(&("backdrop-filter", "blur(20px)")));
        }
        assert!(NavbarStyle::Solid
            .properties()
            .contains(&("border-bottom", "1px solid var(--border-color)")));
        assert!(NavbarStyle::Light
            .properties()
            .contains(&("background", "rgba(10, 10, 15, 0.95)")));
    }
}
