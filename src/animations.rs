//! Visibility-driven animations: the hero wave and card entrances.

use gloo_timers::callback::Timeout;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::js_sys::Array;
use web_sys::{
    CssStyleDeclaration, Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::config::PageConfig;
use crate::dom;

pub const WAVE_CLASS: &str = "wave-emoji";
pub const ENTRANCE_ANIMATION: &str = "fadeInUp 0.6s ease forwards";

pub const HIDDEN_STYLES: [(&str, &str); 2] = [("opacity", "0"), ("transform", "translateY(20px)")];
pub const SHOWN_STYLES: [(&str, &str); 2] = [("opacity", "1"), ("transform", "translateY(0)")];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: &'static str,
}

pub const WAVE_OBSERVER: ObserverOptions = ObserverOptions {
    threshold: 0.3,
    root_margin: "0px",
};

pub const ENTRANCE_OBSERVER: ObserverOptions = ObserverOptions {
    threshold: 0.1,
    root_margin: "0px 0px -50px 0px",
};

/// Builds an observer that calls `on_visible` with each target that starts
/// intersecting. Targets stay observed.
fn intersection_observer<F>(options: ObserverOptions, mut on_visible: F) -> Result<IntersectionObserver, JsValue>
where
    F: FnMut(Element) + 'static,
{
    let callback = Closure::wrap(Box::new(move |entries: Array, _observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if entry.is_intersecting() {
                on_visible(entry.target());
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(options.root_margin);

    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();
    Ok(observer)
}

/// Adds the wave class and takes it off again after `duration_ms`. Calls may
/// overlap; each schedules its own removal.
pub fn trigger_wave(hero_title: &Element, duration_ms: u32) {
    if hero_title.class_list().add_1(WAVE_CLASS).is_err() {
        return;
    }
    let hero_title = hero_title.clone();
    Timeout::new(duration_ms, move || {
        let _ = hero_title.class_list().remove_1(WAVE_CLASS);
    })
    .forget();
}

pub fn setup_wave(document: &Document, config: &PageConfig) -> Result<(), JsValue> {
    let selectors = &config.selectors;
    let (Some(home), Some(name_text), Some(hero_title)) = (
        document.get_element_by_id(&selectors.home_id),
        document.get_element_by_id(&selectors.name_text_id),
        document.get_element_by_id(&selectors.hero_title_id),
    ) else {
        debug!("Home section, name or hero title missing, wave not wired");
        return Ok(());
    };
    let duration = config.timings.wave_duration_ms;

    {
        let hero_title = hero_title.clone();
        let observer = intersection_observer(WAVE_OBSERVER, move |_| trigger_wave(&hero_title, duration))?;
        observer.observe(&home);
    }

    {
        let hero_title = hero_title.clone();
        Timeout::new(config.timings.wave_initial_delay_ms, move || {
            trigger_wave(&hero_title, duration);
        })
        .forget();
    }

    dom::listen(&name_text, "click", move |_| trigger_wave(&hero_title, duration))?;
    debug!("Wave animation wired");
    Ok(())
}

/// Writes the hidden starting state into `style`. If that fails the shown
/// state is written instead and `false` comes back, meaning the card should
/// not wait for an entrance.
pub fn hide_for_entrance(style: &CssStyleDeclaration) -> bool {
    let hidden = HIDDEN_STYLES
        .iter()
        .try_for_each(|(name, value)| style.set_property(name, value));
    if hidden.is_ok() {
        return true;
    }
    for (name, value) in SHOWN_STYLES {
        let _ = style.set_property(name, value);
    }
    false
}

/// Hides a card until it scrolls into view. Cards that can't be hidden are
/// left visible and never observed.
pub fn prepare_entrance(card: &HtmlElement, observer: &IntersectionObserver) -> bool {
    let hidden = hide_for_entrance(&card.style());
    if hidden {
        observer.observe(card);
    }
    hidden
}

pub fn setup_entrance_animations(document: &Document, config: &PageConfig) -> Result<(), JsValue> {
    let cards: Vec<HtmlElement> = dom::query_all(document, &config.selectors.animated_cards)?
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();
    if cards.is_empty() {
        return Ok(());
    }

    let observer = intersection_observer(ENTRANCE_OBSERVER, |target| {
        if let Some(card) = target.dyn_ref::<HtmlElement>() {
            let _ = card.style().set_property("animation", ENTRANCE_ANIMATION);
        }
    })?;

    let mut observed = 0;
    for card in &cards {
        if prepare_entrance(card, &observer) {
            observed += 1;
        }
    }
    debug!("Observing {} of {} cards for entrance", observed, cards.len());
    Ok(())
}
