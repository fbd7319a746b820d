use log::{warn, Level};
use serde::Deserialize;
use wasm_bindgen::JsValue;
use web_sys::js_sys::Reflect;

/// Name of the optional global object the page can use to override defaults.
pub const GLOBAL_CONFIG_KEY: &str = "portfolioConfig";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Everything the behaviours need to know about the host page.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct PageConfig {
    pub selectors: Selectors,
    pub timings: Timings,
    pub offsets: Offsets,
    pub typed_name: TypedName,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub hamburger_id: String,
    pub nav_menu_id: String,
    pub navbar: String,
    pub nav_link: String,
    pub bar: String,
    pub anchor_link: String,
    pub section: String,
    pub home_id: String,
    pub name_text_id: String,
    pub hero_title_id: String,
    pub hero_title: String,
    pub flash_message: String,
    pub flash_close: String,
    pub animated_cards: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            hamburger_id: "hamburger".to_string(),
            nav_menu_id: "navMenu".to_string(),
            navbar: ".navbar".to_string(),
            nav_link: ".nav-link".to_string(),
            bar: ".bar".to_string(),
            anchor_link: "a[href^=\"#\"]".to_string(),
            section: ".section".to_string(),
            home_id: "home".to_string(),
            name_text_id: "nameText".to_string(),
            hero_title_id: "heroTitle".to_string(),
            hero_title: ".hero-title".to_string(),
            flash_message: ".flash-message".to_string(),
            flash_close: ".flash-close".to_string(),
            animated_cards: ".highlight-card, .project-card, .post-card, .timeline-item".to_string(),
        }
    }
}

/// Delays and durations, all in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub flash_auto_dismiss_ms: u32,
    pub flash_exit_ms: u32,
    pub wave_duration_ms: u32,
    pub wave_initial_delay_ms: u32,
    pub typing_start_delay_ms: u32,
    pub typing_interval_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            flash_auto_dismiss_ms: 5_000,
            flash_exit_ms: 300,
            wave_duration_ms: 2_000,
            wave_initial_delay_ms: 1_500,
            typing_start_delay_ms: 1_000,
            typing_interval_ms: 100,
        }
    }
}

/// Pixel offsets used by the scroll behaviours.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Offsets {
    pub anchor_buffer_px: f64,
    pub default_nav_height_px: f64,
    pub active_section_buffer_px: f64,
    pub navbar_solid_after_px: f64,
}

impl Default for Offsets {
    fn default() -> Self {
        Self {
            anchor_buffer_px: 20.0,
            default_nav_height_px: 70.0,
            active_section_buffer_px: 30.0,
            navbar_solid_after_px: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct TypedName(pub String);

impl Default for TypedName {
    fn default() -> Self {
        TypedName("Manish Yadav".to_string())
    }
}

impl TypedName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PageConfig {
    /// Reads `window.portfolioConfig` if the page defines one, otherwise
    /// returns the defaults. A malformed object is logged and ignored.
    pub fn load(window: &web_sys::Window) -> Self {
        let raw = match Reflect::get(window, &JsValue::from_str(GLOBAL_CONFIG_KEY)) {
            Ok(value) if !value.is_undefined() && !value.is_null() => value,
            _ => return Self::default(),
        };

        match serde_wasm_bindgen::from_value::<PageConfig>(raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed {}: {}", GLOBAL_CONFIG_KEY, e);
                Self::default()
            }
        }
    }
}
