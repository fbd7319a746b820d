//! Client-side behaviour for the portfolio site: the server renders the page,
//! this crate wires the interactive bits onto it once the document is ready.

use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::Document;

pub mod animations;
pub mod config;
pub mod dom;
pub mod flash;
pub mod forms;
pub mod nav;
pub mod scroll;
pub mod styles;
pub mod typing;

pub use config::PageConfig;
pub use flash::show_flash_message;

type Setup = fn(&Document, &PageConfig) -> Result<(), JsValue>;

const BEHAVIOURS: &[(&str, Setup)] = &[
    ("mobile menu", nav::setup_mobile_menu),
    ("flash messages", flash::setup_flash_messages),
    ("smooth scroll", nav::setup_smooth_scroll),
    ("active nav links", scroll::setup_active_links),
    ("wave animation", animations::setup_wave),
    ("form validation", |document, _| forms::setup_validation(document)),
    ("submit loading state", |document, _| forms::setup_loading_state(document)),
    ("navbar scroll effect", scroll::setup_navbar_effect),
    ("entrance animations", animations::setup_entrance_animations),
    ("typing effect", typing::setup_typing),
];

/// Wires every behaviour group. A group that fails is logged and skipped so
/// the rest of the page still works.
pub fn init(document: &Document, config: &PageConfig) {
    if let Err(e) = styles::inject(document) {
        error!("Failed to inject animation styles: {:?}", e);
    }
    for (name, setup) in BEHAVIOURS {
        if let Err(e) = setup(document, config) {
            error!("Failed to wire {}: {:?}", name, e);
        }
    }
    info!("Page behaviour ready");
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Logging may already be set up if the module is instantiated twice
    let _ = console_log::init_with_level(config::log_level());

    let window = dom::window()?;
    let document = dom::document()?;
    let config = PageConfig::load(&window);

    if document.ready_state() == "loading" {
        let document_for_ready = document.clone();
        dom::listen_once(&document, "DOMContentLoaded", move |_| {
            init(&document_for_ready, &config);
        })?;
    } else {
        init(&document, &config);
    }
    Ok(())
}
