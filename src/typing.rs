use gloo_timers::future::TimeoutFuture;
use log::debug;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;

use crate::config::PageConfig;
use crate::dom;

pub const TYPED_CLASS: &str = "typed-text";
/// Set on the hero title once the effect has started so it never runs twice.
pub const TYPED_MARKER: &str = "data-typed";

/// Wraps the first occurrence of `name` in a `typed-text` span.
pub fn wrap_name(inner_html: &str, name: &str) -> Option<String> {
    if name.is_empty() || !inner_html.contains(name) {
        return None;
    }
    let span = format!("<span class=\"{}\">{}</span>", TYPED_CLASS, name);
    Some(inner_html.replacen(name, &span, 1))
}

/// Yields successively longer prefixes of a string, one character at a time.
#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    revealed: usize,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            revealed: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// When the last tick of the effect fires, measured from start-up.
    pub fn finish_ms(&self, start_delay_ms: u32, interval_ms: u32) -> u32 {
        let chars = u32::try_from(self.chars.len()).unwrap_or(u32::MAX);
        start_delay_ms.saturating_add(interval_ms.saturating_mul(chars))
    }
}

impl Iterator for Typewriter {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.revealed >= self.chars.len() {
            return None;
        }
        self.revealed += 1;
        Some(self.chars[..self.revealed].iter().collect())
    }
}

pub fn setup_typing(document: &Document, config: &PageConfig) -> Result<(), JsValue> {
    let Some(hero_title) = dom::html_by_selector(document, &config.selectors.hero_title) else {
        return Ok(());
    };
    if hero_title.has_attribute(TYPED_MARKER) {
        return Ok(());
    }

    let name = config.typed_name.as_str();
    let text = hero_title.text_content().unwrap_or_default();
    if name.is_empty() || !text.contains(name) {
        return Ok(());
    }
    let Some(html) = wrap_name(&hero_title.inner_html(), name) else {
        return Ok(());
    };
    hero_title.set_inner_html(&html);
    hero_title.set_attribute(TYPED_MARKER, "")?;

    let Some(typed) = hero_title.query_selector(&format!(".{}", TYPED_CLASS))? else {
        return Ok(());
    };
    let original = typed.text_content().unwrap_or_default();
    typed.set_text_content(Some(""));

    let start_delay = config.timings.typing_start_delay_ms;
    let interval = config.timings.typing_interval_ms;
    let typewriter = Typewriter::new(&original);
    debug!(
        "Typing {:?} from {}ms, done by {}ms",
        original,
        start_delay,
        typewriter.finish_ms(start_delay, interval)
    );

    spawn_local(async move {
        TimeoutFuture::new(start_delay).await;
        for prefix in typewriter {
            typed.set_text_content(Some(&prefix));
            TimeoutFuture::new(interval).await;
        }
    });
    Ok(())
}
