use log::debug;
use wasm_bindgen::JsValue;
use web_sys::Document;

pub const STYLE_ELEMENT_ID: &str = "portfolio-behaviour-styles";

/// Keyframes and the caret style the behaviours reference by name.
pub const ANIMATION_CSS: &str = r#"
    @keyframes fadeInUp {
        from {
            opacity: 0;
            transform: translateY(20px);
        }
        to {
            opacity: 1;
            transform: translateY(0);
        }
    }

    @keyframes slideOut {
        from {
            transform: translateX(0);
            opacity: 1;
        }
        to {
            transform: translateX(100%);
            opacity: 0;
        }
    }

    .typed-text {
        border-right: 2px solid var(--accent-primary);
        animation: blink 0.7s infinite;
    }

    @keyframes blink {
        0%, 50% { border-right-color: var(--accent-primary); }
        51%, 100% { border-right-color: transparent; }
    }
"#;

/// Appends the animation stylesheet to `<head>` unless it is already there.
pub fn inject(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return Ok(());
    }
    let Some(head) = document.head() else {
        debug!("No <head>, skipping animation stylesheet");
        return Ok(());
    };

    let style = document.create_element("style")?;
    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(ANIMATION_CSS));
    head.append_child(&style)?;
    Ok(())
}
