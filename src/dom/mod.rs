//! Browser bindings for the effect engines
//!
//! Mounts discover their elements through `data-fx` attributes, drive the
//! pure engines from timers, frames and pointer events, and release every
//! subscription when dropped.

pub mod decrypt;
pub mod events;
pub mod frame;
pub mod marquee;
pub mod proximity;

pub use decrypt::DecryptMount;
pub use frame::FrameLoop;
pub use marquee::MarqueeMount;
pub use proximity::ProximityMount;

use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::settings::merge_options;

/// Attribute holding per-element JSON options
pub const OPTIONS_ATTR: &str = "data-fx-options";

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Create an element with an optional class list
pub fn create(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

/// Effect options for `el`: `base` overlaid with its `data-fx-options` JSON
pub fn element_options<T>(el: &Element, base: &T) -> T
where
    T: Clone + Serialize + DeserializeOwned,
{
    let Some(json) = el.get_attribute(OPTIONS_ATTR) else {
        return base.clone();
    };
    match merge_options(base, &json) {
        Ok(options) => options,
        Err(e) => {
            log::warn!("Ignoring invalid {} on <{}>: {}", OPTIONS_ATTR, el.tag_name(), e);
            base.clone()
        }
    }
}

/// Text an effect animates: `data-fx-text` or the element's own text
pub fn element_text(el: &Element) -> String {
    el.get_attribute("data-fx-text")
        .or_else(|| el.text_content())
        .unwrap_or_default()
}

/// Fresh RNG seed per mount
pub fn seed() -> u64 {
    (js_sys::Math::random() * u32::MAX as f64) as u64 ^ js_sys::Date::now() as u64
}

/// Milliseconds on the same clock as animation frame timestamps
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}
