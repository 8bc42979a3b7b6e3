//! Folio FX entry point
//!
//! On the web, mounts every `[data-fx]` element on the page. Natively, prints
//! a headless preview of the effects.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;
    use web_sys::Element;

    use folio_fx::Settings;
    use folio_fx::content;
    use folio_fx::dom::{self, DecryptMount, MarqueeMount, ProximityMount};
    use folio_fx::fx::MarqueeItem;

    /// Attribute naming a built-in base config ("hero", "skills")
    const PRESET_ATTR: &str = "data-fx-preset";

    /// Mounted effects; dropping one releases its timers and listeners
    enum Mount {
        Decrypt(DecryptMount),
        Scramble(ProximityMount),
        LogoLoop(MarqueeMount),
    }

    impl Mount {
        fn describe(&self) -> String {
            match self {
                Mount::Decrypt(m) => format!("decrypt \"{}\"", m.rendered()),
                Mount::Scramble(m) => format!("scramble ({} running)", m.running()),
                Mount::LogoLoop(m) => format!("logo-loop ({} copies)", m.copy_count()),
            }
        }
    }

    thread_local! {
        static MOUNTS: RefCell<Vec<Mount>> = const { RefCell::new(Vec::new()) };
    }

    fn mount_element(el: &Element, settings: &Settings) -> Result<Option<Mount>, JsValue> {
        let animate = !settings.reduced_motion;
        let kind = el.get_attribute("data-fx").unwrap_or_default();
        let preset = el.get_attribute(PRESET_ATTR);
        let mount = match kind.as_str() {
            "decrypt" => {
                let base = match preset.as_deref() {
                    Some("hero") => content::hero_decrypt(),
                    _ => settings.decrypt.clone(),
                };
                let config = dom::element_options(el, &base);
                let text = dom::element_text(el);
                Mount::Decrypt(DecryptMount::mount(el, &text, config, dom::seed(), animate)?)
            }
            "scramble" => {
                let config = dom::element_options(el, &settings.scramble);
                let text = dom::element_text(el);
                Mount::Scramble(ProximityMount::mount(el, &text, config, dom::seed(), animate)?)
            }
            "logo-loop" => {
                let base = match preset.as_deref() {
                    Some("skills") => content::skills_loop(),
                    _ => settings.logo_loop.clone(),
                };
                let config = dom::element_options(el, &base);
                let items = element_items(el);
                Mount::LogoLoop(MarqueeMount::mount(el, items, config, animate)?)
            }
            other => {
                log::warn!("Unknown data-fx=\"{}\"", other);
                return Ok(None);
            }
        };
        Ok(Some(mount))
    }

    /// Items from `data-fx-items` JSON, or the default tech logos
    fn element_items(el: &Element) -> Vec<MarqueeItem> {
        match el.get_attribute("data-fx-items") {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Invalid data-fx-items ({}), using default logos", e);
                content::tech_logos()
            }),
            None => content::tech_logos(),
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let loaded = Settings::load();
        let level = loaded.as_ref().map_or(log::Level::Info, Settings::level);
        console_log::init_with_level(level).expect("Failed to init logger");

        log::info!("Folio FX starting...");
        let settings = match loaded {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Invalid #{} block ({}), using defaults", Settings::ELEMENT_ID, e);
                Settings::default()
            }
        };

        let document = match dom::document() {
            Ok(document) => document,
            Err(e) => {
                log::error!("No document: {:?}", e);
                return;
            }
        };
        let nodes = match document.query_selector_all("[data-fx]") {
            Ok(nodes) => nodes,
            Err(e) => {
                log::error!("Query for [data-fx] failed: {:?}", e);
                return;
            }
        };

        let mut mounted = 0;
        for i in 0..nodes.length() {
            let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            match mount_element(&el, &settings) {
                Ok(Some(mount)) => {
                    log::debug!("Mounted {}", mount.describe());
                    MOUNTS.with(|m| m.borrow_mut().push(mount));
                    mounted += 1;
                }
                Ok(None) => {}
                Err(e) => log::warn!("Failed to mount <{}>: {:?}", el.tag_name(), e),
            }
        }

        log::info!(
            "Folio FX running ({} effects{})",
            mounted,
            if settings.reduced_motion { ", reduced motion" } else { "" }
        );
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_page::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Folio FX (native) starting...");
    log::info!("Effects mount in the browser - run with `trunk serve` for the web version");

    println!("\nReveal preview:");
    preview_reveal();
    println!("\nLogo loop preview:");
    preview_marquee();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn preview_reveal() {
    use folio_fx::content::{HERO_TAGLINE, HERO_TICK_MS, hero_decrypt};
    use folio_fx::fx::DecryptText;

    let config = hero_decrypt();
    let text: String = HERO_TAGLINE.chars().take(48).collect();
    let mut fx = DecryptText::new(&text, config, 7);
    let Some(token) = fx.start_run() else {
        return;
    };
    let mut tick = 0;
    while fx.tick(token).wants_more() {
        tick += 1;
        if tick % 8 == 0 {
            println!("  {:>4}ms  {}", tick as f64 * HERO_TICK_MS, fx.rendered());
        }
    }
    println!("  done    {}", fx.rendered());
}

#[cfg(not(target_arch = "wasm32"))]
fn preview_marquee() {
    use folio_fx::content::skills_loop;
    use folio_fx::fx::MarqueeState;

    let mut state = MarqueeState::new(skills_loop());
    for container in [320.0, 768.0, 1440.0] {
        state.measure(container, 540.0);
        println!("  container {:>6}px -> {} copies", container, state.copy_count());
    }
    for frame in 0..=5 {
        state.frame(frame as f64 * 1000.0 / 60.0 * 30.0);
        println!(
            "  t={:.1}s  velocity {:>6.1}px/s  offset {:>6.1}px",
            frame as f64 * 0.5,
            state.velocity(),
            state.offset()
        );
    }
}
