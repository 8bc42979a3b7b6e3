//! `data-fx="decrypt"` mount

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

use super::events::{Intersection, Interval, Listener, clear_interval};
use super::{create, document};
use crate::fx::{DecryptConfig, DecryptText, RunToken, TickOutcome, TriggerEvent};

/// Viewport trigger fires once a quarter of the text is inside the middle 70%
const VIEW_ROOT_MARGIN: &str = "-15% 0px -15% 0px";
const VIEW_THRESHOLD: f64 = 0.25;

/// Inline properties set on the host, leaving its other styles alone
const HOST_STYLE: [(&str, &str); 2] = [("display", "inline-block"), ("white-space", "pre-wrap")];

/// Visually hidden but announced by screen readers
const SR_ONLY_STYLE: &str = "position:absolute;width:1px;height:1px;padding:0;margin:-1px;\
overflow:hidden;clip:rect(0,0,0,0);border:0";

struct DecryptView {
    fx: DecryptText,
    reader: Element,
    glyphs: Element,
    cells: Vec<Element>,
    revealed_class: String,
    encrypted_class: String,
    timer: Option<Interval>,
}

impl DecryptView {
    /// Rebuild one span per character
    fn build(&mut self) -> Result<(), JsValue> {
        let document = document()?;
        self.reader.set_text_content(Some(&self.fx.source()));
        self.glyphs.set_text_content(None);
        self.cells.clear();
        for _ in 0..self.fx.len() {
            let span = create(&document, "span", &self.revealed_class)?;
            self.glyphs.append_child(&span)?;
            self.cells.push(span);
        }
        self.render();
        Ok(())
    }

    fn render(&self) {
        for (span, cell) in self.cells.iter().zip(self.fx.cells()) {
            let mut buf = [0u8; 4];
            let text = cell.ch.encode_utf8(&mut buf);
            if span.text_content().as_deref() != Some(text) {
                span.set_text_content(Some(text));
            }
            let class = if cell.revealed {
                &self.revealed_class
            } else {
                &self.encrypted_class
            };
            if span.class_name() != *class {
                span.set_class_name(class);
            }
        }
    }
}

/// A live reveal effect bound to one element
pub struct DecryptMount {
    view: Rc<RefCell<DecryptView>>,
    _listeners: Vec<Listener>,
    _viewport: Option<Intersection>,
}

impl DecryptMount {
    /// Replace the element content with the effect markup and subscribe to
    /// the triggers its policy needs. With `animate == false` only the static
    /// markup is produced.
    pub fn mount(
        root: &Element,
        text: &str,
        config: DecryptConfig,
        seed: u64,
        animate: bool,
    ) -> Result<Self, JsValue> {
        let document = document()?;
        let policy = config.trigger;

        root.set_text_content(None);
        if let Some(host) = root.dyn_ref::<HtmlElement>() {
            for (name, value) in HOST_STYLE {
                host.style().set_property(name, value)?;
            }
        }
        let reader = create(&document, "span", "")?;
        reader.set_attribute("style", SR_ONLY_STYLE)?;
        let glyphs = create(&document, "span", "")?;
        glyphs.set_attribute("aria-hidden", "true")?;
        root.append_child(&reader)?;
        root.append_child(&glyphs)?;

        let mut view = DecryptView {
            fx: DecryptText::new(text, config, seed),
            reader,
            glyphs,
            cells: Vec::new(),
            revealed_class: root
                .get_attribute("data-fx-class")
                .unwrap_or_else(|| "fx-revealed".to_string()),
            encrypted_class: root
                .get_attribute("data-fx-encrypted-class")
                .unwrap_or_else(|| "fx-encrypted".to_string()),
            timer: None,
        };
        view.build()?;
        let view = Rc::new(RefCell::new(view));

        let mut listeners = Vec::new();
        let mut viewport = None;
        if animate {
            if policy.uses_hover() {
                for (name, event) in [
                    ("mouseenter", TriggerEvent::PointerEnter),
                    ("mouseleave", TriggerEvent::PointerLeave),
                ] {
                    let weak = Rc::downgrade(&view);
                    listeners.push(Listener::new(root, name, move |_| dispatch(&weak, event))?);
                }
            }
            if policy.uses_viewport() {
                let weak = Rc::downgrade(&view);
                viewport = Some(Intersection::new(
                    root,
                    VIEW_ROOT_MARGIN,
                    VIEW_THRESHOLD,
                    move |visible| {
                        let event = if visible {
                            TriggerEvent::ViewportEnter
                        } else {
                            TriggerEvent::ViewportLeave
                        };
                        dispatch(&weak, event);
                    },
                )?);
            }
        }

        log::debug!("decrypt mounted ({} chars, trigger {})", text.chars().count(), policy.as_str());
        Ok(Self {
            view,
            _listeners: listeners,
            _viewport: viewport,
        })
    }

    /// Text currently displayed
    pub fn rendered(&self) -> String {
        self.view.borrow().fx.rendered()
    }
}

fn dispatch(view: &Weak<RefCell<DecryptView>>, event: TriggerEvent) {
    let Some(view) = view.upgrade() else {
        return;
    };
    let token = {
        let mut v = view.borrow_mut();
        let token = v.fx.handle(event);
        if token.is_none() && !v.fx.is_active() {
            v.timer = None;
        }
        v.render();
        token
    };
    if let Some(token) = token {
        if let Err(e) = schedule(&view, token) {
            log::warn!("decrypt: failed to schedule ticks: {:?}", e);
        }
    }
}

/// Start a timer delivering ticks for `token`; replaces (and clears) any older timer
fn schedule(view: &Rc<RefCell<DecryptView>>, token: RunToken) -> Result<(), JsValue> {
    let period = view.borrow().fx.config().tick_interval_ms;
    let weak = Rc::downgrade(view);
    let own_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let id = own_id.clone();

    let interval = Interval::new(period, move || {
        let Some(view) = weak.upgrade() else {
            return;
        };
        let mut v = view.borrow_mut();
        let outcome = v.fx.tick(token);
        if outcome != TickOutcome::Stale {
            v.render();
        }
        if !outcome.wants_more() {
            if let Some(id) = id.get() {
                clear_interval(id);
            }
        }
    })?;
    own_id.set(Some(interval.id()));
    view.borrow_mut().timer = Some(interval);
    Ok(())
}
