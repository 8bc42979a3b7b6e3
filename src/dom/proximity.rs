//! `data-fx="scramble"` mount

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, PointerEvent};

use super::events::Listener;
use super::frame::FrameLoop;
use super::{create, document, now_ms};
use crate::fx::{ProximityConfig, ProximityText};

struct ProximityView {
    fx: ProximityText,
    spans: Vec<Element>,
    frames: Option<FrameLoop>,
}

impl ProximityView {
    /// On-screen centre of every glyph span
    fn centers(&self) -> Vec<Vec2> {
        self.spans
            .iter()
            .map(|span| {
                let rect = span.get_bounding_client_rect();
                Vec2::new(
                    (rect.left() + rect.width() / 2.0) as f32,
                    (rect.top() + rect.height() / 2.0) as f32,
                )
            })
            .collect()
    }

    fn show(&self, index: usize) {
        if let (Some(span), Some(c)) = (self.spans.get(index), self.fx.chars().get(index)) {
            let mut buf = [0u8; 4];
            span.set_text_content(Some(c.shown.encode_utf8(&mut buf)));
        }
    }
}

/// A live pointer scramble bound to one element
pub struct ProximityMount {
    view: Rc<RefCell<ProximityView>>,
    _pointer: Option<Listener>,
}

impl ProximityMount {
    pub fn mount(
        root: &Element,
        text: &str,
        config: ProximityConfig,
        seed: u64,
        animate: bool,
    ) -> Result<Self, JsValue> {
        let document = document()?;
        let fx = ProximityText::new(text, config, seed);

        root.set_text_content(None);
        let paragraph = create(&document, "p", "")?;
        let mut spans = Vec::with_capacity(fx.len());
        for c in fx.chars() {
            let span = create(&document, "span", "scramble-char")?;
            let mut buf = [0u8; 4];
            let original = c.original.encode_utf8(&mut buf);
            span.set_attribute("data-original", original)?;
            span.set_text_content(Some(original));
            paragraph.append_child(&span)?;
            spans.push(span);
        }
        root.append_child(&paragraph)?;

        let view = Rc::new(RefCell::new(ProximityView {
            fx,
            spans,
            frames: None,
        }));

        let pointer = if animate {
            let weak = Rc::downgrade(&view);
            Some(Listener::new(root, "pointermove", move |event| {
                if let Some(event) = event.dyn_ref::<PointerEvent>() {
                    let pointer = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                    on_pointer(&weak, pointer);
                }
            })?)
        } else {
            None
        };

        log::debug!("scramble mounted ({} chars)", view.borrow().fx.len());
        Ok(Self {
            view,
            _pointer: pointer,
        })
    }

    /// Characters currently scrambling
    pub fn running(&self) -> usize {
        self.view.borrow().fx.running_count()
    }
}

impl Drop for ProximityMount {
    fn drop(&mut self) {
        if let Ok(mut v) = self.view.try_borrow_mut() {
            v.frames = None;
            v.fx.restore();
            for i in 0..v.spans.len() {
                v.show(i);
            }
        }
    }
}

fn on_pointer(view: &Weak<RefCell<ProximityView>>, pointer: Vec2) {
    let Some(view) = view.upgrade() else {
        return;
    };
    let mut v = view.borrow_mut();
    let centers = v.centers();
    let started = v.fx.trigger_near(pointer, &centers, now_ms());
    if started == 0 || v.frames.as_ref().is_some_and(FrameLoop::is_running) {
        return;
    }

    let weak = Rc::downgrade(&view);
    match FrameLoop::start(move |time| step(&weak, time)) {
        Ok(frames) => v.frames = Some(frames),
        Err(e) => log::warn!("scramble: failed to start frame loop: {:?}", e),
    }
}

/// One display refresh; false once every glyph has settled
fn step(view: &Weak<RefCell<ProximityView>>, time: f64) -> bool {
    let Some(view) = view.upgrade() else {
        return false;
    };
    let mut v = view.borrow_mut();
    let report = v.fx.step(time);
    for index in report.changed {
        v.show(index);
    }
    report.running > 0
}
