//! `data-fx="logo-loop"` mount

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

use super::events::{Listener, Resize};
use super::frame::FrameLoop;
use super::{create, document};
use crate::fx::{ItemContent, MarqueeConfig, MarqueeItem, MarqueeState};

struct MarqueeView {
    state: MarqueeState,
    items: Vec<MarqueeItem>,
    root: HtmlElement,
    track: HtmlElement,
    /// Rendered copies; the first one is the measured sequence
    lists: Vec<Element>,
    image_waits: Vec<Listener>,
}

impl MarqueeView {
    fn build_list(&self, document: &Document, copy: usize) -> Result<Element, JsValue> {
        let list = create(document, "ul", "logoloop__list")?;
        list.set_attribute("role", "list")?;
        if copy > 0 {
            list.set_attribute("aria-hidden", "true")?;
        }
        for item in &self.items {
            list.append_child(&build_item(document, item)?)?;
        }
        Ok(list)
    }

    /// Add or remove trailing copies to match the state's copy count
    fn sync_copies(&mut self) -> Result<(), JsValue> {
        let document = document()?;
        let wanted = self.state.copy_count().max(1);
        while self.lists.len() < wanted {
            let list = self.build_list(&document, self.lists.len())?;
            self.track.append_child(&list)?;
            self.lists.push(list);
        }
        while self.lists.len() > wanted {
            if let Some(list) = self.lists.pop() {
                list.remove();
            }
        }
        Ok(())
    }

    fn measure(&mut self) -> Result<(), JsValue> {
        let Some(first) = self.lists.first() else {
            return Ok(());
        };
        let container = self.root.client_width() as f64;
        let sequence = first.get_bounding_client_rect().width();
        if self.state.measure(container, sequence) {
            self.sync_copies()?;
        }
        self.apply_transform()
    }

    fn apply_transform(&self) -> Result<(), JsValue> {
        self.track.style().set_property(
            "transform",
            &format!("translate3d({}px,0,0)", self.state.translate_x()),
        )
    }
}

fn build_item(document: &Document, item: &MarqueeItem) -> Result<Element, JsValue> {
    let li = create(document, "li", "logoloop__item")?;
    li.set_attribute("role", "listitem")?;

    let content = match &item.content {
        ItemContent::Node { markup, aria_label, .. } => {
            let span = create(document, "span", "logoloop__node")?;
            span.set_inner_html(markup);
            if item.href.is_some() && aria_label.is_none() {
                span.set_attribute("aria-hidden", "true")?;
            }
            span
        }
        ItemContent::Image(image) => {
            let img = create(document, "img", "")?;
            img.set_attribute("src", &image.src)?;
            if let Some(srcset) = &image.srcset {
                img.set_attribute("srcset", srcset)?;
            }
            if let Some(sizes) = &image.sizes {
                img.set_attribute("sizes", sizes)?;
            }
            if let Some(width) = image.width {
                img.set_attribute("width", &width.to_string())?;
            }
            if let Some(height) = image.height {
                img.set_attribute("height", &height.to_string())?;
            }
            img.set_attribute("alt", image.alt.as_deref().unwrap_or(""))?;
            if let Some(title) = &image.title {
                img.set_attribute("title", title)?;
            }
            img.set_attribute("loading", "lazy")?;
            img.set_attribute("decoding", "async")?;
            img.set_attribute("draggable", "false")?;
            img
        }
    };

    match &item.href {
        Some(href) => {
            let link = create(document, "a", "logoloop__link")?;
            link.set_attribute("href", href)?;
            link.set_attribute("aria-label", item.link_label())?;
            link.set_attribute("target", "_blank")?;
            link.set_attribute("rel", "noreferrer noopener")?;
            link.append_child(&content)?;
            li.append_child(&link)?;
        }
        None => {
            li.append_child(&content)?;
        }
    }
    Ok(li)
}

fn measure_weak(view: &Weak<RefCell<MarqueeView>>) {
    if let Some(view) = view.upgrade() {
        if let Err(e) = view.borrow_mut().measure() {
            log::warn!("logo-loop: measure failed: {:?}", e);
        }
    }
}

/// Measure once every image of the first copy has loaded or failed
fn watch_images(view: &Rc<RefCell<MarqueeView>>) -> Result<(), JsValue> {
    let pending: Vec<HtmlImageElement> = {
        let v = view.borrow();
        let Some(first) = v.lists.first() else {
            return Ok(());
        };
        let nodes = first.query_selector_all("img")?;
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|n| n.dyn_into::<HtmlImageElement>().ok())
            .filter(|img| !img.complete())
            .collect()
    };

    if pending.is_empty() {
        return view.borrow_mut().measure();
    }

    let remaining = Rc::new(Cell::new(pending.len()));
    let mut waits = Vec::with_capacity(pending.len() * 2);
    for img in &pending {
        let settled = Rc::new(Cell::new(false));
        for event in ["load", "error"] {
            let weak = Rc::downgrade(view);
            let remaining = remaining.clone();
            let settled = settled.clone();
            waits.push(Listener::new(img, event, move |_| {
                if settled.replace(true) {
                    return;
                }
                remaining.set(remaining.get().saturating_sub(1));
                if remaining.get() == 0 {
                    measure_weak(&weak);
                }
            })?);
        }
    }
    view.borrow_mut().image_waits = waits;
    Ok(())
}

/// A live logo marquee bound to one container element
pub struct MarqueeMount {
    view: Rc<RefCell<MarqueeView>>,
    _frames: Option<FrameLoop>,
    _resize: Resize,
    _hover: Vec<Listener>,
}

impl MarqueeMount {
    pub fn mount(
        root: &Element,
        items: Vec<MarqueeItem>,
        config: MarqueeConfig,
        animate: bool,
    ) -> Result<Self, JsValue> {
        let document = document()?;
        let root: HtmlElement = root.clone().dyn_into()?;

        root.set_text_content(None);
        for class in config.root_classes().split(' ') {
            root.class_list().add_1(class)?;
        }
        root.set_attribute("role", "region")?;
        root.set_attribute("aria-label", &config.aria_label)?;
        for (name, value) in config.css_vars() {
            root.style().set_property(name, &value)?;
        }

        let track: HtmlElement = create(&document, "div", "logoloop__track")?.dyn_into()?;
        root.append_child(&track)?;

        let pause_on_hover = config.pause_on_hover;
        let mut view = MarqueeView {
            state: MarqueeState::new(config),
            items,
            root: root.clone(),
            track,
            lists: Vec::new(),
            image_waits: Vec::new(),
        };
        view.sync_copies()?;
        let sequence = view
            .lists
            .first()
            .cloned()
            .ok_or_else(|| JsValue::from_str("logo-loop: no sequence rendered"))?;
        let view = Rc::new(RefCell::new(view));

        let container: &Element = &root;
        let weak = Rc::downgrade(&view);
        let resize = Resize::new(&[container, &sequence], move || measure_weak(&weak))?;
        watch_images(&view)?;

        let mut hover = Vec::new();
        let mut frames = None;
        if animate {
            if pause_on_hover {
                for (name, hovered) in [("mouseenter", true), ("mouseleave", false)] {
                    let weak = Rc::downgrade(&view);
                    hover.push(Listener::new(&root, name, move |_| {
                        if let Some(view) = weak.upgrade() {
                            view.borrow_mut().state.set_hovered(hovered);
                        }
                    })?);
                }
            }

            view.borrow_mut().state.restart();
            let weak = Rc::downgrade(&view);
            frames = Some(FrameLoop::start(move |time| {
                let Some(view) = weak.upgrade() else {
                    return false;
                };
                let mut v = view.borrow_mut();
                v.state.frame(time);
                v.apply_transform().is_ok()
            })?);
        }

        log::debug!(
            "logo-loop mounted ({} items, {} copies)",
            view.borrow().items.len(),
            view.borrow().state.copy_count()
        );
        Ok(Self {
            view,
            _frames: frames,
            _resize: resize,
            _hover: hover,
        })
    }

    /// Rendered copies of the sequence
    pub fn copy_count(&self) -> usize {
        self.view.borrow().lists.len()
    }
}
