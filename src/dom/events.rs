//! Scoped browser subscriptions
//!
//! Each guard owns its JS closure and undoes its registration on drop, so a
//! mount that goes away (or swaps configuration) leaves nothing firing.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, IntersectionObserver, ResizeObserver};

/// An event listener removed on drop
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// A repeating timer cleared on drop
pub struct Interval {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new<F>(period_ms: f64, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut() + 'static,
    {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let callback = Closure::<dyn FnMut()>::new(handler);
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            period_ms.max(1.0).round() as i32,
        )?;
        Ok(Self {
            id,
            _callback: callback,
        })
    }

    pub fn id(&self) -> i32 {
        self.id
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        clear_interval(self.id);
    }
}

/// Stop a timer without dropping its closure (safe from inside the callback)
pub fn clear_interval(id: i32) {
    if let Some(window) = web_sys::window() {
        window.clear_interval_with_handle(id);
    }
}

/// An intersection observer disconnected on drop
pub struct Intersection {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Intersection {
    /// Observe `target`, calling `handler(is_intersecting)` per entry
    pub fn new<F>(
        target: &web_sys::Element,
        root_margin: &str,
        threshold: f64,
        mut handler: F,
    ) -> Result<Self, JsValue>
    where
        F: FnMut(bool) + 'static,
    {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    if let Ok(entry) = entry.dyn_into::<web_sys::IntersectionObserverEntry>() {
                        handler(entry.is_intersecting());
                    }
                }
            },
        );
        let options = web_sys::IntersectionObserverInit::new();
        options.set_root_margin(root_margin);
        options.set_threshold(&JsValue::from_f64(threshold));
        let observer = IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        observer.observe(target);
        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for Intersection {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Size-change notifications for a set of elements
pub enum Resize {
    Observer {
        observer: ResizeObserver,
        _callback: Closure<dyn FnMut(js_sys::Array, ResizeObserver)>,
    },
    /// Browsers without `ResizeObserver` fall back to window resize
    Window(Listener),
}

impl Resize {
    pub fn new<F>(targets: &[&web_sys::Element], handler: F) -> Result<Self, JsValue>
    where
        F: FnMut() + 'static,
    {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let supported = js_sys::Reflect::has(&window, &JsValue::from_str("ResizeObserver"))
            .unwrap_or(false);

        if !supported {
            // Observers report the initial size on their own; window resize does not
            let mut handler = handler;
            handler();
            let listener = Listener::new(&window, "resize", move |_| handler())?;
            return Ok(Resize::Window(listener));
        }

        let mut handler = handler;
        let callback = Closure::<dyn FnMut(js_sys::Array, ResizeObserver)>::new(
            move |_entries: js_sys::Array, _observer: ResizeObserver| handler(),
        );
        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
        for target in targets {
            observer.observe(target);
        }
        Ok(Resize::Observer {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for Resize {
    fn drop(&mut self) {
        if let Resize::Observer { observer, .. } = self {
            observer.disconnect();
        }
    }
}
