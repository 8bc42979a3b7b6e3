//! Cancellable `requestAnimationFrame` loop

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Runs a callback on every display refresh until dropped or the callback
/// returns false.
pub struct FrameLoop {
    handle: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl FrameLoop {
    pub fn start<F>(mut on_frame: F) -> Result<Self, JsValue>
    where
        F: FnMut(f64) -> bool + 'static,
    {
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        // The closure only holds a weak reference to itself so dropping the
        // loop frees it.
        let weak: Weak<RefCell<Option<FrameCallback>>> = Rc::downgrade(&callback);
        let frame_handle = handle.clone();
        *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            frame_handle.set(None);
            if !on_frame(time) {
                return;
            }
            if let Some(cb) = weak.upgrade() {
                if let Some(cb) = cb.borrow().as_ref() {
                    frame_handle.set(request_frame(cb).ok());
                }
            }
        }));

        if let Some(cb) = callback.borrow().as_ref() {
            handle.set(Some(request_frame(cb)?));
        }

        Ok(Self { handle, callback })
    }

    /// Whether another frame is scheduled
    pub fn is_running(&self) -> bool {
        self.handle.get().is_some()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let (Some(id), Some(window)) = (self.handle.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        self.callback.borrow_mut().take();
    }
}

fn request_frame(cb: &FrameCallback) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window.request_animation_frame(cb.as_ref().unchecked_ref())
}
