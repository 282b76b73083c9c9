//! Deferred Callbacks
//!
//! Transition settle delays and toast lifetimes run through [`Scheduler`]
//! so the state machines that use them can be driven by a virtual clock.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsValue;

pub type TimerId = u64;

pub trait Scheduler {
    /// Run `task` once after `delay_ms`
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerId;

    /// Drop a pending task; unknown or already-run ids are ignored
    fn cancel(&self, id: TimerId);

    /// Run `task` right before the next paint
    fn next_frame(&self, task: Box<dyn FnOnce()>);
}

/// `setTimeout`/`requestAnimationFrame` backed scheduler
#[derive(Default)]
pub struct BrowserScheduler {
    next_id: Cell<TimerId>,
    handles: Rc<RefCell<HashMap<TimerId, JsValue>>>,
}

impl Scheduler for BrowserScheduler {
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerId {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);

        let handles = Rc::clone(&self.handles);
        let handle = Timeout::new(delay_ms, move || {
            handles.borrow_mut().remove(&id);
            task();
        })
        .forget();
        self.handles.borrow_mut().insert(id, handle);
        id
    }

    fn cancel(&self, id: TimerId) {
        let Some(handle) = self.handles.borrow_mut().remove(&id) else { return };
        if let (Some(win), Some(raw)) = (web_sys::window(), handle.as_f64()) {
            win.clear_timeout_with_handle(raw as i32);
        }
    }

    fn next_frame(&self, task: Box<dyn FnOnce()>) {
        leptos::prelude::request_animation_frame(task);
    }
}
