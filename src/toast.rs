//! Toast Queue
//!
//! Fire-and-forget notifications. Each toast stacks below the previous
//! ones, stays for its duration, fades, then detaches; closing it by hand
//! cancels the pending timer and removes it at once.

use std::rc::Rc;

use leptos::prelude::*;

use crate::schedule::{Scheduler, TimerId};
use crate::store::{AppStateStoreFields, AppStore};

pub type ToastId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Info => "toast toast-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
    /// Fading out; detaches when the fade timer fires
    pub leaving: bool,
    timer: Option<TimerId>,
}

/// Ordered toast stack
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastList {
    toasts: Vec<Toast>,
    next_id: ToastId,
}

impl ToastList {
    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind) -> ToastId {
        self.next_id += 1;
        self.toasts.push(Toast {
            id: self.next_id,
            message: message.into(),
            kind,
            leaving: false,
            timer: None,
        });
        self.next_id
    }

    pub fn set_timer(&mut self, id: ToastId, timer: TimerId) {
        if let Some(toast) = self.toasts.iter_mut().find(|t| t.id == id) {
            toast.timer = Some(timer);
        }
    }

    /// Start the fade. False when the toast is gone or already fading.
    pub fn begin_leave(&mut self, id: ToastId) -> bool {
        match self.toasts.iter_mut().find(|t| t.id == id) {
            Some(toast) if !toast.leaving => {
                toast.leaving = true;
                toast.timer = None;
                true
            }
            _ => false,
        }
    }

    /// Detach a toast, returning its pending timer if any
    pub fn remove(&mut self, id: ToastId) -> Option<Option<TimerId>> {
        let idx = self.toasts.iter().position(|t| t.id == id)?;
        Some(self.toasts.remove(idx).timer)
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

/// Handle for showing toasts, provided via context
#[derive(Clone, Copy)]
pub struct ToastQueue {
    store: AppStore,
    scheduler: StoredValue<Rc<dyn Scheduler>, LocalStorage>,
    duration_ms: u32,
    fade_ms: u32,
}

impl ToastQueue {
    pub fn new(store: AppStore, scheduler: Rc<dyn Scheduler>, duration_ms: u32, fade_ms: u32) -> Self {
        Self {
            store,
            scheduler: StoredValue::new_local(scheduler),
            duration_ms,
            fade_ms,
        }
    }

    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.show(message, ToastKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.show(message, ToastKind::Error)
    }

    pub fn show(&self, message: impl Into<String>, kind: ToastKind) -> ToastId {
        self.show_for(message, kind, self.duration_ms)
    }

    pub fn show_for(&self, message: impl Into<String>, kind: ToastKind, duration_ms: u32) -> ToastId {
        let message = message.into();
        log::debug!("[TOAST] {:?}: {}", kind, message);

        let id = self.store.toasts().write().push(message, kind);
        let queue = *self;
        let timer = self.schedule(duration_ms, move || queue.fade(id));
        self.store.toasts().write().set_timer(id, timer);
        id
    }

    /// Explicit close: cancel the timer and detach immediately
    pub fn close(&self, id: ToastId) {
        let removed = self.store.toasts().write().remove(id);
        if let Some(Some(timer)) = removed {
            self.scheduler.with_value(|s| s.cancel(timer));
        }
    }

    fn fade(&self, id: ToastId) {
        if !self.store.toasts().write().begin_leave(id) {
            return;
        }
        let queue = *self;
        let timer = self.schedule(self.fade_ms, move || {
            queue.store.toasts().write().remove(id);
        });
        self.store.toasts().write().set_timer(id, timer);
    }

    fn schedule(&self, delay_ms: u32, task: impl FnOnce() + 'static) -> TimerId {
        self.scheduler.with_value(|s| s.after(delay_ms, Box::new(task)))
    }
}
