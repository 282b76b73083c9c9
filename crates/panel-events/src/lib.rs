//! Panel DOM Event Utilities
//!
//! Small helpers for the resource panels: scroll-to-bottom detection for
//! infinite scrolling, global key bindings for dialogs, and overlay clicks.

use wasm_bindgen::JsCast;

/// Key that dismisses the open dialog
pub const CLOSE_KEY: &str = "Escape";

/// Scroll geometry of a scrollable region, in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: i32,
    pub client_height: i32,
    pub scroll_height: i32,
}

impl ScrollMetrics {
    /// Read the current geometry of an element
    pub fn of(el: &web_sys::Element) -> Self {
        Self {
            scroll_top: el.scroll_top(),
            client_height: el.client_height(),
            scroll_height: el.scroll_height(),
        }
    }

    /// Distance left before the bottom edge becomes visible
    pub fn remaining(&self) -> i32 {
        (self.scroll_height - self.scroll_top - self.client_height).max(0)
    }

    /// True once the remaining distance drops to `threshold_px` or less
    pub fn near_bottom(&self, threshold_px: i32) -> bool {
        self.remaining() <= threshold_px
    }
}

/// Create a scroll handler that fires `on_near_bottom` on every scroll
/// event whose target is within `threshold_px` of its bottom edge.
///
/// The callback may run many times in a row; callers guard against
/// duplicate work themselves.
pub fn make_on_scroll<F>(threshold_px: i32, on_near_bottom: F) -> impl Fn(web_sys::Event) + Copy + 'static
where
    F: Fn() + Copy + 'static,
{
    move |ev: web_sys::Event| {
        let Some(target) = ev.target() else { return };
        let Some(el) = target.dyn_ref::<web_sys::Element>() else { return };
        if ScrollMetrics::of(el).near_bottom(threshold_px) {
            on_near_bottom();
        }
    }
}

/// True when a click landed on the element carrying the handler itself
/// (the dimmed overlay) and not on anything nested inside it.
pub fn is_overlay_click(ev: &web_sys::Event) -> bool {
    match (ev.target(), ev.current_target()) {
        (Some(target), Some(current)) => target == current,
        _ => false,
    }
}

/// Bind a document-level keydown handler for a single key.
///
/// The listener lives for the rest of the page; every dialog checks its
/// own open state inside `handler`.
pub fn bind_global_key<F>(key: &'static str, handler: F)
where
    F: Fn() + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        if ev.key() == key {
            handler();
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
        }
    }
    on_keydown.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(scroll_top: i32, client_height: i32, scroll_height: i32) -> ScrollMetrics {
        ScrollMetrics { scroll_top, client_height, scroll_height }
    }

    #[test]
    fn remaining_distance_to_bottom() {
        assert_eq!(metrics(0, 400, 1000).remaining(), 600);
        assert_eq!(metrics(600, 400, 1000).remaining(), 0);
    }

    #[test]
    fn overscroll_never_goes_negative() {
        // Elastic scrolling can report a scroll_top past the end
        assert_eq!(metrics(650, 400, 1000).remaining(), 0);
    }

    #[test]
    fn near_bottom_uses_inclusive_threshold() {
        assert!(!metrics(399, 400, 1000).near_bottom(200));
        assert!(metrics(400, 400, 1000).near_bottom(200));
        assert!(metrics(590, 400, 1000).near_bottom(200));
    }

    #[test]
    fn short_content_is_always_near_bottom() {
        assert!(metrics(0, 400, 300).near_bottom(0));
    }
}
