use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use yew::Callback;

use super::live_tracker::{LiveTracker, TrackerEvent};

#[wasm_bindgen]
extern "C" {
    /// A JavaScript live tracker object, e.g. `player.liveTracker` of a video.js player.
    pub type JsLiveTracker;

    #[wasm_bindgen(method, js_name = behindLiveEdge)]
    fn behind_live_edge(this: &JsLiveTracker) -> bool;

    #[wasm_bindgen(method, js_name = seekToLiveEdge)]
    fn seek_to_live_edge(this: &JsLiveTracker);

    #[wasm_bindgen(method)]
    fn on(this: &JsLiveTracker, event: &str, listener: &JsValue);

    #[wasm_bindgen(method)]
    fn off(this: &JsLiveTracker, event: &str, listener: &JsValue);
}

/// Adapts a [`JsLiveTracker`] to the [`LiveTracker`] trait.
///
/// Every registered [`Callback`] is wrapped in its own JavaScript function. The function is
/// kept until the callback is removed, so `off` hands the tracker the exact function that
/// `on` registered.
pub struct JsLiveTrackerBinding {
    inner: JsLiveTracker,
    registrations: RefCell<Vec<Registration>>,
}

struct Registration {
    event: TrackerEvent,
    callback: Callback<()>,
    closure: Closure<dyn Fn()>,
}

impl JsLiveTrackerBinding {
    pub fn new(inner: JsLiveTracker) -> Self {
        Self {
            inner,
            registrations: RefCell::new(Vec::new()),
        }
    }
}

impl LiveTracker for JsLiveTrackerBinding {
    #[inline]
    fn behind_live_edge(&self) -> bool {
        self.inner.behind_live_edge()
    }

    #[inline]
    fn seek_to_live_edge(&self) {
        self.inner.seek_to_live_edge();
    }

    fn on(&self, event: TrackerEvent, listener: Callback<()>) {
        let closure = {
            let listener = listener.clone();
            Closure::wrap(Box::new(move || listener.emit(())) as Box<dyn Fn()>)
        };

        self.inner.on(event.as_str(), closure.as_ref());

        self.registrations.borrow_mut().push(Registration {
            event,
            callback: listener,
            closure,
        });
    }

    fn off(&self, event: TrackerEvent, listener: &Callback<()>) {
        let registration = {
            let mut registrations = self.registrations.borrow_mut();

            match registrations
                .iter()
                .position(|reg| reg.event == event && reg.callback == *listener)
            {
                Some(index) => registrations.remove(index),
                None => {
                    log::trace!("No listener registered for {}", event);
                    return;
                }
            }
        };

        self.inner
            .off(registration.event.as_str(), registration.closure.as_ref());
    }
}

impl Drop for JsLiveTrackerBinding {
    fn drop(&mut self) {
        for reg in self.registrations.get_mut().drain(..) {
            self.inner.off(reg.event.as_str(), reg.closure.as_ref());
        }
    }
}
