//! The live-position authority consumed by the seek-to-live controls.
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::rc::Rc;

use yew::Callback;

/// Notifications emitted by a [`LiveTracker`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TrackerEvent {
    /// The tracker's assessment of whether playback is behind the live edge has flipped. The
    /// notification carries no state; receivers must query [`LiveTracker::behind_live_edge`].
    LiveEdgeChange,
}

impl TrackerEvent {
    /// Returns the event type name as used by the JavaScript player.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LiveEdgeChange => "liveedgechange",
        }
    }
}

impl Display for TrackerEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks the live edge of the current stream.
///
/// Listeners are identified by the [`Callback`] passed to [`on`]. A call to [`off`] only
/// removes a listener when given a clone of the same `Callback`; a new callback wrapping the
/// same function is a different listener.
///
/// [`on`]: Self::on
/// [`off`]: Self::off
pub trait LiveTracker {
    /// Returns `true` if playback currently lags behind the live edge.
    fn behind_live_edge(&self) -> bool;

    /// Requests playback to catch up with the live edge. Completion is reported
    /// asynchronously through [`TrackerEvent::LiveEdgeChange`].
    fn seek_to_live_edge(&self);

    fn on(&self, event: TrackerEvent, listener: Callback<()>);

    fn off(&self, event: TrackerEvent, listener: &Callback<()>);
}

/// A listener registered with a [`LiveTracker`].
///
/// The listener is removed when the `Subscription` is dropped or released.
#[must_use = "the listener is removed when dropped"]
pub struct Subscription {
    tracker: Rc<dyn LiveTracker>,
    event: TrackerEvent,
    listener: Callback<()>,
}

impl Subscription {
    /// Registers `listener` for `event` with `tracker`.
    pub fn new(tracker: Rc<dyn LiveTracker>, event: TrackerEvent, listener: Callback<()>) -> Self {
        log::debug!("Subscribing to {}", event);

        tracker.on(event, listener.clone());

        Self {
            tracker,
            event,
            listener,
        }
    }

    /// Removes the listener from the tracker.
    #[inline]
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        log::debug!("Unsubscribing from {}", self.event);

        self.tracker.off(self.event, &self.listener);
    }
}

/// A [`LiveTracker`] whose live state is pushed in by the host.
///
/// Setting a new state through [`set_behind_live_edge`] notifies all
/// [`TrackerEvent::LiveEdgeChange`] listeners if the state changed. Seek requests are counted
/// and forwarded to the handler installed with [`set_seek_handler`].
///
/// [`set_behind_live_edge`]: Self::set_behind_live_edge
/// [`set_seek_handler`]: Self::set_seek_handler
#[derive(Debug, Default)]
pub struct ManualLiveTracker {
    behind: Cell<bool>,
    listeners: RefCell<ListenerList>,
    seek_handler: RefCell<Option<Callback<()>>>,
    seeks: Cell<usize>,
}

impl ManualLiveTracker {
    pub fn new(behind_live_edge: bool) -> Self {
        Self {
            behind: Cell::new(behind_live_edge),
            ..Default::default()
        }
    }

    pub fn set_behind_live_edge(&self, behind_live_edge: bool) {
        if self.behind.replace(behind_live_edge) != behind_live_edge {
            log::debug!("Behind live edge: {}", behind_live_edge);

            self.trigger(TrackerEvent::LiveEdgeChange);
        }
    }

    /// Calls all listeners of `event`, whether the state changed or not.
    pub fn trigger(&self, event: TrackerEvent) {
        // Listeners may register or remove listeners while being called.
        let listeners = self.listeners.borrow().get(event);

        log::trace!("Triggering {} on {} listeners", event, listeners.len());

        for listener in listeners {
            listener.emit(());
        }
    }

    /// Sets the handler called on every [`LiveTracker::seek_to_live_edge`] request.
    pub fn set_seek_handler(&self, handler: Callback<()>) {
        *self.seek_handler.borrow_mut() = Some(handler);
    }

    /// Returns the number of seek requests received so far.
    #[inline]
    pub fn seek_count(&self) -> usize {
        self.seeks.get()
    }

    /// Returns the number of listeners currently registered for `event`.
    pub fn listener_count(&self, event: TrackerEvent) -> usize {
        self.listeners.borrow().get(event).len()
    }
}

impl LiveTracker for ManualLiveTracker {
    #[inline]
    fn behind_live_edge(&self) -> bool {
        self.behind.get()
    }

    fn seek_to_live_edge(&self) {
        self.seeks.set(self.seeks.get() + 1);

        let handler = self.seek_handler.borrow().clone();
        if let Some(handler) = handler {
            handler.emit(());
        }
    }

    fn on(&self, event: TrackerEvent, listener: Callback<()>) {
        self.listeners.borrow_mut().push(event, listener);
    }

    fn off(&self, event: TrackerEvent, listener: &Callback<()>) {
        self.listeners.borrow_mut().remove(event, listener);
    }
}

#[derive(Debug, Default)]
struct ListenerList {
    // Listeners in registered order.
    list: BTreeMap<usize, (TrackerEvent, Callback<()>)>,
    id: usize,
}

impl ListenerList {
    fn push(&mut self, event: TrackerEvent, listener: Callback<()>) {
        let id = self.id;
        self.id += 1;
        self.list.insert(id, (event, listener));
    }

    /// Removes the first registration of `listener` for `event`.
    fn remove(&mut self, event: TrackerEvent, listener: &Callback<()>) {
        let id = self
            .list
            .iter()
            .find(|(_, (ev, cb))| *ev == event && cb == listener)
            .map(|(id, _)| *id);

        match id {
            Some(id) => {
                self.list.remove(&id);
            }
            None => log::trace!("No listener registered for {}", event),
        }
    }

    fn get(&self, event: TrackerEvent) -> Vec<Callback<()>> {
        self.list
            .values()
            .filter(|(ev, _)| *ev == event)
            .map(|(_, cb)| cb.clone())
            .collect()
    }
}
