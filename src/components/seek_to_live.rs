use std::cell::RefCell;
use std::rc::{Rc, Weak};

use yew::Callback;

use super::control::Control;
use crate::config::ControlOptions;
use crate::consts::{
    AT_LIVE_EDGE_CLASS, AT_LIVE_EDGE_LABEL, DEFAULT_CONTROL_TEXT, LIVE_TEXT,
    SEEK_TO_LIVE_CIRCLE_CLASS, SEEK_TO_LIVE_CLASS, SEEK_TO_LIVE_LABEL, SEEK_TO_LIVE_TEXT_CLASS,
};
use crate::dom::{Document, Element};
use crate::language::Language;
use crate::services::{LiveTracker, Subscription, TrackerEvent};
use crate::Error;

/// The two states of a seek-to-live control.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LiveEdgeState {
    /// Playback lags behind the live edge. The control is enabled and seeks on activation.
    BehindEdge,
    /// Playback follows the live edge. The control is disabled.
    AtEdge,
}

impl LiveEdgeState {
    #[inline]
    pub fn from_behind(behind_live_edge: bool) -> Self {
        if behind_live_edge {
            Self::BehindEdge
        } else {
            Self::AtEdge
        }
    }

    /// Returns the current state reported by `tracker`.
    #[inline]
    pub fn query(tracker: &dyn LiveTracker) -> Self {
        Self::from_behind(tracker.behind_live_edge())
    }

    #[inline]
    pub fn is_at_live_edge(self) -> bool {
        matches!(self, Self::AtEdge)
    }

    /// Returns `true` if the control must not accept activation in this state.
    #[inline]
    pub fn is_disabled(self) -> bool {
        self.is_at_live_edge()
    }

    /// Returns the (unlocalized) control text for this state.
    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            Self::BehindEdge => SEEK_TO_LIVE_LABEL,
            Self::AtEdge => AT_LIVE_EDGE_LABEL,
        }
    }
}

/// A control bar button showing whether playback follows the live edge and seeking to it
/// when activated.
///
/// The displayed state is derived from the [`LiveTracker`] alone: it is applied on
/// construction and then on every [`TrackerEvent::LiveEdgeChange`] notification, always by
/// re-querying [`LiveTracker::behind_live_edge`]. Activating the control only forwards a
/// seek request to the tracker; the outcome arrives as a later notification.
pub struct LiveEdgeControl {
    inner: Rc<RefCell<Inner>>,
    tracker: Rc<dyn LiveTracker>,
    subscription: Option<Subscription>,
}

struct Inner {
    control: Option<Control>,
    indicator_el: Option<Element>,
    text_el: Option<Element>,
}

impl LiveEdgeControl {
    pub fn new(
        document: &Document,
        tracker: Rc<dyn LiveTracker>,
        options: &ControlOptions,
        language: Rc<Language>,
    ) -> Result<Self, Error> {
        let (mut control, indicator_el, text_el) = Self::create_el(document, options, language)?;

        let onactivate = {
            let tracker = tracker.clone();
            Callback::from(move |()| handle_click(&*tracker))
        };
        control.on_activate(onactivate);

        let inner = Rc::new(RefCell::new(Inner {
            control: Some(control),
            indicator_el: Some(indicator_el),
            text_el: Some(text_el),
        }));

        let mut this = Self {
            inner,
            tracker,
            subscription: None,
        };

        this.update_live_edge_status();

        // The listener must not keep the control alive: it only holds weak references.
        let listener = {
            let inner = Rc::downgrade(&this.inner);
            let tracker = Rc::downgrade(&this.tracker);

            Callback::from(move |()| on_live_edge_change(&inner, &tracker))
        };

        this.subscription = Some(Subscription::new(
            this.tracker.clone(),
            TrackerEvent::LiveEdgeChange,
            listener,
        ));

        Ok(this)
    }

    /// Creates the control element with the indicator and text nodes appended in that order.
    fn create_el(
        document: &Document,
        options: &ControlOptions,
        language: Rc<Language>,
    ) -> Result<(Control, Element, Element), Error> {
        let control = Control::new(
            document,
            SEEK_TO_LIVE_CLASS,
            DEFAULT_CONTROL_TEXT,
            options,
            language,
        )?;

        let indicator_el = document.create_element("span")?;
        indicator_el.set_attribute("class", SEEK_TO_LIVE_CIRCLE_CLASS);
        indicator_el.set_attribute("aria-hidden", "true");

        let text_el = document.create_element("span")?;
        text_el.set_attribute("class", SEEK_TO_LIVE_TEXT_CLASS);
        text_el.set_attribute("aria-hidden", "true");
        text_el.set_text(&control.localize(LIVE_TEXT));

        control.el().append_child(&indicator_el)?;
        control.el().append_child(&text_el)?;

        Ok((control, indicator_el, text_el))
    }

    /// Returns the root element of the control.
    pub fn el(&self) -> Option<Element> {
        let inner = self.inner.borrow();
        inner.control.as_ref().map(|control| control.el().clone())
    }

    pub fn indicator_el(&self) -> Option<Element> {
        self.inner.borrow().indicator_el.clone()
    }

    pub fn text_el(&self) -> Option<Element> {
        self.inner.borrow().text_el.clone()
    }

    /// Returns `true` if the tracker currently reports playback at the live edge.
    #[inline]
    pub fn is_at_live_edge(&self) -> bool {
        LiveEdgeState::query(&*self.tracker).is_at_live_edge()
    }

    /// Applies the state currently reported by the tracker.
    pub fn update_live_edge_status(&self) {
        self.inner.borrow().apply(LiveEdgeState::query(&*self.tracker));
    }

    /// Requests the tracker to seek to the live edge. The displayed state is left as is.
    #[inline]
    pub fn handle_click(&self) {
        handle_click(&*self.tracker);
    }

    /// Stops tracking the live edge and releases the control's elements.
    pub fn dispose(mut self) {
        self.release();
    }

    fn release(&mut self) {
        // Deregister before the elements go away so no notification reaches a half torn down
        // control.
        let subscription = match self.subscription.take() {
            Some(subscription) => subscription,
            None => return,
        };
        subscription.release();

        let control = {
            let mut inner = self.inner.borrow_mut();
            inner.text_el = None;
            inner.indicator_el = None;
            inner.control.take()
        };

        if let Some(control) = control {
            control.dispose();
        }
    }
}

impl Drop for LiveEdgeControl {
    fn drop(&mut self) {
        self.release();
    }
}

impl Inner {
    fn apply(&self, state: LiveEdgeState) {
        let control = match &self.control {
            Some(control) => control,
            None => return,
        };

        log::trace!("Applying live edge state {:?}", state);

        match state {
            LiveEdgeState::BehindEdge => {
                control.set_aria_disabled(false);
                control.remove_class(AT_LIVE_EDGE_CLASS);
                control.control_text(state.label());
            }
            LiveEdgeState::AtEdge => {
                control.add_class(AT_LIVE_EDGE_CLASS);
                control.control_text(state.label());
                control.set_aria_disabled(true);
            }
        }
    }
}

fn on_live_edge_change(inner: &Weak<RefCell<Inner>>, tracker: &Weak<dyn LiveTracker>) {
    let (inner, tracker) = match (inner.upgrade(), tracker.upgrade()) {
        (Some(inner), Some(tracker)) => (inner, tracker),
        _ => return,
    };

    let state = LiveEdgeState::query(&*tracker);
    log::debug!("Live edge changed: {:?}", state);

    inner.borrow().apply(state);
}

fn handle_click(tracker: &dyn LiveTracker) {
    log::debug!("Seeking to live edge");

    tracker.seek_to_live_edge();
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use yew::Callback;

    use super::{LiveEdgeControl, LiveEdgeState};
    use crate::config::ControlOptions;
    use crate::dom::{Document, Element};
    use crate::language::Language;
    use crate::services::{LiveTracker, ManualLiveTracker, TrackerEvent};

    /// Counts how often the live state is queried.
    struct CountingTracker {
        inner: ManualLiveTracker,
        queries: Cell<usize>,
    }

    impl CountingTracker {
        fn new(behind_live_edge: bool) -> Rc<Self> {
            Rc::new(Self {
                inner: ManualLiveTracker::new(behind_live_edge),
                queries: Cell::new(0),
            })
        }
    }

    impl LiveTracker for CountingTracker {
        fn behind_live_edge(&self) -> bool {
            self.queries.set(self.queries.get() + 1);
            self.inner.behind_live_edge()
        }

        fn seek_to_live_edge(&self) {
            self.inner.seek_to_live_edge();
        }

        fn on(&self, event: TrackerEvent, listener: Callback<()>) {
            self.inner.on(event, listener);
        }

        fn off(&self, event: TrackerEvent, listener: &Callback<()>) {
            self.inner.off(event, listener);
        }
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Snapshot {
        aria_disabled: Option<String>,
        at_live_edge: bool,
        label: String,
        title: Option<String>,
    }

    fn snapshot(el: &Element) -> Snapshot {
        Snapshot {
            aria_disabled: el.attribute("aria-disabled"),
            at_live_edge: el.has_class("vjs-at-live-edge"),
            label: el.children()[0].text(),
            title: el.attribute("title"),
        }
    }

    fn create(tracker: Rc<dyn LiveTracker>) -> LiveEdgeControl {
        LiveEdgeControl::new(
            &Document::new(),
            tracker,
            &ControlOptions::default(),
            Rc::new(Language::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_live_edge_state() {
        assert_eq!(LiveEdgeState::from_behind(true), LiveEdgeState::BehindEdge);
        assert_eq!(LiveEdgeState::from_behind(false), LiveEdgeState::AtEdge);

        for behind in [true, false] {
            let state = LiveEdgeState::from_behind(behind);
            assert_eq!(state.is_disabled(), !behind);
            assert_eq!(state.is_at_live_edge(), !behind);
        }

        assert_eq!(LiveEdgeState::BehindEdge.label(), "Seek To LIVE edge");
        assert_eq!(LiveEdgeState::AtEdge.label(), "At LIVE edge");
    }

    #[test]
    fn test_create_el() {
        let tracker = Rc::new(ManualLiveTracker::new(true));
        let control = create(tracker);

        let el = control.el().unwrap();
        assert_eq!(el.attribute("type").as_deref(), Some("button"));
        assert!(el.has_class("vjs-seek-to-live-control"));
        assert!(el.has_class("vjs-control"));

        let children = el.children();
        assert_eq!(children.len(), 3);
        assert!(children[0].has_class("vjs-control-text"));

        let indicator = control.indicator_el().unwrap();
        assert!(children[1].same_node(&indicator));
        assert!(indicator.has_class("vjs-seek-to-live-circle"));
        assert_eq!(indicator.attribute("aria-hidden").as_deref(), Some("true"));

        let text = control.text_el().unwrap();
        assert!(children[2].same_node(&text));
        assert!(text.has_class("vjs-seek-to-live-text"));
        assert_eq!(text.attribute("aria-hidden").as_deref(), Some("true"));
        assert_eq!(text.text(), "LIVE");
    }

    #[test]
    fn test_create_el_localized() {
        let tracker = Rc::new(ManualLiveTracker::new(false));

        let mut language = Language::new();
        language.insert("LIVE", "DIREKT");
        language.insert("At LIVE edge", "Live");

        let control = LiveEdgeControl::new(
            &Document::new(),
            tracker,
            &ControlOptions::default(),
            Rc::new(language),
        )
        .unwrap();

        assert_eq!(control.text_el().unwrap().text(), "DIREKT");
        assert_eq!(snapshot(&control.el().unwrap()).label, "Live");
    }

    #[test]
    fn test_behind_at_construction() {
        let tracker = Rc::new(ManualLiveTracker::new(true));
        let control = create(tracker);

        let el = control.el().unwrap();
        assert_eq!(
            snapshot(&el),
            Snapshot {
                aria_disabled: Some(String::from("false")),
                at_live_edge: false,
                label: String::from("Seek To LIVE edge"),
                title: Some(String::from("Seek To LIVE edge")),
            }
        );
        assert!(!control.is_at_live_edge());
    }

    #[test]
    fn test_notification_reaches_live_edge() {
        let tracker = Rc::new(ManualLiveTracker::new(true));
        let control = create(tracker.clone());

        tracker.set_behind_live_edge(false);

        let el = control.el().unwrap();
        assert_eq!(
            snapshot(&el),
            Snapshot {
                aria_disabled: Some(String::from("true")),
                at_live_edge: true,
                label: String::from("At LIVE edge"),
                title: Some(String::from("At LIVE edge")),
            }
        );
        assert!(control.is_at_live_edge());

        tracker.set_behind_live_edge(true);
        assert_eq!(snapshot(&el).aria_disabled.as_deref(), Some("false"));
        assert!(!snapshot(&el).at_live_edge);
    }

    #[test]
    fn test_click_is_decoupled_from_state() {
        let tracker = Rc::new(ManualLiveTracker::new(true));
        let control = create(tracker.clone());

        let el = control.el().unwrap();
        let before = snapshot(&el);

        control.handle_click();
        assert_eq!(tracker.seek_count(), 1);
        assert_eq!(snapshot(&el), before);

        el.activate();
        assert_eq!(tracker.seek_count(), 2);
        assert_eq!(snapshot(&el), before);
    }

    #[test]
    fn test_seek_outcome_arrives_by_notification() {
        let tracker = Rc::new(ManualLiveTracker::new(true));
        let control = create(tracker.clone());
        let el = control.el().unwrap();

        // The player reaches the live edge some time after the request.
        el.activate();
        assert!(!snapshot(&el).at_live_edge);

        tracker.set_behind_live_edge(false);
        assert!(snapshot(&el).at_live_edge);
    }

    #[test]
    fn test_activation_ignored_at_live_edge() {
        let tracker = Rc::new(ManualLiveTracker::new(false));
        let control = create(tracker.clone());

        control.el().unwrap().activate();
        assert_eq!(tracker.seek_count(), 0);
    }

    #[test]
    fn test_update_idempotent() {
        for behind in [true, false] {
            let tracker = Rc::new(ManualLiveTracker::new(behind));
            let control = create(tracker.clone());
            let el = control.el().unwrap();

            let first = snapshot(&el);
            for _ in 0..3 {
                control.update_live_edge_status();
                tracker.trigger(TrackerEvent::LiveEdgeChange);
                assert_eq!(snapshot(&el), first);
            }

            let class = el.attribute("class").unwrap();
            assert_eq!(
                class.matches("vjs-at-live-edge").count(),
                usize::from(!behind)
            );
        }
    }

    #[test]
    fn test_notification_requeries_tracker() {
        let tracker = CountingTracker::new(true);
        let control = create(tracker.clone());
        let queries = tracker.queries.get();

        tracker.inner.trigger(TrackerEvent::LiveEdgeChange);
        assert_eq!(tracker.queries.get(), queries + 1);

        control.update_live_edge_status();
        assert_eq!(tracker.queries.get(), queries + 2);
    }

    #[test]
    fn test_nodes_created_once() {
        let tracker = Rc::new(ManualLiveTracker::new(true));
        let control = create(tracker.clone());

        let el = control.el().unwrap();
        let children = el.children();

        tracker.set_behind_live_edge(false);
        tracker.set_behind_live_edge(true);
        tracker.set_behind_live_edge(false);

        let after = el.children();
        assert_eq!(children.len(), after.len());
        for (before, after) in children.iter().zip(after.iter()) {
            assert!(before.same_node(after));
        }
        assert!(control.el().unwrap().same_node(&el));
        assert!(control.text_el().unwrap().same_node(&children[2]));
    }

    #[test]
    fn test_single_subscription() {
        let tracker = Rc::new(ManualLiveTracker::new(true));

        let control = create(tracker.clone());
        assert_eq!(tracker.listener_count(TrackerEvent::LiveEdgeChange), 1);

        control.dispose();
        assert_eq!(tracker.listener_count(TrackerEvent::LiveEdgeChange), 0);
    }

    #[test]
    fn test_no_notification_after_dispose() {
        let tracker = CountingTracker::new(true);
        let control = create(tracker.clone());

        let el = control.el().unwrap();
        let body = Document::new().body().unwrap();
        body.append_child(&el).unwrap();

        control.dispose();
        assert!(body.children().is_empty());

        let queries = tracker.queries.get();
        tracker.inner.set_behind_live_edge(false);
        assert_eq!(tracker.queries.get(), queries);

        // The detached element keeps the last applied state.
        assert_eq!(el.attribute("aria-disabled").as_deref(), Some("false"));

        el.activate();
        assert_eq!(tracker.inner.seek_count(), 0);
    }

    #[test]
    fn test_drop_releases_subscription() {
        let tracker = Rc::new(ManualLiveTracker::new(true));

        let control = create(tracker.clone());
        drop(control);

        assert_eq!(tracker.listener_count(TrackerEvent::LiveEdgeChange), 0);
    }

    #[test]
    fn test_multiple_controls() {
        let tracker = Rc::new(ManualLiveTracker::new(true));

        let first = create(tracker.clone());
        let second = create(tracker.clone());
        assert_eq!(tracker.listener_count(TrackerEvent::LiveEdgeChange), 2);

        first.dispose();
        assert_eq!(tracker.listener_count(TrackerEvent::LiveEdgeChange), 1);

        tracker.set_behind_live_edge(false);
        assert!(second.el().unwrap().has_class("vjs-at-live-edge"));
    }
}
