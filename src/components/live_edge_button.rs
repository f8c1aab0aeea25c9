use yew::prelude::*;

use super::button::Button;
use super::seek_to_live::LiveEdgeState;
use crate::consts::{
    AT_LIVE_EDGE_CLASS, BUTTON_CLASS, CONTROL_CLASS, LIVE_TEXT, SEEK_TO_LIVE_CIRCLE_CLASS,
    SEEK_TO_LIVE_CLASS, SEEK_TO_LIVE_TEXT_CLASS,
};
use crate::language::Language;
use crate::services::{LiveTracker, Subscription, TrackerEvent};
use crate::utils::Rc;

/// The seek-to-live control for yew applications.
///
/// Behaves like [`LiveEdgeControl`]: the state is re-queried from the tracker on every
/// [`TrackerEvent::LiveEdgeChange`] notification and clicks only forward a seek request.
///
/// [`LiveEdgeControl`]: super::seek_to_live::LiveEdgeControl
pub struct LiveEdgeButton {
    watch: LiveEdgeWatch,
}

impl Component for LiveEdgeButton {
    type Message = Message;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let listener = ctx.link().callback(|()| Message::LiveEdgeChange);

        Self {
            watch: LiveEdgeWatch::new(ctx.props().tracker.clone(), listener),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Message::LiveEdgeChange => self.watch.refresh(),
            Message::Click => {
                self.watch.seek_to_live_edge();
                false
            }
        }
    }

    fn changed(&mut self, ctx: &Context<Self>) -> bool {
        let listener = ctx.link().callback(|()| Message::LiveEdgeChange);
        self.watch.set_tracker(ctx.props().tracker.clone(), listener);

        // The language may have changed instead.
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let language = &ctx.props().language;
        let state = self.watch.state();

        let mut classes = classes!(SEEK_TO_LIVE_CLASS, CONTROL_CLASS, BUTTON_CLASS);
        if state.is_at_live_edge() {
            classes.push(AT_LIVE_EDGE_CLASS);
        }

        let title = language.localize(state.label());
        let disabled = state.is_disabled();
        let onclick = ctx.link().callback(|()| Message::Click);

        html! {
            <Button {classes} {title} {disabled} {onclick}>
                <span class={SEEK_TO_LIVE_CIRCLE_CLASS} aria-hidden="true"></span>
                <span class={SEEK_TO_LIVE_TEXT_CLASS} aria-hidden="true">
                    { language.localize(LIVE_TEXT) }
                </span>
            </Button>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.watch.release();
    }
}

#[derive(Clone, PartialEq, Properties)]
pub struct Props {
    pub tracker: Rc<dyn LiveTracker>,
    #[prop_or_else(default_language)]
    pub language: Rc<Language>,
}

fn default_language() -> Rc<Language> {
    Rc::new(Language::new())
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Message {
    LiveEdgeChange,
    Click,
}

/// The live edge state last reported by a tracker, together with the subscription keeping
/// it current.
///
/// There is at most one subscription at any time: switching trackers releases the old
/// subscription before registering with the new tracker.
pub struct LiveEdgeWatch {
    tracker: Rc<dyn LiveTracker>,
    state: LiveEdgeState,
    subscription: Option<Subscription>,
}

impl LiveEdgeWatch {
    /// Queries the state of `tracker` and registers `listener` for
    /// [`TrackerEvent::LiveEdgeChange`]. The listener should call [`refresh`].
    ///
    /// [`refresh`]: Self::refresh
    pub fn new(tracker: Rc<dyn LiveTracker>, listener: Callback<()>) -> Self {
        let state = LiveEdgeState::query(&*tracker);
        let subscription = Subscription::new(
            Rc::to_std(&tracker),
            TrackerEvent::LiveEdgeChange,
            listener,
        );

        Self {
            tracker,
            state,
            subscription: Some(subscription),
        }
    }

    #[inline]
    pub fn state(&self) -> LiveEdgeState {
        self.state
    }

    /// Re-queries the tracker. Returns `true` if the state changed.
    pub fn refresh(&mut self) -> bool {
        let state = LiveEdgeState::query(&*self.tracker);
        log::debug!("Live edge changed: {:?}", state);

        if state == self.state {
            false
        } else {
            self.state = state;
            true
        }
    }

    /// Forwards a seek request to the tracker. The state is left as is.
    pub fn seek_to_live_edge(&self) {
        log::debug!("Seeking to live edge");

        self.tracker.seek_to_live_edge();
    }

    /// Moves the subscription to `tracker` and re-queries the state. Returns `false` without
    /// doing anything if `tracker` is the current tracker.
    pub fn set_tracker(&mut self, tracker: Rc<dyn LiveTracker>, listener: Callback<()>) -> bool {
        if tracker == self.tracker {
            return false;
        }

        self.release();

        self.subscription = Some(Subscription::new(
            Rc::to_std(&tracker),
            TrackerEvent::LiveEdgeChange,
            listener,
        ));
        self.state = LiveEdgeState::query(&*tracker);
        self.tracker = tracker;

        true
    }

    /// Removes the listener from the tracker. Does nothing if it was already removed.
    pub fn release(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.release();
        }
    }
}
