mod js_tracker;
pub mod live_tracker;

pub use js_tracker::{JsLiveTracker, JsLiveTrackerBinding};
pub use live_tracker::{LiveTracker, ManualLiveTracker, Subscription, TrackerEvent};
