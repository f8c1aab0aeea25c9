//! Class names and default strings shared by the player controls.

pub const CONTROL_CLASS: &str = "vjs-control";
pub const BUTTON_CLASS: &str = "vjs-button";
pub const CONTROL_TEXT_CLASS: &str = "vjs-control-text";
pub const CONTROL_BAR_CLASS: &str = "vjs-control-bar";

pub const SEEK_TO_LIVE_CLASS: &str = "vjs-seek-to-live-control";
pub const SEEK_TO_LIVE_TEXT_CLASS: &str = "vjs-seek-to-live-text";
pub const SEEK_TO_LIVE_CIRCLE_CLASS: &str = "vjs-seek-to-live-circle";

/// Applied to the seek-to-live control while playback follows the live edge.
pub const AT_LIVE_EDGE_CLASS: &str = "vjs-at-live-edge";

pub const LIVE_TEXT: &str = "LIVE";
pub const SEEK_TO_LIVE_LABEL: &str = "Seek To LIVE edge";
pub const AT_LIVE_EDGE_LABEL: &str = "At LIVE edge";

/// Control text shown before the first status update is applied.
pub const DEFAULT_CONTROL_TEXT: &str = "Seek to LIVE edge";
