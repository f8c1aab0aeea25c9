pub mod button;
pub mod control;
pub mod control_bar;
pub mod live_edge_button;
pub mod seek_to_live;

pub use control_bar::ControlBar;
pub use live_edge_button::LiveEdgeButton;
pub use seek_to_live::{LiveEdgeControl, LiveEdgeState};
