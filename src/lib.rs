//! A seek-to-live-edge control for web media player control bars.
//!
//! [`LiveEdgeControl`] mirrors the live edge status reported by a [`LiveTracker`] and asks
//! the tracker to seek to the live edge when activated. [`ControlBar`] assembles the
//! configured controls, and [`run`] mounts a control bar from JavaScript.
//!
//! [`LiveEdgeControl`]: components::LiveEdgeControl
//! [`LiveTracker`]: services::LiveTracker
//! [`ControlBar`]: components::ControlBar

pub mod components;
pub mod config;
mod consts;
pub mod dom;
mod error;
pub mod language;
mod logger;
pub mod services;
pub mod utils;

use std::rc::Rc;

use wasm_bindgen::prelude::*;

pub use config::Config;
pub use error::Error;

use components::ControlBar;
use dom::{Document, Element};
use services::{JsLiveTracker, JsLiveTrackerBinding, LiveTracker};

/// Mounts a control bar for the player owning `tracker`.
///
/// `config` is deserialized into a [`Config`].
#[wasm_bindgen]
pub fn run(config: JsValue, tracker: JsLiveTracker) -> Result<MountedControlBar, JsValue> {
    let config: Config = serde_wasm_bindgen::from_value(config).map_err(Error::from)?;

    let tracker = Rc::new(JsLiveTrackerBinding::new(tracker));
    let bar = run_with_config(config, tracker)?;

    Ok(MountedControlBar { bar: Some(bar) })
}

pub fn run_with_config(config: Config, tracker: Rc<dyn LiveTracker>) -> Result<ControlBar, Error> {
    let document = Document::global()?;

    // SAFETY: Called from a single threaded context. No race conditions can occur.
    unsafe {
        logger::init(config.log_level);
    }

    let mountpoint = mountpoint(&document, &config)?;

    let language = Rc::new(config.language.clone());
    let bar = ControlBar::new(&document, &config, tracker, language)?;
    mountpoint.append_child(bar.el())?;

    log::info!("Mounted control bar with {} controls", bar.controls().len());

    Ok(bar)
}

/// Returns the element configured by [`Config::mountpoint`], or `<body>` if there is none.
fn mountpoint(document: &Document, config: &Config) -> Result<Element, Error> {
    match &config.mountpoint {
        Some(id) => match document.get_element_by_id(id) {
            Some(element) => Ok(element),
            None => {
                log::error!("Cannot find element with id {}", id);
                Err(Error::MountpointNotFound(id.clone()))
            }
        },
        None => document.body(),
    }
}

/// A control bar mounted by [`run`].
#[wasm_bindgen]
pub struct MountedControlBar {
    bar: Option<ControlBar>,
}

#[wasm_bindgen]
impl MountedControlBar {
    /// Removes the control bar and stops tracking the live edge. Calling `dispose` again has
    /// no effect.
    pub fn dispose(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.dispose();
            log::info!("Disposed control bar");
        }
    }
}

/// Mounts a yew rendered seek-to-live button for the player owning `tracker`.
#[cfg(target_family = "wasm")]
#[wasm_bindgen]
pub fn run_yew(config: JsValue, tracker: JsLiveTracker) -> Result<MountedButton, JsValue> {
    use components::live_edge_button::{LiveEdgeButton, Props};

    let config: Config = serde_wasm_bindgen::from_value(config).map_err(Error::from)?;

    let document = Document::global()?;

    // SAFETY: Called from a single threaded context. No race conditions can occur.
    unsafe {
        logger::init(config.log_level);
    }

    let element = mountpoint(&document, &config)?;

    let tracker: Rc<dyn LiveTracker> = Rc::new(JsLiveTrackerBinding::new(tracker));
    let props = Props {
        tracker: tracker.into(),
        language: utils::Rc::new(config.language),
    };

    let handle =
        yew::start_app_with_props_in_element::<LiveEdgeButton>(element.as_web_sys().clone(), props);

    Ok(MountedButton {
        handle: Some(handle),
    })
}

/// A seek-to-live button mounted by [`run_yew`].
#[cfg(target_family = "wasm")]
#[wasm_bindgen]
pub struct MountedButton {
    handle: Option<yew::AppHandle<components::LiveEdgeButton>>,
}

#[cfg(target_family = "wasm")]
#[wasm_bindgen]
impl MountedButton {
    pub fn dispose(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.destroy();
        }
    }
}
