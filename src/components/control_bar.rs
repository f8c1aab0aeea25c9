use std::rc::Rc;

use super::seek_to_live::LiveEdgeControl;
use crate::config::{Config, ControlName};
use crate::consts::CONTROL_BAR_CLASS;
use crate::dom::{Document, Element};
use crate::language::Language;
use crate::services::LiveTracker;
use crate::Error;

/// A control constructed by a [`ControlBar`].
pub enum BarControl {
    SeekToLive(LiveEdgeControl),
}

impl BarControl {
    #[inline]
    pub fn name(&self) -> ControlName {
        match self {
            Self::SeekToLive(_) => ControlName::SeekToLive,
        }
    }

    pub fn el(&self) -> Option<Element> {
        match self {
            Self::SeekToLive(control) => control.el(),
        }
    }

    fn dispose(self) {
        match self {
            Self::SeekToLive(control) => control.dispose(),
        }
    }
}

/// The container of the player controls.
///
/// Controls are constructed from [`ControlBarConfig::children`] and appended in the
/// configured order.
///
/// [`ControlBarConfig::children`]: crate::config::ControlBarConfig::children
pub struct ControlBar {
    el: Element,
    controls: Vec<BarControl>,
}

impl ControlBar {
    pub fn new(
        document: &Document,
        config: &Config,
        tracker: Rc<dyn LiveTracker>,
        language: Rc<Language>,
    ) -> Result<Self, Error> {
        let el = document.create_element("div")?;
        el.set_attribute("class", CONTROL_BAR_CLASS);
        el.set_attribute("dir", "ltr");

        let mut this = Self {
            el,
            controls: Vec::with_capacity(config.control_bar.children.len()),
        };

        for name in &config.control_bar.children {
            log::debug!("Creating control {:?}", name);

            let control = match name {
                ControlName::SeekToLive => BarControl::SeekToLive(LiveEdgeControl::new(
                    document,
                    tracker.clone(),
                    &config.seek_to_live,
                    language.clone(),
                )?),
            };

            if let Some(child) = control.el() {
                this.el.append_child(&child)?;
            }

            this.controls.push(control);
        }

        Ok(this)
    }

    #[inline]
    pub fn el(&self) -> &Element {
        &self.el
    }

    #[inline]
    pub fn controls(&self) -> &[BarControl] {
        &self.controls
    }

    /// Disposes all controls in reverse order and detaches the bar from the document.
    pub fn dispose(mut self) {
        while let Some(control) = self.controls.pop() {
            control.dispose();
        }

        self.el.remove();
    }
}
