use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Configuration passed to [`run`](crate::run) by the embedding page.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Id of the element the control bar is appended to. `None` mounts it at `<body>`.
    pub mountpoint: Option<String>,
    pub log_level: LevelFilter,
    pub language: Language,
    pub control_bar: ControlBarConfig,
    pub seek_to_live: ControlOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mountpoint: None,
            log_level: LevelFilter::Info,
            language: Language::default(),
            control_bar: ControlBarConfig::default(),
            seek_to_live: ControlOptions::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControlBarConfig {
    /// Controls of the bar in display order.
    pub children: Vec<ControlName>,
}

impl Default for ControlBarConfig {
    fn default() -> Self {
        Self {
            children: vec![ControlName::SeekToLive],
        }
    }
}

/// Names of the controls a [`ControlBar`](crate::components::control_bar::ControlBar) can
/// construct.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ControlName {
    SeekToLive,
}

/// Options recognized by every activatable control.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControlOptions {
    /// Additional space separated classes for the root element.
    pub class_name: Option<String>,
    /// Control text used until the control sets its own.
    pub control_text: Option<String>,
}
