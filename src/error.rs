use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    Config(#[from] serde_wasm_bindgen::Error),
    #[error("dom operation failed: {0}")]
    Dom(String),
    #[error("cannot find element with id {0:?}")]
    MountpointNotFound(String),
}

impl Error {
    /// Wraps a value thrown by a web API.
    #[cfg_attr(not(target_family = "wasm"), allow(unused))]
    pub(crate) fn dom(value: JsValue) -> Self {
        match value.as_string() {
            Some(msg) => Self::Dom(msg),
            None => Self::Dom(format!("{:?}", value)),
        }
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
