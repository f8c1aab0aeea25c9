//! Element handles used by the controls.
//!
//! On `wasm` targets [`Document`] and [`Element`] wrap live `web_sys` nodes. On every other
//! target they wrap an in-memory node tree with the same API, which lets the controls run
//! (and be tested) outside of a browser.
//!
//! All mutating methods take `&self`: handles are cheap to clone and share the underlying node.

#[cfg(not(target_family = "wasm"))]
mod memory;
#[cfg(target_family = "wasm")]
mod web;

#[cfg(not(target_family = "wasm"))]
pub use memory::{ActivationListener, Document, Element};
#[cfg(target_family = "wasm")]
pub use web::{ActivationListener, Document, Element};
