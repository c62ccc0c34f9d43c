#![forbid(unsafe_code)]

//! Browser binding for the `folio` page-behavior engine.
//!
//! This crate is host-specific (web/WASM). It queries the page markup once, wires the
//! listeners the engine asks for, translates native events into `folio::PageEvent`s, arms a
//! single timeout for the engine's next deadline and applies the resulting effects to the
//! DOM.
//!
//! JS usage, from a module script (runs after the document is parsed):
//!
//! ```js
//! import init, { start } from "./folio_web.js";
//! await init();
//! start();
//! ```

pub mod config;
mod error;
pub mod selectors;

#[cfg(target_arch = "wasm32")]
mod wasm;


pub use config::parse_options;
pub use error::WebError;

#[cfg(target_arch = "wasm32")]
pub use wasm::{start, start_with_config, stop};
