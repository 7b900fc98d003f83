//! Platform layer
//!
//! - `web`: wasm-bindgen surface driven by the page's frame loop
//! - `native`: log-backed cue sink for the CLI

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use native::LogCues;
#[cfg(target_arch = "wasm32")]
pub use web::WebBowling;
