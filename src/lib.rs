//! Survivor Bank core crate.
//!
//! A Player 456 themed banking dashboard for the browser. The game and session
//! logic (`view`, `stats`, `games`, `market`, `keys`) is plain Rust driven by
//! `Dashboard`, which renders through the `Surface` trait; `dom` binds that to
//! the page with web-sys. Everything except `dom` runs natively for tests.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod dashboard;
pub mod error;
pub mod games;
pub mod keys;
pub mod market;
pub mod messages;
pub mod stats;
pub mod surface;
pub mod view;

mod dom;
mod logging;

pub use config::DashboardConfig;
pub use dashboard::{ChallengeInput, Dashboard};
pub use error::{ConfigError, DashboardError};
pub use games::{GameId, GameStatus, Outcome, Resolution};
pub use stats::PlayerStats;
pub use surface::{Capability, Surface};
pub use view::{AppState, View};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init();
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Binds the dashboard to the current page with the stock configuration.
#[wasm_bindgen]
pub fn start_dashboard() -> Result<(), JsValue> {
    dom::start(DashboardConfig::default()).map_err(JsValue::from)
}

/// Same as `start_dashboard`, with a JSON `DashboardConfig` (missing fields keep defaults).
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_dashboard_with_config(json: &str) -> Result<(), JsValue> {
    let cfg = DashboardConfig::from_json(json).map_err(DashboardError::from)?;
    dom::start(cfg).map_err(JsValue::from)
}

/// Shows a one-off alert overlay; usable before or without `start_dashboard`.
#[wasm_bindgen]
pub fn show_alert(message: &str) -> Result<(), JsValue> {
    let doc = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(DashboardError::NoDocument)?;
    dom::present(&doc, message)?;
    Ok(())
}
