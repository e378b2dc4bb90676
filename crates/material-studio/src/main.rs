//! Material studio: a window showing the material widgets over procedural
//! backdrops.
//!
//! Click the menu button to open the navigation drawer; Escape quits.
//! `RUST_LOG=debug` shows mesh and pipeline statistics.

mod app;
mod atlas;
mod config;
mod scene;

use material_engine::logging::init_logging;

use crate::config::StudioConfig;

fn main() {
    let config = StudioConfig::default();
    init_logging(config.logging.clone());

    if let Err(e) = app::run(config) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
