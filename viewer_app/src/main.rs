//! Mesh viewer demo application
//!
//! Loads the viewer configuration and catalog manifest, builds an in-memory
//! scene and replays a scripted session against it, logging what the viewer
//! would show.
//!
//! ```text
//! mesh_viewer_demo [viewer.toml] [catalog.ron] [session.ron]
//! ```

mod session;

use std::path::PathBuf;

use mesh_viewer::foundation::logging;
use mesh_viewer::prelude::*;

use session::{load_script, Session};

const DEFAULT_CONFIG: &str = "assets/viewer.toml";
const DEFAULT_CATALOG: &str = "assets/catalog.ron";
const DEFAULT_SESSION: &str = "assets/session.ron";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let config_path = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_CONFIG.to_string()));
    let catalog_path = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_CATALOG.to_string()));
    let session_path = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_SESSION.to_string()));

    let config = if config_path.exists() {
        ViewerConfig::load_from_file(&config_path)?
    } else {
        ViewerConfig::default()
    };
    logging::init(&config.log_level);
    if !config_path.exists() {
        log::warn!("{} not found, using default configuration", config_path.display());
    }
    config.validate()?;

    log::info!("Starting mesh viewer demo");
    let manifest = CatalogManifest::load_from_file(&catalog_path)?;
    let scene = ViewerScene::from_manifest(&manifest)?;
    let events = load_script(&session_path)?;
    log::info!("Replaying {} events from {}", events.len(), session_path.display());

    let mut session = Session::new(&config, scene)?;
    session.log_state();
    let summary = session.run(&events);
    session.log_state();
    session.finish();

    log::info!(
        "Session complete: {} applied, {} ignored, {} rejected",
        summary.applied,
        summary.ignored,
        summary.rejected
    );
    Ok(())
}
