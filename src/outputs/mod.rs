//! Output generation for the rendered page, the terminal, and JSON exports.
//!
//! # Submodules
//!
//! - [`html`]: Renders the page (header, navigation, search form, card grid)
//! - [`text`]: Renders the same listing as plain text for the terminal
//! - [`json`]: Writes the displayed listing as a dated JSON snapshot
//!
//! [`publish`] writes whichever of these outputs are configured after every
//! state change.

pub mod html;
pub mod json;
pub mod text;

use crate::state::ViewState;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// Where rendered output goes.
#[derive(Debug, Clone)]
pub struct OutputTargets {
    pub html_output: PathBuf,
    pub json_output_dir: Option<PathBuf>,
}

/// Render `state` to every configured target.
///
/// Individual write failures are logged; the first one is returned after all
/// targets have been attempted.
#[instrument(level = "debug", skip_all)]
pub async fn publish(state: &ViewState, targets: &OutputTargets) -> Result<(), Box<dyn Error>> {
    let mut first_err: Option<Box<dyn Error>> = None;

    let page = html::render_page(state);
    match fs::write(&targets.html_output, page).await {
        Ok(()) => info!(path = %targets.html_output.display(), "Wrote HTML page"),
        Err(e) => {
            error!(path = %targets.html_output.display(), error = %e, "Failed writing HTML page");
            first_err = Some(e.into());
        }
    }

    if let Some(dir) = &targets.json_output_dir {
        if let Err(e) = json::write_listing(state, dir).await {
            error!(error = %e, "Failed to write JSON listing");
            if first_err.is_none() {
                first_err = Some(e);
            }
        }
    }

    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
