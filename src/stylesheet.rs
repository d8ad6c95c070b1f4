//! User stylesheet for the switcher window.
//!
//! The stylesheet lives at `$XDG_CONFIG_HOME/hypr-switcher/style.css`. It is
//! created from [`DEFAULT_CSS`] the first time the switcher opens so users have
//! something to edit.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const APP_DIR: &str = "hypr-switcher";
const STYLE_FILE: &str = "style.css";

/// Default location of the user stylesheet
pub fn default_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join(APP_DIR).join(STYLE_FILE))
}

/// Write the default stylesheet to `path` unless a file is already there.
///
/// Returns `true` when the file was created.
pub fn ensure_exists(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CSS)
        .with_context(|| format!("Failed to write stylesheet to {}", path.display()))?;

    info!("Wrote default stylesheet to {}", path.display());
    Ok(true)
}

/// Resolve, bootstrap, and read the stylesheet.
///
/// Falls back to the built-in stylesheet if anything goes wrong.
pub fn load(path_override: Option<&Path>) -> String {
    match read_stylesheet(path_override) {
        Ok(css) => css,
        Err(e) => {
            warn!("Using built-in stylesheet: {:#}", e);
            DEFAULT_CSS.to_string()
        }
    }
}

fn read_stylesheet(path_override: Option<&Path>) -> Result<String> {
    let path = match path_override {
        Some(path) => path.to_path_buf(),
        None => default_path()?,
    };

    ensure_exists(&path)?;
    fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Install `css` for the default display.
pub fn apply(css: &str) {
    let Some(display) = gtk4::gdk::Display::default() else {
        warn!("No default display, skipping stylesheet");
        return;
    };

    let provider = gtk4::CssProvider::new();
    provider.load_from_data(css);

    gtk4::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

pub const DEFAULT_CSS: &str = r#"
window {
    background-color: #1a1b26;
    color: #a9b1d6;
}

/* Hide scrollbar */
scrolledwindow undershoot.top,
scrolledwindow undershoot.bottom,
scrolledwindow overshoot.top,
scrolledwindow overshoot.bottom,
scrolledwindow scrollbar {
    opacity: 0;
    -gtk-icon-size: 0;
    min-width: 0;
    min-height: 0;
}

.search-box {
    margin: 8px 12px;
    padding: 0;
}

.search-label {
    font-family: monospace;
    font-size: 14px;
    color: #7aa2f7;
    margin-right: 8px;
}

entry {
    font-family: monospace;
    font-size: 14px;
    background: transparent;
    color: #a9b1d6;
    border: none;
    box-shadow: none;
    padding: 0;
    margin: 0;
    min-height: 0;
    outline: none;
}

.window-list {
    margin: 0 8px;
    background: transparent;
    counter-reset: row-number;
}

.window-row {
    padding: 8px 12px;
    background-color: transparent;
    color: #a9b1d6;
}

.window-title {
    font-family: monospace;
    font-size: 13px;
    color: #7aa2f7;
}

.window-info {
    font-family: monospace;
    font-size: 12px;
    color: #565f89;
}

row {
    padding-left: 12px;
    transition: none;
    counter-increment: row-number;
}

row:not(:selected)::before {
    content: " " counter(row-number) ")";
    font-family: monospace;
    color: #565f89;
    margin-right: 8px;
}

row:selected {
    background: transparent;
}

row:selected::before {
    content: ">" counter(row-number) ")";
    font-family: monospace;
    color: #7aa2f7;
    margin-right: 8px;
}

row:selected .window-info {
    color: #a9b1d6;
}

row:selected:focus {
    outline: none;
    box-shadow: none;
}
"#;
