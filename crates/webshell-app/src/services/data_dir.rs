// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware data directory resolution.

use std::path::PathBuf;

use tracing::warn;

const APP_DIR: &str = "webshell";

/// Overrides the whole data directory (tests, portable installs).
pub const DATA_DIR_ENV: &str = "WEBSHELL_DATA_DIR";

/// Return the application data directory, creating it if needed.
pub fn data_dir() -> PathBuf {
    let dir = match std::env::var(DATA_DIR_ENV) {
        Ok(explicit) if !explicit.is_empty() => PathBuf::from(explicit),
        _ => base_dir(
            std::env::var("XDG_DATA_HOME").ok(),
            std::env::var("HOME").ok(),
        )
        .join(APP_DIR),
    };
    ensure_dir(dir)
}

/// Directory holding bundled documents for `ContentSource::Bundled`.
pub fn assets_dir() -> PathBuf {
    ensure_dir(data_dir().join("assets"))
}

fn ensure_dir(dir: PathBuf) -> PathBuf {
    if let Err(e) = std::fs::create_dir_all(&dir) {
        warn!(dir = %dir.display(), error = %e, "could not create data directory");
    }
    dir
}

/// XDG data dir, then `~/.local/share`, then `/tmp`.
fn base_dir(xdg_data_home: Option<String>, home: Option<String>) -> PathBuf {
    if let Some(xdg) = xdg_data_home.filter(|s| !s.is_empty()) {
        return PathBuf::from(xdg);
    }
    if let Some(home) = home.filter(|s| !s.is_empty()) {
        return PathBuf::from(home).join(".local").join("share");
    }
    PathBuf::from("/tmp")
}
