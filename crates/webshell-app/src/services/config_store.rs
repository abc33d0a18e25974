// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Config file persistence and content resolution.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use webshell_core::config::ContentSource;
use webshell_core::error::{Result, WebShellError};
use webshell_core::ShellConfig;

const CONFIG_FILE: &str = "config.json";

/// Points the shell at a different remote URL without editing the file.
pub const URL_ENV: &str = "WEBSHELL_URL";

/// What the content view should be built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadTarget {
    Url(String),
    Html(String),
}

/// Load `config.json` from `data_dir`, writing defaults on first launch,
/// then apply the `WEBSHELL_URL` override and validate.
///
/// A config file that exists but does not parse is left untouched and the
/// defaults are used for this run.
pub fn load_or_init(data_dir: &Path) -> Result<ShellConfig> {
    let mut config = match load_config(data_dir) {
        Ok(Some(config)) => config,
        Ok(None) => {
            let config = ShellConfig::default();
            match persist_config(data_dir, &config) {
                Ok(()) => info!(dir = %data_dir.display(), "wrote default config"),
                Err(e) => warn!(error = %e, "could not write default config"),
            }
            config
        }
        Err(e) => {
            warn!(error = %e, "config file unreadable; using defaults");
            ShellConfig::default()
        }
    };

    apply_url_override(&mut config, std::env::var(URL_ENV).ok());
    config.validate()?;
    Ok(config)
}

/// `Ok(None)` when there is no config file yet.
pub fn load_config(data_dir: &Path) -> Result<Option<ShellConfig>> {
    let path = data_dir.join(CONFIG_FILE);
    let data = match std::fs::read_to_string(&path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&data)?))
}

pub fn persist_config(data_dir: &Path, config: &ShellConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}

/// Replace the content source with a remote URL, if one was given.
pub fn apply_url_override(config: &mut ShellConfig, url: Option<String>) {
    if let Some(url) = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
        info!(url = %url, "content URL overridden from environment");
        config.content = ContentSource::Remote { url };
    }
}

/// Turn the configured source into something the browser can load.
/// Bundled paths are relative to `assets_dir` unless absolute.
pub fn resolve_content(source: &ContentSource, assets_dir: &Path) -> Result<LoadTarget> {
    match source {
        ContentSource::Remote { url } => Ok(LoadTarget::Url(url.clone())),
        ContentSource::Bundled { path } => read_bundle(assets_dir, path).map(LoadTarget::Html),
    }
}

pub fn read_bundle(assets_dir: &Path, path: &str) -> Result<String> {
    let full = bundle_path(assets_dir, path);
    std::fs::read_to_string(&full).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => WebShellError::BundleMissing(full.display().to_string()),
        _ => WebShellError::Io(e),
    })
}

fn bundle_path(assets_dir: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        assets_dir.join(p)
    }
}
