// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shell configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, WebShellError};
use crate::origin::OriginAllowList;
use crate::types::LinkPolicy;

/// Where the shell's page comes from. Chosen at build/config time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentSource {
    /// A remote page, normally HTTPS.
    Remote { url: String },
    /// A document shipped with the app, relative to the assets directory.
    Bundled { path: String },
}

/// Embedded browser settings applied when the surface is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebViewSettings {
    pub javascript_enabled: bool,
    /// Persistent local storage (localStorage, IndexedDB, cookies).
    pub dom_storage_enabled: bool,
    /// Allow media to play inline and without a gesture.
    pub inline_media_playback: bool,
    /// Elastic overscroll bounce.
    pub bounces: bool,
    pub devtools: bool,
    pub user_agent: Option<String>,
}

impl Default for WebViewSettings {
    fn default() -> Self {
        Self {
            javascript_enabled: true,
            dom_storage_enabled: true,
            inline_media_playback: true,
            bounces: false,
            devtools: false,
            user_agent: None,
        }
    }
}

/// Persistent shell settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Used for the window title and native dialog titles.
    pub app_name: String,
    /// Page to show.
    pub content: ContentSource,
    pub webview: WebViewSettings,
    /// Navigation allow-list entries (`*`, exact origins, `https://*.domain`).
    pub allowed_origins: Vec<String>,
    /// What to do with intercepted link taps.
    pub link_policy: LinkPolicy,
    /// Debounce window for the page script's DOM re-scan.
    pub debounce_ms: u64,
    /// Reload the page when connectivity returns.
    pub reload_on_reconnect: bool,
    /// Keep the spinner up until the page script reports `loaded`.
    pub spinner_until_script_ready: bool,
    /// How often the connectivity monitor polls.
    pub connectivity_poll_ms: u64,
    /// TCP reachability check timeout for remote content.
    pub preflight_timeout_ms: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            app_name: "webshell".to_string(),
            content: ContentSource::Remote {
                url: "https://shoptorder.netlify.app".to_string(),
            },
            webview: WebViewSettings::default(),
            allowed_origins: vec!["*".to_string()],
            link_policy: LinkPolicy::Internal,
            debounce_ms: 300,
            reload_on_reconnect: false,
            spinner_until_script_ready: false,
            connectivity_poll_ms: 3_000,
            preflight_timeout_ms: 5_000,
        }
    }
}

impl ShellConfig {
    /// Reject configurations the shell cannot run with.
    pub fn validate(&self) -> Result<()> {
        match &self.content {
            ContentSource::Remote { url } => {
                let parsed = Url::parse(url)?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(WebShellError::InvalidConfig(format!(
                        "remote content must be http(s), got {}",
                        parsed.scheme()
                    )));
                }
                if parsed.host_str().is_none() {
                    return Err(WebShellError::InvalidConfig(format!(
                        "remote content URL has no host: {url}"
                    )));
                }
            }
            ContentSource::Bundled { path } => {
                if path.trim().is_empty() {
                    return Err(WebShellError::InvalidConfig(
                        "bundled content path is empty".into(),
                    ));
                }
            }
        }
        if self.debounce_ms == 0 {
            return Err(WebShellError::InvalidConfig(
                "debounce_ms must be greater than zero".into(),
            ));
        }
        if self.connectivity_poll_ms == 0 {
            return Err(WebShellError::InvalidConfig(
                "connectivity_poll_ms must be greater than zero".into(),
            ));
        }
        if !self.webview.javascript_enabled {
            tracing::warn!("javascript disabled: the page bridge will not run");
        }
        Ok(())
    }

    pub fn origin_allow_list(&self) -> OriginAllowList {
        OriginAllowList::new(&self.allowed_origins)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn connectivity_poll_interval(&self) -> Duration {
        Duration::from_millis(self.connectivity_poll_ms)
    }

    pub fn preflight_timeout(&self) -> Duration {
        Duration::from_millis(self.preflight_timeout_ms)
    }
}
