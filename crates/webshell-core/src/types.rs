// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the webshell host.

use serde::{Deserialize, Serialize};

use crate::notices::Notice;

/// Observable state of the host shell.
///
/// This is a snapshot derived from the lifecycle state machine; the shell is
/// its only writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellState {
    /// The embedded browser is loading a page.
    pub loading: bool,
    /// The device has network connectivity.
    pub connected: bool,
    /// Backward navigation is currently possible.
    pub can_go_back: bool,
    /// The last load failed; the error surface is shown.
    pub has_error: bool,
    /// The injected script reported `loaded` for the current page.
    pub script_ready: bool,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            loading: true,
            connected: true,
            can_go_back: false,
            has_error: false,
            script_ready: false,
        }
    }
}

/// What the shell currently puts on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellView {
    /// The embedded browser, optionally with the loading spinner on top.
    Content { spinner: bool },
    /// Static, non-interactive error surface.
    ErrorSurface { notice: Notice },
    /// Offline notice replacing the content area.
    OfflineNotice { notice: Notice },
}

impl ShellView {
    /// Whether the embedded browser content is visible.
    pub fn shows_content(&self) -> bool {
        matches!(self, ShellView::Content { .. })
    }
}

/// Result of routing a hardware back signal through the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// The shell navigated the browser back.
    Handled,
    /// Nothing to go back to; fall through to the platform default.
    Unhandled,
}

impl BackOutcome {
    pub fn is_handled(self) -> bool {
        matches!(self, BackOutcome::Handled)
    }
}

/// What to do with a link the page script intercepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkPolicy {
    /// Load the URL inside the embedded browser.
    #[default]
    Internal,
    /// Hand the URL to the platform (system browser).
    External,
    /// Drop the tap.
    Ignore,
}
