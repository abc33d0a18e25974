// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.
//
// The shell only asks the OS for four things. Platforms that cannot provide
// one return `WebShellError::PlatformUnavailable` and the shell falls back.

use webshell_core::error::Result;

/// Unified bridge that groups all native capabilities.
///
/// `Send + Sync` so the connectivity monitor can probe from a background task.
pub trait PlatformBridge:
    NativeDialogs + NativeConnectivity + NativeSplash + NativeExternalLinks + Send + Sync
{
    /// Human-readable platform name (e.g. "Android", "Desktop").
    fn platform_name(&self) -> &str;
}

/// Modal native dialogs standing in for the page's `alert`/`confirm`.
pub trait NativeDialogs {
    /// Show `message` with a single acknowledgement control.
    fn show_alert(&self, title: &str, message: &str) -> Result<()>;

    /// Show `message` with OK/Cancel. Returns true for OK.
    fn show_confirm(&self, title: &str, message: &str) -> Result<bool>;
}

/// Network connectivity sensor.
pub trait NativeConnectivity {
    /// Whether the device currently has a usable network.
    fn is_connected(&self) -> Result<bool>;
}

/// Launch/splash screen control.
pub trait NativeSplash {
    /// Dismiss the launch screen. Must tolerate repeated calls.
    fn hide_splash(&self) -> Result<()>;
}

/// Hand URLs to the system browser.
pub trait NativeExternalLinks {
    fn open_external(&self, url: &str) -> Result<()>;
}
