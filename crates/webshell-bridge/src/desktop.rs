// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop bridge for development and CI builds.
//
// Dialogs go through rfd, connectivity is probed at the socket level, and
// external links are handed to the OS URL opener. There is no launch screen
// on desktop so splash dismissal only logs.

use std::net::UdpSocket;
use std::process::Command;

use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use webshell_core::error::{Result, WebShellError};

use crate::traits::*;

/// Public resolver used only to pick a route; no packet is sent.
const PROBE_ADDR: &str = "8.8.8.8:53";

/// Bridge used on Linux, macOS and Windows.
pub struct DesktopBridge;

impl DesktopBridge {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DesktopBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for DesktopBridge {
    fn platform_name(&self) -> &str {
        "Desktop"
    }
}

impl NativeDialogs for DesktopBridge {
    fn show_alert(&self, title: &str, message: &str) -> Result<()> {
        MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
        Ok(())
    }

    fn show_confirm(&self, title: &str, message: &str) -> Result<bool> {
        let result = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::OkCancel)
            .show();
        Ok(matches!(result, MessageDialogResult::Ok | MessageDialogResult::Yes))
    }
}

impl NativeConnectivity for DesktopBridge {
    /// Connected when the OS has a non-loopback route to the public internet.
    fn is_connected(&self) -> Result<bool> {
        let online = UdpSocket::bind("0.0.0.0:0")
            .and_then(|s| {
                s.connect(PROBE_ADDR)?;
                s.local_addr()
            })
            .map(|addr| !addr.ip().is_loopback() && !addr.ip().is_unspecified())
            .unwrap_or(false);
        Ok(online)
    }
}

impl NativeSplash for DesktopBridge {
    fn hide_splash(&self) -> Result<()> {
        tracing::debug!("no launch screen on desktop");
        Ok(())
    }
}

impl NativeExternalLinks for DesktopBridge {
    fn open_external(&self, url: &str) -> Result<()> {
        let mut command = opener_command(url).ok_or(WebShellError::PlatformUnavailable)?;
        command
            .spawn()
            .map_err(|e| WebShellError::Bridge(format!("failed to launch URL opener: {e}")))?;
        tracing::info!(url, "opened link in system browser");
        Ok(())
    }
}

fn opener_command(url: &str) -> Option<Command> {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        Some(cmd)
    } else if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        Some(cmd)
    } else if cfg!(any(target_os = "linux", target_os = "freebsd", target_os = "openbsd")) {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        Some(cmd)
    } else {
        None
    }
}
