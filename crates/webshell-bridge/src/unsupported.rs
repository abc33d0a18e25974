// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge for targets without a native implementation yet.
//
// Every capability returns `PlatformUnavailable`; the shell degrades to
// logging alerts, answering confirms with false and assuming connectivity.

use webshell_core::error::{Result, WebShellError};

use crate::traits::*;

/// No-op bridge.
pub struct UnsupportedBridge;

impl PlatformBridge for UnsupportedBridge {
    fn platform_name(&self) -> &str {
        "Unsupported"
    }
}

impl NativeDialogs for UnsupportedBridge {
    fn show_alert(&self, _title: &str, _message: &str) -> Result<()> {
        tracing::warn!("NativeDialogs::show_alert called on unsupported bridge");
        Err(WebShellError::PlatformUnavailable)
    }

    fn show_confirm(&self, _title: &str, _message: &str) -> Result<bool> {
        tracing::warn!("NativeDialogs::show_confirm called on unsupported bridge");
        Err(WebShellError::PlatformUnavailable)
    }
}

impl NativeConnectivity for UnsupportedBridge {
    fn is_connected(&self) -> Result<bool> {
        Err(WebShellError::PlatformUnavailable)
    }
}

impl NativeSplash for UnsupportedBridge {
    fn hide_splash(&self) -> Result<()> {
        Err(WebShellError::PlatformUnavailable)
    }
}

impl NativeExternalLinks for UnsupportedBridge {
    fn open_external(&self, _url: &str) -> Result<()> {
        Err(WebShellError::PlatformUnavailable)
    }
}
