// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One-shot launch screen dismissal.

use tracing::{debug, warn};

use webshell_bridge::traits::NativeSplash;
use webshell_core::WebShellError;

/// Dismisses the launch screen at most once per process.
#[derive(Debug, Default)]
pub struct SplashGuard {
    dismissed: bool,
}

impl SplashGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    /// Hide the splash through the platform. Later calls are no-ops.
    ///
    /// Platform failures are logged and still count as dismissed: there is
    /// nothing useful to retry and the content is already on screen.
    pub fn dismiss(&mut self, platform: &dyn NativeSplash) {
        if self.dismissed {
            return;
        }
        self.dismissed = true;

        match platform.hide_splash() {
            Ok(()) => debug!("launch screen dismissed"),
            Err(WebShellError::PlatformUnavailable) => debug!("no launch screen to dismiss"),
            Err(e) => warn!(error = %e, "launch screen dismissal failed"),
        }
    }
}
