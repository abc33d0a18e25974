// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Connectivity monitor.
//
// Polls a reachability probe on a fixed interval and reports the first
// reading plus every change after it. Repeated identical readings are
// swallowed so the shell only sees edges.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use webshell_bridge::traits::PlatformBridge;
use webshell_core::WebShellError;

/// Turns a stream of readings into a stream of changes.
#[derive(Debug, Default, Clone, Copy)]
pub struct EdgeDetector {
    last: Option<bool>,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the reading if it differs from the previous one.
    pub fn observe(&mut self, connected: bool) -> Option<bool> {
        if self.last == Some(connected) {
            return None;
        }
        self.last = Some(connected);
        Some(connected)
    }

    pub fn last(&self) -> Option<bool> {
        self.last
    }
}

/// Background polling task. Stops when dropped.
pub struct ConnectivityMonitor {
    handle: JoinHandle<()>,
}

impl ConnectivityMonitor {
    /// Start polling on the current tokio runtime.
    ///
    /// `probe` may block briefly (it usually touches the network stack), so
    /// it runs on the blocking pool.
    pub fn spawn<P, F>(interval: Duration, probe: P, mut on_change: F) -> Self
    where
        P: Fn() -> bool + Send + Sync + 'static,
        F: FnMut(bool) + Send + 'static,
    {
        let probe = Arc::new(probe);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut edges = EdgeDetector::new();

            loop {
                ticker.tick().await;
                let probe = Arc::clone(&probe);
                let connected = match tokio::task::spawn_blocking(move || probe()).await {
                    Ok(connected) => connected,
                    Err(e) => {
                        warn!(error = %e, "connectivity probe panicked");
                        continue;
                    }
                };
                if let Some(connected) = edges.observe(connected) {
                    debug!(connected, "connectivity edge");
                    on_change(connected);
                }
            }
        });
        Self { handle }
    }
}

impl Drop for ConnectivityMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Probe backed by the platform bridge.
///
/// A platform without a connectivity sensor reads as connected, so the
/// shell never shows the offline notice it can't clear.
pub fn platform_probe(platform: Arc<dyn PlatformBridge>) -> impl Fn() -> bool + Send + Sync + 'static {
    move || match platform.is_connected() {
        Ok(connected) => connected,
        Err(WebShellError::PlatformUnavailable) => true,
        Err(e) => {
            warn!(error = %e, "connectivity check failed");
            true
        }
    }
}
