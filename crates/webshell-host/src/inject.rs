// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page-side script injector.
//
// The script itself lives in `bridge.js` next to this file. It installs the
// `window.__webshell` bridge client, routes `alert`/`confirm` through it,
// suppresses browser-like behavior and re-applies that suppression to new
// DOM nodes after a debounce window.

use std::time::Duration;

const BRIDGE_TEMPLATE: &str = include_str!("bridge.js");
const DEBOUNCE_PLACEHOLDER: &str = "__WEBSHELL_DEBOUNCE_MS__";

/// Name of the bridge client object the script installs on `window`.
pub const BRIDGE_GLOBAL: &str = "__webshell";

/// Builds the initialization script injected into every page.
#[derive(Debug, Clone)]
pub struct ScriptInjector {
    debounce: Duration,
}

impl ScriptInjector {
    pub fn new(debounce: Duration) -> Self {
        Self { debounce }
    }

    /// The full script, ready for `with_initialization_script`.
    pub fn script(&self) -> String {
        // A zero window would re-scan on every mutation; floor it at 1ms.
        let ms = self.debounce.as_millis().max(1);
        BRIDGE_TEMPLATE.replace(DEBOUNCE_PLACEHOLDER, &ms.to_string())
    }
}

impl Default for ScriptInjector {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}
