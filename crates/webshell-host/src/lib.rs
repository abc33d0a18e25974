// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// webshell-host — Browser-independent host shell: lifecycle, bridge
// dispatch, injected page script, launch screen and connectivity.

pub mod connectivity;
pub mod history;
pub mod inject;
pub mod lifecycle;
pub mod preflight;
pub mod shell;
pub mod splash;
pub mod surfaces;

pub use shell::{BrowserSurface, HostShell};
