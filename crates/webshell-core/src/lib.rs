// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// webshell — Core types, bridge wire protocol and error definitions shared
// across all crates.

pub mod config;
pub mod error;
pub mod notices;
pub mod origin;
pub mod protocol;
pub mod types;

pub use config::ShellConfig;
pub use error::WebShellError;
pub use protocol::{BridgeEvent, ConfirmReply, NetworkStatus};
pub use types::*;
