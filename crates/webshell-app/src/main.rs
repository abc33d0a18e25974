// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// webshell — Native shell around a web app
//
// Entry point. Initialises logging, loads the shell config and launches the
// embedded browser.

mod runtime;
mod services;
mod surface;

use webshell_core::ShellConfig;

use services::{config_store, data_dir};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "webshell starting");

    let dir = data_dir::data_dir();
    let config = match config_store::load_or_init(&dir) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration, falling back to defaults");
            ShellConfig::default()
        }
    };

    if let Err(e) = runtime::run(config, &data_dir::assets_dir()) {
        tracing::error!(error = %e, "webshell failed to start");
        std::process::exit(1);
    }
}
