// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for webshell.

use thiserror::Error;

/// Top-level error type for all webshell operations.
#[derive(Debug, Error)]
pub enum WebShellError {
    // -- Content loading --
    #[error("page failed to load: {0}")]
    LoadFailed(String),

    #[error("content host unreachable: {0}")]
    Unreachable(String),

    #[error("bundled document not found: {0}")]
    BundleMissing(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // -- Bridge protocol --
    #[error("malformed bridge message: {0}")]
    MalformedMessage(String),

    #[error("bridge message has no type field")]
    MissingEventType,

    #[error("unknown bridge event type: {0}")]
    UnknownEventType(String),

    // -- Browser surface --
    #[error("browser surface error: {0}")]
    Surface(String),

    #[error("navigation blocked by origin allow-list: {0}")]
    NavigationBlocked(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, WebShellError>;
