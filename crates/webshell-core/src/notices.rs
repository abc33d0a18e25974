// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-language notices for the static error and offline surfaces.
//
// Every load failure the shell can hit is mapped to a short heading, one
// sentence of explanation and a suggestion. The surfaces are not interactive,
// so suggestions never mention buttons.

use serde::{Deserialize, Serialize};

use crate::error::WebShellError;

/// Text shown on a static surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Heading.
    pub title: String,
    /// What happened.
    pub message: String,
    /// What the user can do about it.
    pub suggestion: String,
}

impl Notice {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }
}

/// Notice shown while the device has no connectivity.
pub fn offline_notice() -> Notice {
    Notice::new(
        "You're offline",
        "This app needs an internet connection to show its content.",
        "Check your Wi-Fi or mobile data. The page comes back on its own once you reconnect.",
    )
}

/// Convert a load failure into the notice for the error surface.
pub fn notice_for_error(err: &WebShellError) -> Notice {
    match err {
        WebShellError::Unreachable(_) => Notice::new(
            "Can't reach the server",
            "The app's server didn't answer.",
            "It may be down for maintenance. Close the app and try again later.",
        ),

        WebShellError::LoadFailed(detail) => load_failed_notice(detail),

        WebShellError::BundleMissing(path) => Notice::new(
            "Content is missing",
            format!("The app couldn't find its built-in page ({path})."),
            "Reinstalling the app should fix this.",
        ),

        WebShellError::InvalidConfig(_) | WebShellError::InvalidUrl(_) => Notice::new(
            "The app is misconfigured",
            "The address of the app's content isn't valid.",
            "Please update the app. If this keeps happening, contact the developer.",
        ),

        WebShellError::NavigationBlocked(_) => Notice::new(
            "Page not allowed",
            "This app only shows pages from its own website.",
            "Close the app and open it again to return to the start page.",
        ),

        WebShellError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => Notice::new(
            "Content is missing",
            "A file the app needs couldn't be found.",
            "Reinstalling the app should fix this.",
        ),

        WebShellError::Io(io_err) if io_err.kind() == std::io::ErrorKind::PermissionDenied => {
            Notice::new(
                "Content can't be opened",
                "The app doesn't have permission to read its own files.",
                "Check the app's storage permission in your device settings.",
            )
        }

        _ => Notice::new(
            "Something went wrong",
            "The page couldn't be shown.",
            "Close the app and open it again.",
        ),
    }
}

fn load_failed_notice(detail: &str) -> Notice {
    let lower = detail.to_ascii_lowercase();

    if lower.contains("timed out") || lower.contains("timeout") {
        Notice::new(
            "The page took too long",
            "The server is responding slowly.",
            "Try again in a few minutes.",
        )
    } else if lower.contains("certificate") || lower.contains("ssl") || lower.contains("tls") {
        Notice::new(
            "Secure connection failed",
            "The app couldn't verify the server's identity.",
            "Check that your device's date and time are correct, then reopen the app.",
        )
    } else if lower.contains("dns") || lower.contains("resolve") || lower.contains("lookup") {
        Notice::new(
            "Can't find the server",
            "The server's address couldn't be looked up.",
            "Check your connection. Some public Wi-Fi networks need you to sign in first.",
        )
    } else {
        Notice::new(
            "The page didn't load",
            "Something went wrong while loading the content.",
            format!("Close the app and try again. (Detail: {detail})"),
        )
    }
}
