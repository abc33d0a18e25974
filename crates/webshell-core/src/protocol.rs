// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge wire protocol between the injected page script and the host shell.
//
// Page → host: one flat JSON object per message, discriminated by `type`.
// Host → page: a plain string `confirmResult:[<id>:]true|false` dispatched
// as a synthetic `message` event inside the page.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WebShellError};

/// Prefix of every confirm reply string.
pub const CONFIRM_REPLY_PREFIX: &str = "confirmResult:";

/// Connectivity as reported from inside the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkStatus {
    Online,
    Offline,
}

impl NetworkStatus {
    pub fn is_online(self) -> bool {
        matches!(self, NetworkStatus::Online)
    }
}

/// A structured event sent from page content to the host shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BridgeEvent {
    /// The page called `alert(message)`.
    Alert {
        #[serde(default)]
        message: String,
    },
    /// The page called `confirm(message)` and awaits a [`ConfirmReply`].
    Confirm {
        #[serde(default)]
        message: String,
        /// Correlation id chosen by the page. Absent for legacy pages.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
    /// The user tapped an anchor with an absolute http(s) href.
    Link { url: String },
    /// The injected script finished installing itself.
    Loaded,
    /// An uncaught script error inside the page.
    Error {
        #[serde(default)]
        message: String,
    },
    /// The browser fired an `online`/`offline` event.
    Network { status: NetworkStatus },
}

impl BridgeEvent {
    /// Wire name of the event's `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            BridgeEvent::Alert { .. } => "alert",
            BridgeEvent::Confirm { .. } => "confirm",
            BridgeEvent::Link { .. } => "link",
            BridgeEvent::Loaded => "loaded",
            BridgeEvent::Error { .. } => "error",
            BridgeEvent::Network { .. } => "network",
        }
    }
}

const KNOWN_TYPES: &[&str] = &["alert", "confirm", "link", "loaded", "error", "network"];

/// Parse one raw bridge message.
///
/// Distinguishes payloads that are not JSON objects
/// ([`WebShellError::MalformedMessage`]), objects without a string `type`
/// ([`WebShellError::MissingEventType`]) and types this host does not know
/// ([`WebShellError::UnknownEventType`]). All three are safe to ignore.
pub fn parse_message(raw: &str) -> Result<BridgeEvent> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| WebShellError::MalformedMessage(e.to_string()))?;

    let kind = match value.get("type") {
        Some(serde_json::Value::String(kind)) => kind.clone(),
        Some(_) | None if !value.is_object() => {
            return Err(WebShellError::MalformedMessage(
                "payload is not a JSON object".into(),
            ));
        }
        _ => return Err(WebShellError::MissingEventType),
    };

    if !KNOWN_TYPES.contains(&kind.as_str()) {
        return Err(WebShellError::UnknownEventType(kind));
    }

    serde_json::from_value(value).map_err(|e| WebShellError::MalformedMessage(e.to_string()))
}

/// The host's boolean answer to a page-initiated `confirm`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmReply {
    /// Correlation id copied from the originating event, if it had one.
    pub id: Option<String>,
    pub accepted: bool,
}

impl ConfirmReply {
    pub fn new(id: Option<String>, accepted: bool) -> Self {
        Self { id, accepted }
    }

    /// Wire encoding, e.g. `confirmResult:true` or `confirmResult:7:false`.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Parse a reply string. Returns `None` for anything that is not a reply.
    pub fn decode(raw: &str) -> Option<Self> {
        let rest = raw.strip_prefix(CONFIRM_REPLY_PREFIX)?;
        let (id, flag) = match rest.rsplit_once(':') {
            Some((id, flag)) if !id.is_empty() => (Some(id.to_string()), flag),
            Some(_) => return None,
            None => (None, rest),
        };
        let accepted = match flag {
            "true" => true,
            "false" => false,
            _ => return None,
        };
        Some(Self { id, accepted })
    }

    /// Script that delivers this reply into the page's message stream.
    pub fn dispatch_script(&self) -> String {
        // serde_json produces a valid JS string literal with all escaping done.
        let literal = serde_json::Value::String(self.encode()).to_string();
        format!("window.dispatchEvent(new MessageEvent('message', {{ data: {literal} }}));")
    }
}

impl fmt::Display for ConfirmReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{CONFIRM_REPLY_PREFIX}{id}:{}", self.accepted),
            None => write!(f, "{CONFIRM_REPLY_PREFIX}{}", self.accepted),
        }
    }
}
