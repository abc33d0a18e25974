// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Navigation origin allow-list.

use url::Url;

/// Schemes that never leave the page and are always allowed.
const INERT_SCHEMES: &[&str] = &["about", "data", "blob"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum OriginRule {
    /// `*`
    Any,
    /// `https://shop.example` (scheme, host and port must match).
    Exact(String),
    /// `https://*.example.com` (the bare domain matches too).
    Subdomains { scheme: String, domain: String },
}

/// Set of origins the embedded browser may navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginAllowList {
    rules: Vec<OriginRule>,
}

impl OriginAllowList {
    /// Build from config entries. Entries that parse as nothing useful are
    /// skipped with a warning.
    pub fn new<S: AsRef<str>>(entries: &[S]) -> Self {
        let rules = entries
            .iter()
            .filter_map(|entry| {
                let entry = entry.as_ref().trim();
                let rule = parse_rule(entry);
                if rule.is_none() {
                    tracing::warn!(entry, "ignoring unparsable origin allow-list entry");
                }
                rule
            })
            .collect();
        Self { rules }
    }

    /// Whether navigating to `url` is permitted.
    pub fn permits(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        if INERT_SCHEMES.contains(&parsed.scheme()) {
            return true;
        }

        let origin = parsed.origin().ascii_serialization();
        let host = parsed.host_str().unwrap_or_default();

        self.rules.iter().any(|rule| match rule {
            OriginRule::Any => true,
            OriginRule::Exact(allowed) => *allowed == origin,
            OriginRule::Subdomains { scheme, domain } => {
                parsed.scheme() == scheme
                    && (host == domain
                        || host
                            .strip_suffix(domain.as_str())
                            .is_some_and(|prefix| prefix.ends_with('.')))
            }
        })
    }
}

impl Default for OriginAllowList {
    fn default() -> Self {
        Self {
            rules: vec![OriginRule::Any],
        }
    }
}

fn parse_rule(entry: &str) -> Option<OriginRule> {
    if entry == "*" {
        return Some(OriginRule::Any);
    }
    if let Some((scheme, rest)) = entry.split_once("://") {
        if let Some(domain) = rest.strip_prefix("*.") {
            let domain = domain.trim_end_matches('/');
            if domain.is_empty() {
                return None;
            }
            return Some(OriginRule::Subdomains {
                scheme: scheme.to_ascii_lowercase(),
                domain: domain.to_ascii_lowercase(),
            });
        }
    }
    let url = Url::parse(entry).ok()?;
    let origin = url.origin();
    origin
        .is_tuple()
        .then(|| OriginRule::Exact(origin.ascii_serialization()))
}
