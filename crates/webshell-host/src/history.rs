// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host-side navigation history.
//
// The embedded browser does not report whether it can go back, so the host
// records every finished top-level load. A back request marks the next
// finished load as a pop instead of a push.
//
// Same-document navigations (`pushState`, hash changes) produce no load
// events and are invisible here: going back over one of them is a real
// back step in the page, but the stack below is unchanged.

/// Stack of finished page URLs.
#[derive(Debug, Clone, Default)]
pub struct NavigationHistory {
    entries: Vec<String>,
    back_pending: bool,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished load. Returns the new `can_go_back` value.
    pub fn record_finished(&mut self, url: &str) -> bool {
        if self.back_pending {
            self.back_pending = false;
            self.entries.pop();
            // History API pops can land somewhere other than the entry below.
            if self.entries.last().map(String::as_str) != Some(url) {
                self.entries.push(url.to_string());
            }
        } else if self.entries.last().map(String::as_str) != Some(url) {
            self.entries.push(url.to_string());
        }
        self.can_go_back()
    }

    /// Note that the shell asked the browser to go back.
    pub fn begin_back(&mut self) {
        self.back_pending = true;
    }

    /// A top-level load started. A pending back request is dropped when the
    /// load is not heading to the entry below the top: that back step was
    /// consumed inside the page and this is a forward navigation.
    pub fn record_started(&mut self, url: &str) {
        if !self.back_pending {
            return;
        }
        let below = self
            .entries
            .len()
            .checked_sub(2)
            .and_then(|i| self.entries.get(i))
            .map(String::as_str);
        if below != Some(url) {
            self.back_pending = false;
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
