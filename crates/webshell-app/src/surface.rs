// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// wry-backed browser surface.
//
// Two child webviews share the window: the content view and, stacked above
// it, an overlay that shows the spinner or a static notice.

use tracing::debug;
use wry::dpi::{LogicalPosition, PhysicalSize};
use wry::{Rect, WebView};

use webshell_core::error::Result;
use webshell_core::{ShellView, WebShellError};
use webshell_host::BrowserSurface;
use webshell_host::history::NavigationHistory;
use webshell_host::surfaces::overlay_html;

pub struct WrySurface {
    content: WebView,
    overlay: WebView,
    history: NavigationHistory,
}

impl WrySurface {
    pub fn new(content: WebView, overlay: WebView) -> Self {
        Self {
            content,
            overlay,
            history: NavigationHistory::new(),
        }
    }

    pub fn record_started(&mut self, url: &str) {
        self.history.record_started(url);
    }

    /// Record a finished top-level load; returns whether back is possible.
    pub fn record_finished(&mut self, url: &str) -> bool {
        self.history.record_finished(url)
    }

    pub fn resize(&self, width: u32, height: u32) -> Result<()> {
        let bounds = full_bounds(width, height);
        self.content.set_bounds(bounds).map_err(surface_err)?;
        self.overlay.set_bounds(bounds).map_err(surface_err)
    }
}

impl BrowserSurface for WrySurface {
    fn navigate(&mut self, url: &str) -> Result<()> {
        self.content.load_url(url).map_err(surface_err)
    }

    fn go_back(&mut self) -> Result<()> {
        self.history.begin_back();
        self.content
            .evaluate_script("history.back();")
            .map_err(surface_err)
    }

    fn reload(&mut self) -> Result<()> {
        self.content.reload().map_err(surface_err)
    }

    fn evaluate_script(&mut self, script: &str) -> Result<()> {
        self.content.evaluate_script(script).map_err(surface_err)
    }

    fn render(&mut self, view: &ShellView) -> Result<()> {
        debug!(?view, "render");
        match overlay_html(view) {
            Some(html) => {
                self.overlay.load_html(&html).map_err(surface_err)?;
                self.overlay.set_visible(true).map_err(surface_err)?;
            }
            None => self.overlay.set_visible(false).map_err(surface_err)?,
        }
        self.content
            .set_visible(view.shows_content())
            .map_err(surface_err)
    }
}

/// Bounds covering the whole window.
pub fn full_bounds(width: u32, height: u32) -> Rect {
    Rect {
        position: LogicalPosition::new(0.0, 0.0).into(),
        size: PhysicalSize::new(width, height).into(),
    }
}

fn surface_err(e: wry::Error) -> WebShellError {
    WebShellError::Surface(e.to_string())
}
