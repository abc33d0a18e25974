// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop runtime: one tao window, the wry content and overlay views, and a
// tokio runtime for background checks. Everything the browser or the
// background tasks report is funnelled through the event loop as a
// `UserEvent`, so the host shell only ever runs on the UI thread.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tao::dpi::LogicalSize;
use tao::event::{ElementState, Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy};
use tao::keyboard::Key;
use tao::window::{Window, WindowBuilder};
use tracing::{debug, info, warn};
use wry::{PageLoadEvent, WebView, WebViewBuilder};

use webshell_bridge::traits::PlatformBridge;
use webshell_core::config::ContentSource;
use webshell_core::error::Result;
use webshell_core::origin::OriginAllowList;
use webshell_core::{ShellConfig, WebShellError};
use webshell_host::HostShell;
use webshell_host::connectivity::{ConnectivityMonitor, platform_probe};
use webshell_host::inject::ScriptInjector;
use webshell_host::preflight;

use crate::services::config_store::{self, LoadTarget};
use crate::surface::{WrySurface, full_bounds};

const WINDOW_WIDTH: f64 = 480.0;
const WINDOW_HEIGHT: f64 = 860.0;

#[derive(Debug)]
enum UserEvent {
    /// Raw bridge message posted by the page.
    Ipc(String),
    PageLoadStarted(String),
    PageLoadFinished(String),
    Connectivity(bool),
    PreflightFailed {
        error: WebShellError,
        connected: bool,
    },
}

/// Build the window and run the shell until it exits. Does not return on
/// success.
pub fn run(config: ShellConfig, assets_dir: &Path) -> Result<()> {
    let platform: Arc<dyn PlatformBridge> = Arc::from(webshell_bridge::platform_bridge());
    let rt = tokio::runtime::Runtime::new()?;

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title(&config.app_name)
        .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
        .build(&event_loop)
        .map_err(|e| WebShellError::Surface(e.to_string()))?;

    let (target, load_error) = match config_store::resolve_content(&config.content, assets_dir) {
        Ok(target) => (target, None),
        Err(e) => (LoadTarget::Html(String::new()), Some(e)),
    };

    let content = build_content_view(&window, &config, target, &proxy)?;
    let overlay = build_overlay_view(&window)?;

    let mut shell = HostShell::new(
        config.clone(),
        WrySurface::new(content, overlay),
        Arc::clone(&platform),
    );
    shell.start();

    match (load_error, &config.content) {
        (Some(e), _) => shell.on_content_unavailable(e),
        (None, ContentSource::Remote { url }) => spawn_preflight(
            &rt,
            url.clone(),
            config.preflight_timeout(),
            Arc::clone(&platform),
            proxy.clone(),
        ),
        (None, ContentSource::Bundled { .. }) => {}
    }

    let monitor = {
        let _guard = rt.enter();
        let proxy = proxy.clone();
        ConnectivityMonitor::spawn(
            config.connectivity_poll_interval(),
            platform_probe(Arc::clone(&platform)),
            move |connected| {
                let _ = proxy.send_event(UserEvent::Connectivity(connected));
            },
        )
    };

    info!(platform = platform.platform_name(), "webshell running");

    event_loop.run(move |event, _target, control_flow| {
        *control_flow = ControlFlow::Wait;
        // Owned by the loop so they live as long as the window.
        let _ = (&rt, &monitor);

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("window closed");
                *control_flow = ControlFlow::Exit;
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => {
                if let Err(e) = shell.surface().resize(size.width, size.height) {
                    warn!(error = %e, "resize failed");
                }
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } if event.state == ElementState::Pressed && is_back_key(&event.logical_key) =>
            {
                if !shell.on_back_pressed().is_handled() {
                    info!("back pressed with nothing to go back to; exiting");
                    *control_flow = ControlFlow::Exit;
                }
            }
            Event::UserEvent(user_event) => match user_event {
                UserEvent::Ipc(body) => {
                    shell.on_bridge_message(&body);
                }
                UserEvent::PageLoadStarted(url) => {
                    debug!(url = %url, "page load started");
                    shell.surface_mut().record_started(&url);
                    shell.on_load_start();
                }
                UserEvent::PageLoadFinished(url) => {
                    let can_go_back = shell.surface_mut().record_finished(&url);
                    shell.on_navigation_state_change(can_go_back);
                    shell.on_load_end();
                }
                UserEvent::Connectivity(connected) => shell.on_connectivity_change(connected),
                UserEvent::PreflightFailed { error, connected } => {
                    shell.on_preflight_failed(error, connected)
                }
            },
            _ => {}
        }
    })
}

fn build_content_view(
    window: &Window,
    config: &ShellConfig,
    target: LoadTarget,
    proxy: &EventLoopProxy<UserEvent>,
) -> Result<WebView> {
    let options = ContentOptions::from_config(config);
    let size = window.inner_size();
    let allow_list: OriginAllowList = config.origin_allow_list();

    let ipc_proxy = proxy.clone();
    let load_proxy = proxy.clone();

    let mut builder = WebViewBuilder::new()
        .with_bounds(full_bounds(size.width, size.height))
        .with_devtools(options.devtools)
        .with_autoplay(options.autoplay)
        .with_incognito(options.incognito)
        .with_back_forward_navigation_gestures(options.swipe_navigation)
        .with_ipc_handler(move |req: wry::http::Request<String>| {
            let _ = ipc_proxy.send_event(UserEvent::Ipc(req.body().clone()));
        })
        .with_navigation_handler(move |url: String| {
            let allowed = allow_list.permits(&url);
            if !allowed {
                warn!(url = %url, "navigation blocked by origin allow-list");
            }
            allowed
        })
        .with_on_page_load_handler(move |event, url| {
            let ev = match event {
                PageLoadEvent::Started => UserEvent::PageLoadStarted(url),
                PageLoadEvent::Finished => UserEvent::PageLoadFinished(url),
            };
            let _ = load_proxy.send_event(ev);
        });

    if let Some(script) = &options.init_script {
        builder = builder.with_initialization_script(script);
    }
    if !options.javascript {
        builder = builder.with_javascript_disabled();
    }
    if let Some(agent) = &options.user_agent {
        builder = builder.with_user_agent(agent);
    }
    builder = match target {
        LoadTarget::Url(url) => builder.with_url(url),
        LoadTarget::Html(html) => builder.with_html(html),
    };

    builder
        .build_as_child(window)
        .map_err(|e| WebShellError::Surface(e.to_string()))
}

/// Static overlay; never runs script or handles input beyond display.
fn build_overlay_view(window: &Window) -> Result<WebView> {
    let size = window.inner_size();
    WebViewBuilder::new()
        .with_bounds(full_bounds(size.width, size.height))
        .with_html(webshell_host::surfaces::spinner_html())
        .with_devtools(false)
        .build_as_child(window)
        .map_err(|e| WebShellError::Surface(e.to_string()))
}

/// Check the content origin in the background. Only failures are reported;
/// success is signalled by the browser's own load events.
fn spawn_preflight(
    rt: &tokio::runtime::Runtime,
    url: String,
    timeout: Duration,
    platform: Arc<dyn PlatformBridge>,
    proxy: EventLoopProxy<UserEvent>,
) {
    rt.spawn(async move {
        if let Err(error) = preflight::check_remote(&url, timeout).await {
            let probe = platform_probe(platform);
            let connected = tokio::task::spawn_blocking(probe).await.unwrap_or(true);
            let _ = proxy.send_event(UserEvent::PreflightFailed { error, connected });
        }
    });
}

/// The desktop stand-in for a hardware back button. Escape is left to the page.
fn is_back_key(key: &Key<'_>) -> bool {
    *key == Key::BrowserBack
}

/// Content view settings derived from the config.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ContentOptions {
    javascript: bool,
    /// The bridge script; absent when scripting is off.
    init_script: Option<String>,
    devtools: bool,
    autoplay: bool,
    incognito: bool,
    swipe_navigation: bool,
    user_agent: Option<String>,
}

impl ContentOptions {
    fn from_config(config: &ShellConfig) -> Self {
        let settings = &config.webview;
        Self {
            javascript: settings.javascript_enabled,
            init_script: settings
                .javascript_enabled
                .then(|| ScriptInjector::new(config.debounce()).script()),
            devtools: settings.devtools,
            autoplay: settings.inline_media_playback,
            incognito: !settings.dom_storage_enabled,
            swipe_navigation: settings.bounces,
            user_agent: settings.user_agent.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use webshell_core::config::WebViewSettings;

    use super::*;

    #[test]
    fn defaults_inject_the_bridge() {
        let options = ContentOptions::from_config(&ShellConfig::default());
        assert!(options.javascript);
        assert!(options.init_script.unwrap().contains("__webshell"));
        assert!(!options.incognito);
        assert!(options.autoplay);
        assert!(!options.swipe_navigation);
    }

    #[test]
    fn disabled_javascript_turns_scripting_off() {
        let config = ShellConfig {
            webview: WebViewSettings {
                javascript_enabled: false,
                ..Default::default()
            },
            ..Default::default()
        };
        let options = ContentOptions::from_config(&config);
        assert!(!options.javascript);
        assert_eq!(options.init_script, None);
    }

    #[test]
    fn storage_off_means_incognito() {
        let config = ShellConfig {
            webview: WebViewSettings {
                dom_storage_enabled: false,
                user_agent: Some("Shop/1.0".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let options = ContentOptions::from_config(&config);
        assert!(options.incognito);
        assert_eq!(options.user_agent.as_deref(), Some("Shop/1.0"));
    }

    #[test]
    fn only_browser_back_is_the_back_signal() {
        assert!(is_back_key(&Key::BrowserBack));
        assert!(!is_back_key(&Key::Escape));
        assert!(!is_back_key(&Key::Backspace));
    }

    #[test]
    fn debounce_reaches_the_script() {
        let config = ShellConfig {
            debounce_ms: 120,
            ..Default::default()
        };
        let script = ContentOptions::from_config(&config).init_script.unwrap();
        assert!(script.contains("var DEBOUNCE_MS = 120;"));
    }
}
