// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host shell controller.
//
// Owns the lifecycle state machine and reacts to embedded-browser callbacks,
// the connectivity sensor, the hardware back signal and bridge messages.
// Every handler runs on the UI thread and must return quickly; the only
// blocking calls are modal native dialogs.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use webshell_bridge::traits::PlatformBridge;
use webshell_core::error::Result;
use webshell_core::notices::{Notice, notice_for_error, offline_notice};
use webshell_core::origin::OriginAllowList;
use webshell_core::protocol::{self, BridgeEvent, ConfirmReply};
use webshell_core::{BackOutcome, LinkPolicy, ShellConfig, ShellState, ShellView, WebShellError};

use crate::lifecycle::{Lifecycle, LifecycleEvent, ShellPhase};
use crate::splash::SplashGuard;

/// The embedded browser as seen by the shell.
pub trait BrowserSurface {
    /// Load `url` in the content view.
    fn navigate(&mut self, url: &str) -> Result<()>;

    /// Go one entry back in the content view's history.
    fn go_back(&mut self) -> Result<()>;

    /// Reload the content view.
    fn reload(&mut self) -> Result<()>;

    /// Run script inside the current page.
    fn evaluate_script(&mut self, script: &str) -> Result<()>;

    /// Show `view`: the content (with or without spinner) or a static surface.
    fn render(&mut self, view: &ShellView) -> Result<()>;
}

/// The host shell.
pub struct HostShell<S: BrowserSurface> {
    config: ShellConfig,
    allow_list: OriginAllowList,
    lifecycle: Lifecycle,
    splash: SplashGuard,
    surface: S,
    platform: Arc<dyn PlatformBridge>,
    error_notice: Option<Notice>,
    rendered: Option<ShellView>,
    reload_pending: bool,
    initial_load_done: bool,
    /// Keeps an error up through the browser's own initial (placeholder)
    /// load, whose start event would otherwise clear it.
    pinned_error: bool,
}

impl<S: BrowserSurface> HostShell<S> {
    pub fn new(config: ShellConfig, surface: S, platform: Arc<dyn PlatformBridge>) -> Self {
        let allow_list = config.origin_allow_list();
        info!(platform = platform.platform_name(), "host shell created");
        Self {
            config,
            allow_list,
            lifecycle: Lifecycle::new(),
            splash: SplashGuard::new(),
            surface,
            platform,
            error_notice: None,
            rendered: None,
            reload_pending: false,
            initial_load_done: false,
            pinned_error: false,
        }
    }

    /// Put the initial (loading) view on screen.
    pub fn start(&mut self) {
        self.refresh();
    }

    pub fn state(&self) -> ShellState {
        self.lifecycle.snapshot()
    }

    pub fn splash_dismissed(&self) -> bool {
        self.splash.is_dismissed()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// What should be on screen for the current state.
    pub fn view(&self) -> ShellView {
        match self.lifecycle.phase() {
            ShellPhase::Offline { .. } => ShellView::OfflineNotice {
                notice: offline_notice(),
            },
            ShellPhase::Error => ShellView::ErrorSurface {
                notice: self
                    .error_notice
                    .clone()
                    .unwrap_or_else(|| notice_for_error(&WebShellError::LoadFailed(String::new()))),
            },
            ShellPhase::Loading => ShellView::Content { spinner: true },
            ShellPhase::Ready => ShellView::Content {
                spinner: self.config.spinner_until_script_ready
                    && !self.lifecycle.snapshot().script_ready,
            },
        }
    }

    // -- Browser lifecycle ---------------------------------------------------

    pub fn on_load_start(&mut self) {
        if self.pinned_error {
            debug!("load start ignored while content is unavailable");
            return;
        }
        debug!("load started");
        self.error_notice = None;
        self.lifecycle.apply(LifecycleEvent::LoadStarted);
        self.refresh();
    }

    pub fn on_load_end(&mut self) {
        self.initial_load_done = true;
        if std::mem::take(&mut self.pinned_error) {
            debug!("initial load finished behind the error surface");
            return;
        }
        debug!("load finished");
        self.lifecycle.apply(LifecycleEvent::LoadFinished);
        self.splash.dismiss(self.platform.as_ref());
        self.refresh();
    }

    /// Terminal until the next load starts; no retry happens here.
    pub fn on_load_error(&mut self, err: WebShellError) {
        error!(error = %err, "page load failed");
        self.error_notice = Some(notice_for_error(&err));
        self.lifecycle.apply(LifecycleEvent::LoadFailed);
        self.splash.dismiss(self.platform.as_ref());
        self.refresh();
    }

    /// The configured content can't be shown at all (missing bundle,
    /// unreachable origin). Before the first page finishes, the browser's
    /// own start/finish events for that load leave the error in place.
    pub fn on_content_unavailable(&mut self, err: WebShellError) {
        self.pinned_error = !self.initial_load_done;
        self.on_load_error(err);
    }

    /// The content reachability check failed before the page could load.
    ///
    /// With connectivity this is a load error; without it the shell goes
    /// offline and reloads as soon as the network returns.
    pub fn on_preflight_failed(&mut self, err: WebShellError, connected: bool) {
        if connected {
            self.on_content_unavailable(err);
        } else {
            info!(error = %err, "content unreachable while offline");
            self.reload_pending = true;
            self.on_connectivity_change(false);
        }
    }

    pub fn on_navigation_state_change(&mut self, can_go_back: bool) {
        self.lifecycle
            .apply(LifecycleEvent::NavigationChanged { can_go_back });
    }

    // -- Platform signals ----------------------------------------------------

    /// Route a hardware back press. `Unhandled` means the platform default
    /// (usually leaving the app) should run.
    pub fn on_back_pressed(&mut self) -> BackOutcome {
        if !self.state().can_go_back {
            debug!("back pressed with empty history");
            return BackOutcome::Unhandled;
        }
        if let Err(e) = self.surface.go_back() {
            warn!(error = %e, "go back failed");
        }
        BackOutcome::Handled
    }

    pub fn on_connectivity_change(&mut self, connected: bool) {
        let was_connected = self.state().connected;
        if !self
            .lifecycle
            .apply(LifecycleEvent::ConnectivityChanged { connected })
        {
            return;
        }
        info!(connected, "connectivity changed");

        if !connected {
            self.splash.dismiss(self.platform.as_ref());
        }
        self.refresh();

        if connected && !was_connected && (self.config.reload_on_reconnect || self.reload_pending) {
            self.reload_pending = false;
            if let Err(e) = self.surface.reload() {
                warn!(error = %e, "reload after reconnect failed");
            }
        }
    }

    // -- Bridge --------------------------------------------------------------

    /// Handle one raw message from the page. Returns the event that was
    /// dispatched, or `None` when the message was ignored.
    pub fn on_bridge_message(&mut self, raw: &str) -> Option<BridgeEvent> {
        let event = match protocol::parse_message(raw) {
            Ok(event) => event,
            Err(WebShellError::UnknownEventType(kind)) => {
                debug!(kind = %kind, "ignoring unknown bridge event");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "ignoring malformed bridge message");
                return None;
            }
        };
        self.dispatch(event.clone());
        Some(event)
    }

    fn dispatch(&mut self, event: BridgeEvent) {
        debug!(kind = event.kind(), "bridge event");
        match event {
            BridgeEvent::Alert { message } => self.show_alert(&message),
            BridgeEvent::Confirm { message, id } => self.answer_confirm(&message, id),
            BridgeEvent::Link { url } => self.follow_link(&url),
            BridgeEvent::Loaded => {
                self.lifecycle.apply(LifecycleEvent::ScriptReady);
                self.refresh();
            }
            BridgeEvent::Error { message } => warn!(message = %message, "page script error"),
            BridgeEvent::Network { status } => self.on_connectivity_change(status.is_online()),
        }
    }

    fn show_alert(&self, message: &str) {
        match self.platform.show_alert(&self.config.app_name, message) {
            Ok(()) => {}
            Err(WebShellError::PlatformUnavailable) => {
                info!(message, "page alert (no native dialog on this platform)");
            }
            Err(e) => warn!(error = %e, "alert dialog failed"),
        }
    }

    /// Ask the user and send the answer back. Without native dialogs the
    /// answer is `false` so the page's promise still settles.
    fn answer_confirm(&mut self, message: &str, id: Option<String>) {
        let accepted = match self.platform.show_confirm(&self.config.app_name, message) {
            Ok(accepted) => accepted,
            Err(WebShellError::PlatformUnavailable) => {
                warn!(message, "confirm without native dialog; answering false");
                false
            }
            Err(e) => {
                warn!(error = %e, "confirm dialog failed; answering false");
                false
            }
        };

        let reply = ConfirmReply::new(id, accepted);
        debug!(reply = %reply, "confirm answered");
        if let Err(e) = self.surface.evaluate_script(&reply.dispatch_script()) {
            warn!(error = %e, "failed to deliver confirm reply");
        }
    }

    fn follow_link(&mut self, url: &str) {
        match self.config.link_policy {
            LinkPolicy::Ignore => debug!(url, "link ignored by policy"),
            LinkPolicy::Internal => self.navigate_internal(url),
            LinkPolicy::External => match self.platform.open_external(url) {
                Ok(()) => {}
                Err(WebShellError::PlatformUnavailable) => {
                    debug!(url, "no external opener; navigating in place");
                    self.navigate_internal(url);
                }
                Err(e) => warn!(error = %e, url, "failed to open link externally"),
            },
        }
    }

    fn navigate_internal(&mut self, url: &str) {
        if !self.allow_list.permits(url) {
            warn!(error = %WebShellError::NavigationBlocked(url.to_string()), "link not followed");
            return;
        }
        if let Err(e) = self.surface.navigate(url) {
            warn!(error = %e, url, "navigation failed");
        }
    }

    /// Push the current view to the surface if it changed.
    fn refresh(&mut self) {
        let view = self.view();
        if self.rendered.as_ref() == Some(&view) {
            return;
        }
        if let Err(e) = self.surface.render(&view) {
            warn!(error = %e, "failed to render shell view");
        }
        self.rendered = Some(view);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use webshell_bridge::traits::*;

    use super::*;

    // -- Test doubles --------------------------------------------------------

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum SurfaceCall {
        Navigate(String),
        GoBack,
        Reload,
        Eval(String),
        Render(ShellView),
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<SurfaceCall>,
    }

    impl RecordingSurface {
        fn count(&self, pred: impl Fn(&SurfaceCall) -> bool) -> usize {
            self.calls.iter().filter(|c| pred(c)).count()
        }

        fn last_render(&self) -> Option<&ShellView> {
            self.calls.iter().rev().find_map(|c| match c {
                SurfaceCall::Render(v) => Some(v),
                _ => None,
            })
        }
    }

    impl BrowserSurface for RecordingSurface {
        fn navigate(&mut self, url: &str) -> Result<()> {
            self.calls.push(SurfaceCall::Navigate(url.to_string()));
            Ok(())
        }
        fn go_back(&mut self) -> Result<()> {
            self.calls.push(SurfaceCall::GoBack);
            Ok(())
        }
        fn reload(&mut self) -> Result<()> {
            self.calls.push(SurfaceCall::Reload);
            Ok(())
        }
        fn evaluate_script(&mut self, script: &str) -> Result<()> {
            self.calls.push(SurfaceCall::Eval(script.to_string()));
            Ok(())
        }
        fn render(&mut self, view: &ShellView) -> Result<()> {
            self.calls.push(SurfaceCall::Render(view.clone()));
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakePlatform {
        dialogs: bool,
        external: bool,
        confirm_answer: bool,
        alerts: Mutex<Vec<(String, String)>>,
        confirms: Mutex<Vec<String>>,
        opened: Mutex<Vec<String>>,
        splash_hides: Mutex<u32>,
    }

    impl FakePlatform {
        fn with_dialogs(confirm_answer: bool) -> Self {
            Self {
                dialogs: true,
                confirm_answer,
                ..Default::default()
            }
        }
    }

    impl PlatformBridge for FakePlatform {
        fn platform_name(&self) -> &str {
            "Fake"
        }
    }

    impl NativeDialogs for FakePlatform {
        fn show_alert(&self, title: &str, message: &str) -> Result<()> {
            if !self.dialogs {
                return Err(WebShellError::PlatformUnavailable);
            }
            self.alerts
                .lock()
                .unwrap()
                .push((title.to_string(), message.to_string()));
            Ok(())
        }
        fn show_confirm(&self, _title: &str, message: &str) -> Result<bool> {
            if !self.dialogs {
                return Err(WebShellError::PlatformUnavailable);
            }
            self.confirms.lock().unwrap().push(message.to_string());
            Ok(self.confirm_answer)
        }
    }

    impl NativeConnectivity for FakePlatform {
        fn is_connected(&self) -> Result<bool> {
            Ok(true)
        }
    }

    impl NativeSplash for FakePlatform {
        fn hide_splash(&self) -> Result<()> {
            *self.splash_hides.lock().unwrap() += 1;
            Ok(())
        }
    }

    impl NativeExternalLinks for FakePlatform {
        fn open_external(&self, url: &str) -> Result<()> {
            if !self.external {
                return Err(WebShellError::PlatformUnavailable);
            }
            self.opened.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    fn shell_with(
        config: ShellConfig,
        platform: FakePlatform,
    ) -> (HostShell<RecordingSurface>, Arc<FakePlatform>) {
        let platform = Arc::new(platform);
        let mut shell = HostShell::new(config, RecordingSurface::default(), platform.clone());
        shell.start();
        (shell, platform)
    }

    fn ready_shell(platform: FakePlatform) -> (HostShell<RecordingSurface>, Arc<FakePlatform>) {
        let (mut shell, platform) = shell_with(ShellConfig::default(), platform);
        shell.on_load_end();
        (shell, platform)
    }

    // -- Lifecycle -----------------------------------------------------------

    #[test]
    fn starts_with_spinner() {
        let (shell, _) = shell_with(ShellConfig::default(), FakePlatform::default());
        assert_eq!(
            shell.surface().last_render(),
            Some(&ShellView::Content { spinner: true })
        );
        assert!(shell.state().loading);
    }

    #[test]
    fn load_end_clears_spinner_and_dismisses_splash() {
        let (shell, platform) = ready_shell(FakePlatform::default());
        assert!(!shell.state().loading);
        assert!(shell.splash_dismissed());
        assert_eq!(*platform.splash_hides.lock().unwrap(), 1);
        assert_eq!(
            shell.surface().last_render(),
            Some(&ShellView::Content { spinner: false })
        );
    }

    #[test]
    fn repeated_load_end_hides_splash_once() {
        let (mut shell, platform) = ready_shell(FakePlatform::default());
        shell.on_load_start();
        shell.on_load_end();
        assert_eq!(*platform.splash_hides.lock().unwrap(), 1);
        assert!(shell.splash_dismissed());
    }

    #[test]
    fn load_error_shows_static_surface_without_retry() {
        let (mut shell, _) = shell_with(ShellConfig::default(), FakePlatform::default());
        shell.on_load_error(WebShellError::Unreachable("shop.example:443".into()));

        let state = shell.state();
        assert!(state.has_error && !state.loading);
        match shell.surface().last_render() {
            Some(ShellView::ErrorSurface { notice }) => {
                assert_eq!(notice.title, "Can't reach the server")
            }
            other => panic!("unexpected view: {other:?}"),
        }
        assert_eq!(shell.surface().count(|c| *c == SurfaceCall::Reload), 0);
    }

    #[test]
    fn unchanged_view_is_not_re_rendered() {
        let (mut shell, _) = ready_shell(FakePlatform::default());
        let renders = shell
            .surface()
            .count(|c| matches!(c, SurfaceCall::Render(_)));
        shell.on_navigation_state_change(true);
        shell.on_load_end();
        assert_eq!(
            shell
                .surface()
                .count(|c| matches!(c, SurfaceCall::Render(_))),
            renders
        );
    }

    // -- Back button ---------------------------------------------------------

    #[test]
    fn back_with_history_is_handled_once() {
        let (mut shell, _) = ready_shell(FakePlatform::default());
        shell.on_navigation_state_change(true);
        assert_eq!(shell.on_back_pressed(), BackOutcome::Handled);
        assert_eq!(shell.surface().count(|c| *c == SurfaceCall::GoBack), 1);
    }

    #[test]
    fn back_without_history_is_unhandled() {
        let (mut shell, _) = ready_shell(FakePlatform::default());
        shell.on_navigation_state_change(false);
        assert_eq!(shell.on_back_pressed(), BackOutcome::Unhandled);
        assert_eq!(shell.surface().count(|c| *c == SurfaceCall::GoBack), 0);
    }

    // -- Connectivity --------------------------------------------------------

    #[test]
    fn offline_hides_content_and_reconnect_restores_it() {
        let (mut shell, _) = ready_shell(FakePlatform::default());

        shell.on_connectivity_change(false);
        assert!(!shell.state().connected);
        let view = shell.surface().last_render().unwrap();
        assert!(!view.shows_content());
        assert!(matches!(view, ShellView::OfflineNotice { .. }));

        shell.on_connectivity_change(true);
        assert!(shell.state().connected);
        assert_eq!(
            shell.surface().last_render(),
            Some(&ShellView::Content { spinner: false })
        );
        assert_eq!(shell.surface().count(|c| *c == SurfaceCall::Reload), 0);
    }

    #[test]
    fn reconnect_reloads_when_configured() {
        let config = ShellConfig {
            reload_on_reconnect: true,
            ..Default::default()
        };
        let (mut shell, _) = shell_with(config, FakePlatform::default());
        shell.on_load_end();
        shell.on_connectivity_change(false);
        shell.on_connectivity_change(true);
        assert_eq!(shell.surface().count(|c| *c == SurfaceCall::Reload), 1);
    }

    #[test]
    fn offline_preflight_failure_reloads_on_reconnect() {
        let (mut shell, _) = shell_with(ShellConfig::default(), FakePlatform::default());
        shell.on_preflight_failed(WebShellError::Unreachable("x:443".into()), false);
        assert!(!shell.state().connected);
        assert!(!shell.state().has_error);

        shell.on_connectivity_change(true);
        assert_eq!(shell.surface().count(|c| *c == SurfaceCall::Reload), 1);
    }

    #[test]
    fn online_preflight_failure_is_load_error() {
        let (mut shell, _) = shell_with(ShellConfig::default(), FakePlatform::default());
        shell.on_preflight_failed(WebShellError::Unreachable("x:443".into()), true);
        assert!(shell.state().has_error);
    }

    fn assert_error_surface(shell: &HostShell<RecordingSurface>) {
        assert!(shell.state().has_error);
        assert!(!shell.view().shows_content());
        assert!(matches!(
            shell.surface().last_render(),
            Some(ShellView::ErrorSurface { .. })
        ));
    }

    #[test]
    fn missing_bundle_survives_placeholder_load() {
        let (mut shell, _) = shell_with(ShellConfig::default(), FakePlatform::default());
        shell.on_content_unavailable(WebShellError::BundleMissing("index.html".into()));
        assert_error_surface(&shell);

        shell.on_load_start();
        shell.on_load_end();
        assert_error_surface(&shell);
        match shell.surface().last_render() {
            Some(ShellView::ErrorSurface { notice }) => assert_eq!(notice.title, "Content is missing"),
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[test]
    fn preflight_failure_before_initial_load_events_stays_up() {
        let (mut shell, _) = shell_with(ShellConfig::default(), FakePlatform::default());
        shell.on_preflight_failed(WebShellError::Unreachable("x:443".into()), true);
        shell.on_load_start();
        shell.on_load_end();
        assert_error_surface(&shell);
    }

    #[test]
    fn preflight_failure_between_start_and_finish_stays_up() {
        let (mut shell, _) = shell_with(ShellConfig::default(), FakePlatform::default());
        shell.on_load_start();
        shell.on_preflight_failed(WebShellError::Unreachable("x:443".into()), true);
        shell.on_load_end();
        assert_error_surface(&shell);
    }

    #[test]
    fn loads_after_the_initial_one_clear_the_error() {
        let (mut shell, _) = shell_with(ShellConfig::default(), FakePlatform::default());
        shell.on_content_unavailable(WebShellError::Unreachable("x:443".into()));
        shell.on_load_start();
        shell.on_load_end();

        shell.on_load_start();
        assert!(!shell.state().has_error);
        shell.on_load_end();
        assert_eq!(
            shell.surface().last_render(),
            Some(&ShellView::Content { spinner: false })
        );
    }

    #[test]
    fn late_content_failure_is_an_ordinary_load_error() {
        let (mut shell, _) = ready_shell(FakePlatform::default());
        shell.on_content_unavailable(WebShellError::Unreachable("x:443".into()));
        assert_error_surface(&shell);
        shell.on_load_start();
        assert!(!shell.state().has_error);
    }

    // -- Bridge --------------------------------------------------------------

    #[test]
    fn alert_shows_exact_text_with_single_control() {
        let (mut shell, platform) = ready_shell(FakePlatform::with_dialogs(true));
        let before = shell.state();

        let ev = shell.on_bridge_message(r#"{"type":"alert","message":"Out of stock"}"#);
        assert!(matches!(ev, Some(BridgeEvent::Alert { .. })));

        let alerts = platform.alerts.lock().unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].1, "Out of stock");
        assert!(platform.confirms.lock().unwrap().is_empty());
        assert_eq!(shell.state(), before);
    }

    #[test]
    fn confirm_true_replies_true() {
        let (mut shell, platform) = ready_shell(FakePlatform::with_dialogs(true));
        shell.on_bridge_message(r#"{"type":"confirm","message":"Delete?"}"#);

        assert_eq!(platform.confirms.lock().unwrap().as_slice(), ["Delete?"]);
        let reply = ConfirmReply::new(None, true).dispatch_script();
        assert_eq!(shell.surface().count(|c| *c == SurfaceCall::Eval(reply.clone())), 1);
    }

    #[test]
    fn confirm_false_replies_false_with_correlation_id() {
        let (mut shell, _) = ready_shell(FakePlatform::with_dialogs(false));
        shell.on_bridge_message(r#"{"type":"confirm","message":"Delete?","id":"9"}"#);

        let reply = ConfirmReply::new(Some("9".into()), false).dispatch_script();
        assert!(reply.contains("confirmResult:9:false"));
        assert_eq!(shell.surface().count(|c| *c == SurfaceCall::Eval(reply.clone())), 1);
    }

    #[test]
    fn confirm_without_dialogs_still_settles() {
        let (mut shell, _) = ready_shell(FakePlatform::default());
        shell.on_bridge_message(r#"{"type":"confirm","message":"Sure?","id":"1"}"#);
        let reply = ConfirmReply::new(Some("1".into()), false).dispatch_script();
        assert_eq!(shell.surface().count(|c| *c == SurfaceCall::Eval(reply.clone())), 1);
    }

    #[test]
    fn alert_without_dialogs_is_dropped() {
        let (mut shell, platform) = ready_shell(FakePlatform::default());
        let state = shell.state();
        let calls = shell.surface().calls.len();

        let ev = shell.on_bridge_message(r#"{"type":"alert","message":"Saved"}"#);
        assert!(matches!(ev, Some(BridgeEvent::Alert { .. })));
        assert!(platform.alerts.lock().unwrap().is_empty());
        assert_eq!(shell.state(), state);
        assert_eq!(shell.surface().calls.len(), calls);
    }

    #[test]
    fn malformed_and_unknown_messages_change_nothing() {
        let (mut shell, platform) = ready_shell(FakePlatform::with_dialogs(true));
        let state = shell.state();
        let calls = shell.surface().calls.len();

        for raw in ["", "not json", "{", r#"{"type":"vibrate"}"#, r#"{"message":"x"}"#, "null"] {
            assert_eq!(shell.on_bridge_message(raw), None, "{raw:?} was dispatched");
        }

        assert_eq!(shell.state(), state);
        assert_eq!(shell.surface().calls.len(), calls);
        assert!(platform.alerts.lock().unwrap().is_empty());
    }

    #[test]
    fn internal_link_navigates_in_place() {
        let (mut shell, _) = ready_shell(FakePlatform::default());
        shell.on_bridge_message(r#"{"type":"link","url":"https://shop.example/p/1"}"#);
        assert_eq!(
            shell
                .surface()
                .count(|c| *c == SurfaceCall::Navigate("https://shop.example/p/1".into())),
            1
        );
    }

    #[test]
    fn blocked_origin_is_not_followed() {
        let config = ShellConfig {
            allowed_origins: vec!["https://shop.example".into()],
            ..Default::default()
        };
        let (mut shell, _) = shell_with(config, FakePlatform::default());
        shell.on_bridge_message(r#"{"type":"link","url":"https://elsewhere.example/"}"#);
        assert_eq!(
            shell
                .surface()
                .count(|c| matches!(c, SurfaceCall::Navigate(_))),
            0
        );
    }

    #[test]
    fn external_link_goes_to_platform() {
        let config = ShellConfig {
            link_policy: LinkPolicy::External,
            ..Default::default()
        };
        let platform = FakePlatform {
            external: true,
            ..Default::default()
        };
        let (mut shell, platform) = shell_with(config, platform);
        shell.on_bridge_message(r#"{"type":"link","url":"https://docs.example/"}"#);
        assert_eq!(
            platform.opened.lock().unwrap().as_slice(),
            ["https://docs.example/"]
        );
        assert_eq!(
            shell
                .surface()
                .count(|c| matches!(c, SurfaceCall::Navigate(_))),
            0
        );
    }

    #[test]
    fn external_link_falls_back_to_internal() {
        let config = ShellConfig {
            link_policy: LinkPolicy::External,
            ..Default::default()
        };
        let (mut shell, _) = shell_with(config, FakePlatform::default());
        shell.on_bridge_message(r#"{"type":"link","url":"https://docs.example/"}"#);
        assert_eq!(
            shell
                .surface()
                .count(|c| matches!(c, SurfaceCall::Navigate(_))),
            1
        );
    }

    #[test]
    fn ignored_link_does_nothing() {
        let config = ShellConfig {
            link_policy: LinkPolicy::Ignore,
            ..Default::default()
        };
        let (mut shell, _) = shell_with(config, FakePlatform::default());
        let calls = shell.surface().calls.len();
        shell.on_bridge_message(r#"{"type":"link","url":"https://docs.example/"}"#);
        assert_eq!(shell.surface().calls.len(), calls);
    }

    #[test]
    fn loaded_marks_script_ready_and_clears_spinner_when_waiting() {
        let config = ShellConfig {
            spinner_until_script_ready: true,
            ..Default::default()
        };
        let (mut shell, _) = shell_with(config, FakePlatform::default());
        shell.on_load_end();
        assert_eq!(
            shell.surface().last_render(),
            Some(&ShellView::Content { spinner: true })
        );

        shell.on_bridge_message(r#"{"type":"loaded"}"#);
        assert!(shell.state().script_ready);
        assert_eq!(
            shell.surface().last_render(),
            Some(&ShellView::Content { spinner: false })
        );
    }

    #[test]
    fn script_error_is_logged_only() {
        let (mut shell, _) = ready_shell(FakePlatform::default());
        let state = shell.state();
        let calls = shell.surface().calls.len();
        let ev = shell.on_bridge_message(r#"{"type":"error","message":"x is undefined"}"#);
        assert!(matches!(ev, Some(BridgeEvent::Error { .. })));
        assert_eq!(shell.state(), state);
        assert_eq!(shell.surface().calls.len(), calls);
    }

    #[test]
    fn network_event_updates_connectivity() {
        let (mut shell, _) = ready_shell(FakePlatform::default());
        shell.on_bridge_message(r#"{"type":"network","status":"offline"}"#);
        assert!(!shell.state().connected);
        shell.on_bridge_message(r#"{"type":"network","status":"online"}"#);
        assert!(shell.state().connected);
    }
}
