// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host lifecycle state machine.
//
//   Loading ──finished──▶ Ready ──started──▶ Loading
//      │                                        ▲
//      └──failed──▶ Error ──started─────────────┘
//
//   any online phase ──disconnected──▶ Offline { resume }
//   Offline { resume } ──connected──▶ resume
//
// Load callbacks that arrive while offline update `resume`, so the shell
// comes back in whatever state the browser reached in the meantime.

use tracing::debug;

use webshell_core::ShellState;

/// A phase the shell can be in while connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnlinePhase {
    Loading,
    Ready,
    Error,
}

/// Lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellPhase {
    Loading,
    Ready,
    Error,
    /// No connectivity. `resume` is the phase to return to.
    Offline { resume: OnlinePhase },
}

impl From<OnlinePhase> for ShellPhase {
    fn from(phase: OnlinePhase) -> Self {
        match phase {
            OnlinePhase::Loading => ShellPhase::Loading,
            OnlinePhase::Ready => ShellPhase::Ready,
            OnlinePhase::Error => ShellPhase::Error,
        }
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    LoadStarted,
    LoadFinished,
    LoadFailed,
    NavigationChanged { can_go_back: bool },
    ConnectivityChanged { connected: bool },
    ScriptReady,
}

/// Lifecycle state owned by the host shell.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    phase: ShellPhase,
    can_go_back: bool,
    script_ready: bool,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    /// The shell starts out loading its first page.
    pub fn new() -> Self {
        Self {
            phase: ShellPhase::Loading,
            can_go_back: false,
            script_ready: false,
        }
    }

    pub fn phase(&self) -> ShellPhase {
        self.phase
    }

    /// Apply one event. Returns true when anything observable changed.
    pub fn apply(&mut self, event: LifecycleEvent) -> bool {
        let before = (self.phase, self.can_go_back, self.script_ready);

        match event {
            LifecycleEvent::LoadStarted => {
                self.script_ready = false;
                self.set_online_phase(OnlinePhase::Loading);
            }
            LifecycleEvent::LoadFinished => {
                // A failed load usually still "finishes" with the browser's
                // own error page; that must not clear the error.
                if self.online_phase() == OnlinePhase::Loading {
                    self.set_online_phase(OnlinePhase::Ready);
                }
            }
            LifecycleEvent::LoadFailed => {
                self.set_online_phase(OnlinePhase::Error);
            }
            LifecycleEvent::NavigationChanged { can_go_back } => {
                self.can_go_back = can_go_back;
            }
            LifecycleEvent::ConnectivityChanged { connected } => {
                self.phase = match (self.phase, connected) {
                    (ShellPhase::Offline { resume }, true) => resume.into(),
                    (ShellPhase::Offline { resume }, false) => ShellPhase::Offline { resume },
                    (_, true) => self.phase,
                    (_, false) => ShellPhase::Offline {
                        resume: self.online_phase(),
                    },
                };
            }
            LifecycleEvent::ScriptReady => {
                self.script_ready = true;
            }
        }

        let changed = before != (self.phase, self.can_go_back, self.script_ready);
        if changed {
            debug!(from = ?before.0, to = ?self.phase, "lifecycle transition");
        }
        changed
    }

    /// The data-model view of the current state.
    pub fn snapshot(&self) -> ShellState {
        let online = self.online_phase();
        ShellState {
            loading: online == OnlinePhase::Loading,
            connected: !matches!(self.phase, ShellPhase::Offline { .. }),
            can_go_back: self.can_go_back,
            has_error: online == OnlinePhase::Error,
            script_ready: self.script_ready,
        }
    }

    /// Phase ignoring connectivity.
    fn online_phase(&self) -> OnlinePhase {
        match self.phase {
            ShellPhase::Loading => OnlinePhase::Loading,
            ShellPhase::Ready => OnlinePhase::Ready,
            ShellPhase::Error => OnlinePhase::Error,
            ShellPhase::Offline { resume } => resume,
        }
    }

    fn set_online_phase(&mut self, next: OnlinePhase) {
        self.phase = match self.phase {
            ShellPhase::Offline { .. } => ShellPhase::Offline { resume: next },
            _ => next.into(),
        };
    }
}
