// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// webshell — Native platform bridge abstractions.
//
// Defines the capability traits the host shell needs from the operating
// system (dialogs, connectivity, splash screen, external links) and picks
// the implementation for the target at compile time.

pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub mod desktop;

#[cfg(target_os = "ios")]
pub mod unsupported;

/// Retrieves the bridge implementation for the target operating system.
pub fn platform_bridge() -> Box<dyn traits::PlatformBridge> {
    #[cfg(target_os = "android")]
    {
        // Android: `jni-rs` calls into the hosting Activity.
        Box::new(android::AndroidBridge::new())
    }
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        // Desktop/CI: rfd dialogs and a socket-level connectivity probe.
        Box::new(desktop::DesktopBridge::new())
    }
    #[cfg(target_os = "ios")]
    {
        Box::new(unsupported::UnsupportedBridge)
    }
}
