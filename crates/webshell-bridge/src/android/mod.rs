// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Each trait method invokes the corresponding
// Android API through JNI calls into the ART runtime.
//
// ## Architecture notes
//
// Connectivity, external links and launch-screen dismissal complete
// synchronously and are implemented here. `AlertDialog` must be built on the
// Activity's Looper thread and reports its answer through a Java listener,
// so native dialogs return `PlatformUnavailable`; the shell then falls back
// to logging alerts and answering confirms with `false`.

#![cfg(target_os = "android")]

use jni::{JNIEnv, JavaVM};
use jni::objects::{JObject, JString, JValue};

use webshell_core::error::{Result, WebShellError};

use crate::traits::*;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// `Context.CONNECTIVITY_SERVICE`.
const CONNECTIVITY_SERVICE: &str = "connectivity";

/// `Intent.FLAG_ACTIVITY_NEW_TASK`.
const FLAG_ACTIVITY_NEW_TASK: i32 = 0x1000_0000;

/// Run `f` with a [`JNIEnv`] attached to the current thread and the hosting
/// `Activity`.
///
/// Calls `ndk_context::android_context()` to retrieve the `JavaVM*` pointer
/// set by `android_main` or `ANativeActivity_onCreate`, then attaches the
/// current thread if it is not already attached.
fn with_activity<T>(f: impl FnOnce(&mut JNIEnv<'_>, &JObject<'_>) -> Result<T>) -> Result<T> {
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| WebShellError::Bridge(format!("failed to obtain JavaVM: {e}")))?;
    let mut env = vm
        .attach_current_thread()
        .map_err(|e| WebShellError::Bridge(format!("failed to attach JNI thread: {e}")))?;

    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(WebShellError::Bridge(
            "Android context is null — native activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    let activity = unsafe { JObject::from_raw(ptr.cast()) };

    f(&mut *env, &activity)
}

/// Map any `jni::errors::Error` into `WebShellError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> WebShellError {
    WebShellError::Bridge(format!("{context}: {e}"))
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of the webshell platform bridge.
///
/// Zero-sized; all state lives on the Java side.
pub struct AndroidBridge;

impl AndroidBridge {
    /// Create a new Android bridge. No JNI call happens until a trait
    /// method is invoked.
    pub fn new() -> Self {
        Self
    }
}

impl PlatformBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

impl NativeDialogs for AndroidBridge {
    fn show_alert(&self, _title: &str, _message: &str) -> Result<()> {
        Err(WebShellError::PlatformUnavailable)
    }

    fn show_confirm(&self, _title: &str, _message: &str) -> Result<bool> {
        Err(WebShellError::PlatformUnavailable)
    }
}

// ---------------------------------------------------------------------------
// NativeConnectivity — android.net.ConnectivityManager
// ---------------------------------------------------------------------------

impl NativeConnectivity for AndroidBridge {
    /// `getSystemService("connectivity").getActiveNetworkInfo()?.isConnected()`.
    ///
    /// Needs `ACCESS_NETWORK_STATE` in the manifest.
    fn is_connected(&self) -> Result<bool> {
        with_activity(|env, activity| {
            let j_service: JString = env
                .new_string(CONNECTIVITY_SERVICE)
                .map_err(|e| jni_err("new_string(connectivity)", e))?;

            let manager: JObject = env
                .call_method(
                    activity,
                    "getSystemService",
                    "(Ljava/lang/String;)Ljava/lang/Object;",
                    &[JValue::Object(&j_service)],
                )
                .map_err(|e| jni_err("getSystemService(connectivity)", e))?
                .l()
                .map_err(|e| jni_err("getSystemService->l", e))?;

            if manager.is_null() {
                return Err(WebShellError::Bridge(
                    "ConnectivityManager unavailable".into(),
                ));
            }

            let info: JObject = env
                .call_method(
                    &manager,
                    "getActiveNetworkInfo",
                    "()Landroid/net/NetworkInfo;",
                    &[],
                )
                .map_err(|e| jni_err("getActiveNetworkInfo", e))?
                .l()
                .map_err(|e| jni_err("getActiveNetworkInfo->l", e))?;

            if info.is_null() {
                return Ok(false);
            }

            env.call_method(&info, "isConnected", "()Z", &[])
                .map_err(|e| jni_err("NetworkInfo.isConnected", e))?
                .z()
                .map_err(|e| jni_err("isConnected->z", e))
        })
    }
}

// ---------------------------------------------------------------------------
// NativeSplash — Activity.reportFullyDrawn
// ---------------------------------------------------------------------------

impl NativeSplash for AndroidBridge {
    /// Tell the system the first meaningful frame is up, which releases the
    /// launch screen. Calling it again is harmless.
    fn hide_splash(&self) -> Result<()> {
        with_activity(|env, activity| {
            env.call_method(activity, "reportFullyDrawn", "()V", &[])
                .map_err(|e| jni_err("reportFullyDrawn", e))?;

            tracing::debug!("Android: reportFullyDrawn");
            Ok(())
        })
    }
}

// ---------------------------------------------------------------------------
// NativeExternalLinks — Intent.ACTION_VIEW
// ---------------------------------------------------------------------------

impl NativeExternalLinks for AndroidBridge {
    fn open_external(&self, url: &str) -> Result<()> {
        with_activity(|env, activity| {
            tracing::info!(url, "Android: launching view intent");

            // -- Uri.parse(url) -----------------------------------------------------
            let j_url: JString = env
                .new_string(url)
                .map_err(|e| jni_err("new_string(url)", e))?;

            let uri: JObject = env
                .call_static_method(
                    "android/net/Uri",
                    "parse",
                    "(Ljava/lang/String;)Landroid/net/Uri;",
                    &[JValue::Object(&j_url)],
                )
                .map_err(|e| jni_err("Uri.parse", e))?
                .l()
                .map_err(|e| jni_err("Uri.parse->l", e))?;

            // -- new Intent(ACTION_VIEW, uri) ---------------------------------------
            let j_action: JString = env
                .new_string("android.intent.action.VIEW")
                .map_err(|e| jni_err("new_string(ACTION_VIEW)", e))?;

            let intent: JObject = env
                .new_object(
                    "android/content/Intent",
                    "(Ljava/lang/String;Landroid/net/Uri;)V",
                    &[JValue::Object(&j_action), JValue::Object(&uri)],
                )
                .map_err(|e| jni_err("new Intent(VIEW)", e))?;

            env.call_method(
                &intent,
                "addFlags",
                "(I)Landroid/content/Intent;",
                &[JValue::Int(FLAG_ACTIVITY_NEW_TASK)],
            )
            .map_err(|e| jni_err("addFlags(NEW_TASK)", e))?;

            // -- Launch -------------------------------------------------------------
            env.call_method(
                activity,
                "startActivity",
                "(Landroid/content/Intent;)V",
                &[JValue::Object(&intent)],
            )
            .map_err(|e| jni_err("startActivity(view)", e))?;

            Ok(())
        })
    }
}
