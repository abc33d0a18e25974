// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Static HTML for the overlay surface: loading spinner, error box and
// offline notice. None of them run script or accept input.

use webshell_core::notices::Notice;
use webshell_core::ShellView;

const BASE_STYLE: &str = "\
html,body{margin:0;height:100%;-webkit-user-select:none;user-select:none;\
-webkit-touch-callout:none;overscroll-behavior:none;}\
body{display:flex;align-items:center;justify-content:center;\
font-family:system-ui,-apple-system,sans-serif;background:#fff;color:#222;}\
.box{max-width:22rem;padding:1.5rem;text-align:center;}\
h1{font-size:1.25rem;margin:0 0 .75rem;}\
p{margin:.5rem 0;line-height:1.4;}\
.hint{color:#666;font-size:.9rem;}";

const SPINNER_STYLE: &str = "\
body{background:rgba(255,255,255,.7);}\
.spinner{width:42px;height:42px;border:4px solid #d0d0ff;border-top-color:#0000ff;\
border-radius:50%;animation:spin .8s linear infinite;}\
@keyframes spin{to{transform:rotate(360deg)}}";

/// Overlay document for a view, or `None` when the content shows bare.
pub fn overlay_html(view: &ShellView) -> Option<String> {
    match view {
        ShellView::Content { spinner: false } => None,
        ShellView::Content { spinner: true } => Some(spinner_html()),
        ShellView::ErrorSurface { notice } | ShellView::OfflineNotice { notice } => {
            Some(notice_html(notice))
        }
    }
}

pub fn spinner_html() -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width,initial-scale=1,user-scalable=no\">\
         <style>{BASE_STYLE}{SPINNER_STYLE}</style></head>\
         <body><div class=\"spinner\" role=\"progressbar\" aria-label=\"Loading\"></div></body></html>"
    )
}

pub fn notice_html(notice: &Notice) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width,initial-scale=1,user-scalable=no\">\
         <style>{BASE_STYLE}</style></head>\
         <body><div class=\"box\"><h1>{}</h1><p>{}</p><p class=\"hint\">{}</p></div></body></html>",
        escape_html(&notice.title),
        escape_html(&notice.message),
        escape_html(&notice.suggestion),
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
