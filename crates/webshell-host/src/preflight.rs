// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content reachability check.
//
// The embedded browser reports when a load finishes but not whether it
// failed, so before the first load the host opens a plain TCP connection to
// the content origin. Bundled documents are read up front by the runtime
// and need no check here.

use std::time::Duration;

use tokio::net::TcpStream;
use tracing::{debug, info};
use url::Url;

use webshell_core::error::{Result, WebShellError};

/// Open (and drop) a TCP connection to the URL's host and port.
pub async fn check_remote(url: &str, timeout: Duration) -> Result<()> {
    let parsed = Url::parse(url)?;
    let host = parsed
        .host_str()
        .ok_or_else(|| WebShellError::InvalidConfig(format!("content URL has no host: {url}")))?;
    let port = parsed
        .port_or_known_default()
        .ok_or_else(|| WebShellError::InvalidConfig(format!("content URL has no port: {url}")))?;
    let addr = format!("{host}:{port}");

    debug!(addr = %addr, "preflight connect");
    let _stream = tokio::time::timeout(timeout, TcpStream::connect(&addr))
        .await
        .map_err(|_| {
            WebShellError::LoadFailed(format!(
                "connection to {addr} timed out after {}ms",
                timeout.as_millis()
            ))
        })?
        .map_err(|e| WebShellError::Unreachable(format!("{addr}: {e}")))?;

    info!(addr = %addr, "content origin reachable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use tokio::net::TcpListener;

    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(2);

    #[tokio::test]
    async fn listening_port_is_reachable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let url = format!("http://127.0.0.1:{port}/index.html");
        assert!(check_remote(&url, TIMEOUT).await.is_ok());
    }

    #[tokio::test]
    async fn closed_port_is_unreachable() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = format!("http://127.0.0.1:{port}/");
        let err = check_remote(&url, TIMEOUT).await.unwrap_err();
        assert!(matches!(err, WebShellError::Unreachable(_)), "{err:?}");
    }

    #[tokio::test]
    async fn url_without_host_is_rejected() {
        let err = check_remote("data:text/html,hi", TIMEOUT).await.unwrap_err();
        assert!(matches!(err, WebShellError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn garbage_url_is_rejected() {
        let err = check_remote("not a url", TIMEOUT).await.unwrap_err();
        assert!(matches!(err, WebShellError::InvalidUrl(_)));
    }
}
