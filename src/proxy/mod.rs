// cna-tool: Filecoin Common Node API Tool
//
// SPDX-FileCopyrightText: 2026 Common Node API Contributors
// SPDX-License-Identifier: MIT

//! Validating JSON-RPC pass-through proxy.
//!
//! ```text
//! ┌────────┬─request──►┌────────────┬─request──►┌────────┐
//! │ client │           │ cna proxy  │           │ origin │
//! └────────┘◄─response─└────────────┘◄─response─└────────┘
//!                            |
//!                            v
//!                     MethodChecks::check
//!                     findings -> tracing (cna::check)
//! ```
//!
//! The proxy is transparent: origin bytes go back to the client unchanged
//! no matter what validation finds. Exchanges that are not JSON-RPC, or
//! name a method outside the document, are skipped at debug level.

pub mod check;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::{ConnectInfo, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use tokio::net::TcpListener;
use tokio::signal;
use tower::limit::ConcurrencyLimitLayer;
use tracing::{Instrument as _, debug, error, info, info_span};

use crate::error::{NetworkError, Result};
use crate::jsonrpc;
use crate::proxy::check::MethodChecks;

/// Runtime options for [`serve`].
#[derive(Debug, Clone)]
pub struct ProxyOptions {
    /// Address to listen on.
    pub listen: SocketAddr,
    /// Origin URL every request is forwarded to.
    pub remote: String,
    /// Maximum in-flight exchanges.
    pub concurrency: usize,
    /// Per-request timeout towards the origin.
    pub timeout: Duration,
}

struct ProxyState {
    client: reqwest::Client,
    remote: reqwest::Url,
    checks: MethodChecks,
}

/// Build the proxy service for the given options.
///
/// # Errors
///
/// Returns an error if the remote URL does not parse or the forwarding
/// client cannot be built.
pub fn router(options: &ProxyOptions, checks: MethodChecks) -> Result<Router> {
    let remote = reqwest::Url::parse(&options.remote)
        .map_err(|_| NetworkError::InvalidUrl(options.remote.clone()))?;
    let client = reqwest::Client::builder()
        .user_agent(format!("cna-tool/{}", env!("CARGO_PKG_VERSION")))
        .timeout(options.timeout)
        .build()
        .context("couldn't build origin client")?;

    let state = Arc::new(ProxyState {
        client,
        remote,
        checks,
    });

    Ok(Router::new()
        .fallback(forward)
        .layer(ConcurrencyLimitLayer::new(options.concurrency))
        .with_state(state))
}

/// Run the proxy until Ctrl-C.
///
/// The first Ctrl-C stops accepting connections and drains in-flight
/// exchanges; a second one forces shutdown.
///
/// # Errors
///
/// Returns an error if the listen address cannot be bound, the remote URL
/// does not parse, or the server fails while running.
pub async fn serve(options: ProxyOptions, checks: MethodChecks) -> Result<()> {
    let app = router(&options, checks)?;

    let listener = TcpListener::bind(options.listen)
        .await
        .map_err(|source| NetworkError::Bind {
            addr: options.listen.to_string(),
            source,
        })?;

    info!(target: "cna::serve", addr = %options.listen, "listening");

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(graceful_signal());

    tokio::select! {
        result = server => {
            result.context("server error")?;
            info!(target: "cna::shutdown", "finished graceful shutdown");
        }
        () = forced_signal() => {
            info!(target: "cna::shutdown", "forced shutdown");
        }
    }

    Ok(())
}

async fn graceful_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!(
            target: "cna::shutdown",
            "graceful shutdown on Ctrl-C, finishing outstanding requests (repeat to force)"
        ),
        // Signal handling unavailable: run until killed.
        Err(_) => std::future::pending::<()>().await,
    }
}

async fn forced_signal() {
    // Swallow the first Ctrl-C (graceful); fire on the second.
    for _ in 0..2 {
        if signal::ctrl_c().await.is_err() {
            // Signal handling unavailable: never force.
            std::future::pending::<()>().await;
        }
    }
}

/// Fallback handler: every route, every HTTP method.
async fn forward(
    State(state): State<Arc<ProxyState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: axum::extract::Request,
) -> Response {
    let exchange = proxy_exchange(&state, request)
        .instrument(info_span!(target: "cna", "serving client", %addr));
    match exchange.await {
        Ok(response) => response,
        Err(error) => {
            error!(
                target: "cna::serve",
                error = format!("{error:#}"),
                %addr,
                "error serving client"
            );
            let mut response = Response::new(Body::from("bad gateway"));
            *response.status_mut() = StatusCode::BAD_GATEWAY;
            response
        }
    }
}

async fn proxy_exchange(state: &ProxyState, request: axum::extract::Request) -> Result<Response> {
    let (parts, body) = request.into_parts();
    let request_body = axum::body::to_bytes(body, usize::MAX)
        .await
        .context("couldn't collect client request")?;

    let mut headers = parts.headers;
    // The origin sets its own Host; Content-Length is recomputed from the
    // buffered body.
    headers.remove(header::HOST);
    headers.remove(header::CONTENT_LENGTH);

    let origin_response = state
        .client
        .request(parts.method, state.remote.clone())
        .headers(headers)
        .body(request_body.clone())
        .send()
        .await
        .context("couldn't forward to origin")?;

    let status = origin_response.status();
    let mut response_headers = origin_response.headers().clone();
    let response_body = origin_response
        .bytes()
        .await
        .context("couldn't collect origin response")?;

    check_exchange(&state.checks, &request_body, &response_body);

    // The body was de-chunked by buffering.
    response_headers.remove(header::TRANSFER_ENCODING);
    let mut response = Response::new(Body::from(response_body));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    Ok(response)
}

/// Validate one buffered exchange and log the verdict.
fn check_exchange(checks: &MethodChecks, request_body: &Bytes, response_body: &Bytes) {
    let (Ok(request), Ok(response)) = (
        serde_json::from_slice::<jsonrpc::Request>(request_body),
        serde_json::from_slice::<jsonrpc::Response>(response_body),
    ) else {
        debug!(target: "cna::skip", "not a JSON-RPC exchange");
        return;
    };

    match checks.get(&request.method) {
        Some(check) => {
            let findings = check.check(&request, Some(&response));
            if findings.is_empty() {
                info!(target: "cna::check", method = %request.method, "passed");
            } else {
                info!(target: "cna::check", method = %request.method, ?findings, "failed");
            }
        }
        None => debug!(target: "cna::skip", method = %request.method, "not a specified method"),
    }
}
