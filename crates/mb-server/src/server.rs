//! Webhook listener.
//!
//! `tiny_http` blocks in `recv`, so each accept (and the body read that follows
//! it) runs on tokio's blocking pool. Deliveries are handled one at a time: the
//! next request is not accepted until the current one has been answered.

use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use mb_config::ServerConfig;

use crate::error::BridgeError;
use crate::pipeline::Bridge;
use crate::receiver::FormParams;

/// Routing decision for one request, before the body is looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Webhook,
    NotFound,
    MethodNotAllowed,
}

fn route(method: &tiny_http::Method, url: &str, webhook_path: &str) -> Route {
    let request_path = url.split('?').next().unwrap_or_default();
    if request_path != webhook_path {
        return Route::NotFound;
    }
    if *method != tiny_http::Method::Post {
        return Route::MethodNotAllowed;
    }
    Route::Webhook
}

enum Body {
    Complete(Vec<u8>),
    TooLarge,
    Unreadable(std::io::Error),
}

fn read_body(request: &mut tiny_http::Request, max_bytes: usize) -> Body {
    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX).saturating_add(1);
    let mut buf = Vec::new();
    match Read::take(request.as_reader(), limit).read_to_end(&mut buf) {
        Ok(_) if buf.len() > max_bytes => Body::TooLarge,
        Ok(_) => Body::Complete(buf),
        Err(e) => Body::Unreadable(e),
    }
}

/// Stops a running [`WebhookServer`] from another task.
#[derive(Clone)]
pub struct ShutdownHandle {
    server: Arc<tiny_http::Server>,
    stopping: Arc<AtomicBool>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.stopping.store(true, Ordering::SeqCst);
        self.server.unblock();
    }
}

pub struct WebhookServer {
    server: Arc<tiny_http::Server>,
    stopping: Arc<AtomicBool>,
    bridge: Bridge,
    path: String,
    max_body_bytes: usize,
}

impl WebhookServer {
    /// Bind the listener described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub fn bind(config: &ServerConfig, bridge: Bridge) -> anyhow::Result<Self> {
        let server = tiny_http::Server::http(config.listen.as_str())
            .map_err(|e| anyhow::anyhow!("failed to bind {}: {e}", config.listen))?;
        Ok(Self {
            server: Arc::new(server),
            stopping: Arc::new(AtomicBool::new(false)),
            bridge,
            path: config.path.clone(),
            max_body_bytes: config.max_body_bytes,
        })
    }

    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    #[must_use]
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            server: Arc::clone(&self.server),
            stopping: Arc::clone(&self.stopping),
        }
    }

    /// Accept and answer deliveries until shut down.
    ///
    /// # Errors
    ///
    /// Returns an error if accepting a connection fails for a reason other than
    /// shutdown.
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            if self.stopping.load(Ordering::SeqCst) {
                break;
            }

            let server = Arc::clone(&self.server);
            let max_body_bytes = self.max_body_bytes;
            let accepted = tokio::task::spawn_blocking(move || {
                server.recv().map(|mut request| {
                    let body = read_body(&mut request, max_body_bytes);
                    (request, body)
                })
            })
            .await
            .context("webhook accept task panicked")?;

            let (request, body) = match accepted {
                Ok(accepted) => accepted,
                Err(_) if self.stopping.load(Ordering::SeqCst) => break,
                Err(e) => return Err(e).context("failed to accept webhook request"),
            };

            let method = request.method().clone();
            let url = request.url().to_string();
            let status = self.dispatch(&method, &url, body).await;
            tokio::task::spawn_blocking(move || {
                let response = tiny_http::Response::empty(status);
                if let Err(error) = request.respond(response) {
                    tracing::warn!(%error, "failed to send webhook response");
                }
            })
            .await
            .context("webhook respond task panicked")?;
        }

        tracing::info!("webhook server stopped");
        Ok(())
    }

    async fn dispatch(&self, method: &tiny_http::Method, url: &str, body: Body) -> u16 {
        match route(method, url, &self.path) {
            Route::NotFound => {
                tracing::debug!(%method, url, "no route");
                return 404;
            }
            Route::MethodNotAllowed => {
                tracing::debug!(%method, url, "method not allowed");
                return 405;
            }
            Route::Webhook => {}
        }

        let body = match body {
            Body::Complete(body) => body,
            Body::TooLarge => {
                tracing::warn!(max_bytes = self.max_body_bytes, "webhook body too large");
                return 413;
            }
            Body::Unreadable(e) => return self.failed(&BridgeError::Body(e.to_string())),
        };

        let result = match FormParams::parse(&body) {
            Ok(params) => self.bridge.handle_webhook(&params).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(outcome) => {
                tracing::debug!(?outcome, "webhook handled");
                200
            }
            Err(e) => self.failed(&e),
        }
    }

    fn failed(&self, error: &BridgeError) -> u16 {
        let status = error.status_code();
        if status >= 500 {
            tracing::error!(status, error = %error, path = %self.path, "webhook failed");
        } else {
            tracing::warn!(status, error = %error, path = %self.path, "webhook rejected");
        }
        status
    }
}
