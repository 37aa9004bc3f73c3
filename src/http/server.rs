//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, metrics)
//! - Serve on a bound listener until shutdown
//! - Drain in-flight requests within a bounded deadline

use std::future::IntoFuture;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::health::healthz;
use crate::http::info::service_info;
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::http::users::{create_user, get_user, list_users};
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::users::UserStore;

/// Static service metadata.
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: UserStore,
    pub service: Arc<ServiceInfo>,
    pub started_at: Instant,
}

impl AppState {
    /// Create state for `service_name`, starting the uptime clock now.
    pub fn new(service_name: impl Into<String>, store: UserStore) -> Self {
        Self {
            store,
            service: Arc::new(ServiceInfo {
                name: service_name.into(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            }),
            started_at: Instant::now(),
        }
    }
}

/// HTTP server for the user API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and state.
    pub fn new(config: ServiceConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/healthz", get(healthz))
            .route("/users", get(list_users).post(create_user))
            .route("/users/{id}", get(get_user))
            .route("/info", get(service_info))
            .with_state(state)
            .layer(middleware::from_fn(track_metrics))
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                    .layer(propagate_request_id_layer())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// A handle to the fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` is triggered.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let drain_timeout = Duration::from_secs(self.config.shutdown.drain_timeout_secs);
        serve_with_drain(listener, self.router, shutdown, drain_timeout).await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Serve `router` until `shutdown` fires, then give in-flight requests at
/// most `drain_timeout` to finish.
///
/// A drain that runs past the deadline is logged and abandoned; it is not
/// reported as an error.
pub async fn serve_with_drain(
    listener: TcpListener,
    router: Router,
    shutdown: Shutdown,
    drain_timeout: Duration,
) -> Result<(), io::Error> {
    let serve = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown.wait())
        .into_future();
    tokio::pin!(serve);

    tokio::select! {
        result = &mut serve => result,
        _ = shutdown.wait() => {
            tracing::info!(
                timeout_secs = drain_timeout.as_secs_f64(),
                "Draining in-flight requests"
            );
            match tokio::time::timeout(drain_timeout, &mut serve).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(
                        timeout_secs = drain_timeout.as_secs_f64(),
                        "Shutdown drain timed out, abandoning in-flight requests"
                    );
                    Ok(())
                }
            }
        }
    }
}

async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let response = next.run(request).await;
    metrics::record_request(&method, response.status().as_u16(), start);
    response
}
