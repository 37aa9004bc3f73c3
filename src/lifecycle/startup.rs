//! Startup orchestration.
//!
//! # Responsibilities
//! - Wire configuration, user store, and agent client together
//! - Bind the listener before announcing the instance
//! - Run registration and heartbeat around the HTTP server
//! - Tear down background work once the server has drained

use std::io;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::agent::{auto_register, start_heartbeat, AgentClient, AgentError, HttpAgentClient};
use crate::config::{ConfigError, ServiceConfig};
use crate::http::{AppState, HttpServer};
use crate::lifecycle::{spawn_signal_listener, Shutdown};
use crate::users::UserStore;

/// Errors that stop the service.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("agent client error: {0}")]
    Agent(#[from] AgentError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

/// Routes announced at startup.
const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("GET", "/healthz", "Health check"),
    ("GET", "/users", "List all users"),
    ("GET", "/users/{id}", "Get user by ID"),
    ("POST", "/users", "Create new user"),
    ("GET", "/info", "Service information"),
];

/// The assembled service.
pub struct Application {
    config: ServiceConfig,
    store: UserStore,
    agent: Option<Arc<dyn AgentClient>>,
    shutdown: Shutdown,
}

impl Application {
    /// Assemble the service from explicit parts.
    pub fn new(
        config: ServiceConfig,
        store: UserStore,
        agent: Option<Arc<dyn AgentClient>>,
    ) -> Self {
        Self {
            config,
            store,
            agent,
            shutdown: Shutdown::new(),
        }
    }

    /// Assemble the production service: seeded store and, when enabled, an
    /// HTTP agent client.
    pub fn from_config(config: ServiceConfig) -> Result<Self, StartupError> {
        let agent: Option<Arc<dyn AgentClient>> = if config.agent.enabled {
            let client =
                HttpAgentClient::new(&config.agent, &config.service.name, config.listener.port)?;
            tracing::info!(
                agent_url = %config.agent.url,
                instance_id = %client.registration().instance_id,
                "Agent client initialized"
            );
            Some(Arc::new(client))
        } else {
            None
        };

        Ok(Self::new(config, UserStore::seeded(), agent))
    }

    /// A handle to the records the server will serve.
    pub fn store(&self) -> UserStore {
        self.store.clone()
    }

    /// A handle that stops the service when triggered.
    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// Bind the configured listener address.
    pub async fn bind(&self) -> Result<TcpListener, StartupError> {
        let address = self.config.listener.bind_address();
        TcpListener::bind(&address)
            .await
            .map_err(|source| StartupError::Bind { address, source })
    }

    /// Bind, install signal handlers, and run until a termination signal.
    pub async fn serve(self) -> Result<(), StartupError> {
        let listener = self.bind().await?;
        spawn_signal_listener(self.shutdown_handle());
        self.run(listener).await
    }

    /// Run on an already bound listener until the shutdown handle fires.
    pub async fn run(self, listener: TcpListener) -> Result<(), StartupError> {
        let Self {
            config,
            store,
            agent,
            shutdown,
        } = self;

        let registered = match &agent {
            Some(agent) => auto_register(agent.as_ref()).await,
            None => {
                tracing::info!("Agent registration disabled");
                false
            }
        };

        let heartbeat = match (&agent, registered) {
            (Some(agent), true) => {
                let interval = Duration::from_secs(config.agent.heartbeat_interval_secs);
                match start_heartbeat(Arc::clone(agent), interval, &shutdown) {
                    Ok(handle) => Some(handle),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to start heartbeat");
                        None
                    }
                }
            }
            _ => None,
        };

        let local_addr = listener.local_addr().map_err(StartupError::Serve)?;
        tracing::info!(
            address = %local_addr,
            service = %config.service.name,
            "Test backend running"
        );
        for (method, path, description) in ENDPOINTS {
            tracing::info!("  {method:<4} {path:<12} - {description}");
        }

        let state = AppState::new(config.service.name.clone(), store);
        let server = HttpServer::new(config, state);
        let result = server.run(listener, shutdown.clone()).await;

        // Stops the heartbeat even when the server exited on its own.
        shutdown.trigger();
        if let Some(handle) = heartbeat {
            let _ = handle.await;
        }

        if let (Some(agent), true) = (&agent, registered) {
            match agent.deregister().await {
                Ok(()) => tracing::info!("Deregistered from agent"),
                Err(e) => tracing::warn!(error = %e, "Failed to deregister from agent"),
            }
        }

        result.map_err(StartupError::Serve)?;
        tracing::info!("Server stopped");
        Ok(())
    }
}
