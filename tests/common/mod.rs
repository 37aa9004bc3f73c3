//! Shared utilities for integration and load testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use test_backend::agent::{AgentClient, AgentError, AgentResult};
use test_backend::config::ServiceConfig;
use test_backend::lifecycle::{Application, StartupError};
use test_backend::{Shutdown, UserStore};

/// A running service bound to an ephemeral port.
pub struct TestApp {
    pub addr: SocketAddr,
    pub store: UserStore,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), StartupError>>,
}

impl TestApp {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Config tuned for tests: loopback, fast heartbeats, short drain.
pub fn test_config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.host = "127.0.0.1".to_string();
    config.agent.heartbeat_interval_secs = 1;
    config.shutdown.drain_timeout_secs = 2;
    config
}

/// Start the service with a seeded store and the given agent.
pub async fn spawn_app(config: ServiceConfig, agent: Option<Arc<dyn AgentClient>>) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Application::new(config, UserStore::seeded(), agent);
    let store = app.store();
    let shutdown = app.shutdown_handle();
    let handle = tokio::spawn(app.run(listener));

    TestApp {
        addr,
        store,
        shutdown,
        handle,
    }
}

/// Agent double that records every call in order.
#[derive(Default)]
pub struct RecordingAgent {
    pub events: Mutex<Vec<&'static str>>,
    pub heartbeats: AtomicUsize,
}

impl RecordingAgent {
    pub fn events(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }

    pub fn heartbeat_count(&self) -> usize {
        self.heartbeats.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AgentClient for RecordingAgent {
    async fn register(&self) -> AgentResult<()> {
        self.events.lock().unwrap().push("register");
        Ok(())
    }

    async fn heartbeat(&self) -> AgentResult<()> {
        self.heartbeats.fetch_add(1, Ordering::SeqCst);
        self.events.lock().unwrap().push("heartbeat");
        Ok(())
    }

    async fn deregister(&self) -> AgentResult<()> {
        self.events.lock().unwrap().push("deregister");
        Ok(())
    }
}

/// Agent double whose every call fails.
#[derive(Default)]
pub struct UnreachableAgent {
    pub calls: AtomicUsize,
}

#[async_trait]
impl AgentClient for UnreachableAgent {
    async fn register(&self) -> AgentResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AgentError::Rejected {
            status: 503,
            body: "agent unavailable".to_string(),
        })
    }

    async fn heartbeat(&self) -> AgentResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AgentError::Config("not registered".to_string()))
    }

    async fn deregister(&self) -> AgentResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AgentError::Config("not registered".to_string()))
    }
}
