//! HTTP client for the external agent.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::agent::{AgentClient, AgentError, AgentResult};
use crate::config::AgentConfig;

const REGISTER_PATH: &str = "v1/services/register";
const HEARTBEAT_PATH: &str = "v1/services/heartbeat";
const DEREGISTER_PATH: &str = "v1/services/deregister";

/// Payload sent on registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub instance_id: Uuid,
    pub service: String,
    pub version: String,
    pub port: u16,
    pub health_path: String,
}

/// Payload sent on heartbeat and deregistration.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct InstanceRef {
    instance_id: Uuid,
}

/// Agent client speaking JSON over HTTP.
pub struct HttpAgentClient {
    client: Client,
    base_url: Url,
    registration: Registration,
}

impl HttpAgentClient {
    /// Build a client for the agent described by `config`.
    ///
    /// `service` and `port` describe this instance to the agent.
    pub fn new(config: &AgentConfig, service: &str, port: u16) -> AgentResult<Self> {
        let mut base_url = Url::parse(&config.url)
            .map_err(|e| AgentError::Config(format!("{}: {}", config.url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AgentError::Config(format!(
                "{}: not usable as a base URL",
                config.url
            )));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            registration: Registration {
                instance_id: Uuid::new_v4(),
                service: service.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                port,
                health_path: config.health_path.clone(),
            },
        })
    }

    /// The identity announced on registration.
    pub fn registration(&self) -> &Registration {
        &self.registration
    }

    fn endpoint(&self, path: &str) -> AgentResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AgentError::Config(format!("{}{}: {}", self.base_url, path, e)))
    }

    async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> AgentResult<()> {
        let url = self.endpoint(path)?;
        let response = self.client.post(url).json(body).send().await?;
        check_status(response).await
    }

    fn instance_ref(&self) -> InstanceRef {
        InstanceRef {
            instance_id: self.registration.instance_id,
        }
    }
}

async fn check_status(response: Response) -> AgentResult<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(AgentError::Rejected {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl AgentClient for HttpAgentClient {
    async fn register(&self) -> AgentResult<()> {
        self.post(REGISTER_PATH, &self.registration).await
    }

    async fn heartbeat(&self) -> AgentResult<()> {
        self.post(HEARTBEAT_PATH, &self.instance_ref()).await
    }

    async fn deregister(&self) -> AgentResult<()> {
        self.post(DEREGISTER_PATH, &self.instance_ref()).await
    }
}
