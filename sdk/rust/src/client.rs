use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserList {
    pub users: Vec<User>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub timestamp: u64,
    pub service: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    pub service: String,
    pub version: String,
    pub timestamp: u64,
    pub uptime: String,
    pub uptime_seconds: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a JSON error body.
    #[error("service returned {status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
        }
    }
}

pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn health(&self) -> Result<Health, ClientError> {
        self.get("/healthz").await
    }

    pub async fn info(&self) -> Result<Info, ClientError> {
        self.get("/info").await
    }

    pub async fn list_users(&self) -> Result<UserList, ClientError> {
        self.get("/users").await
    }

    pub async fn get_user(&self, id: u64) -> Result<User, ClientError> {
        self.get(&format!("/users/{}", id)).await
    }

    /// Create a user; the service assigns the id.
    pub async fn create_user(&self, name: &str, role: &str) -> Result<User, ClientError> {
        let resp = self
            .client
            .post(format!("{}/users", self.base_url))
            .json(&NewUser {
                name: name.to_string(),
                role: role.to_string(),
            })
            .send()
            .await?;
        decode(resp).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }

    let text = resp.text().await?;
    let message = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.error,
        Err(_) => text,
    };
    Err(ClientError::Api { status, message })
}
