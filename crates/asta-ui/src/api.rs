use asta_shared::{
    CommandRequest, CommandResponse, DEFAULT_BASE_URL, DEFAULT_USER_ID, Endpoint, LogEntry, Method,
    Task,
};
use gloo::net::http::{Request, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Every way a backend call can fail. Controller operations turn these
/// into visible text and never propagate them further.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Non-success HTTP status; `body` is the raw response text.
    #[error("{body}")]
    Status { status: u16, body: String },
    #[error("backend unreachable: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_id")]
    pub user_id: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_id: default_user_id(),
        }
    }
}

impl BackendConfig {
    pub fn normalized(mut self) -> Self {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        self.base_url = if trimmed.is_empty() {
            default_base_url()
        } else {
            trimmed.to_string()
        };
        self
    }
}

fn default_base_url() -> String {
    option_env!("ASTA_BASE_URL")
        .unwrap_or(DEFAULT_BASE_URL)
        .trim_end_matches('/')
        .to_string()
}

fn default_user_id() -> u64 {
    DEFAULT_USER_ID
}

/// Outcome of a synthesized delete command. The views are refreshed from
/// `response`; `accepted` only reflects the HTTP status. Rejected deletes
/// without a task list never become an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub accepted: bool,
    pub response: CommandResponse,
}

#[allow(async_fn_in_trait)]
pub trait TaskBackend {
    async fn submit_command(&self, text: &str) -> Result<CommandResponse, ApiError>;
    async fn delete_task(&self, task_id: i64) -> Result<DeleteOutcome, ApiError>;
    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError>;
    async fn last_log(&self) -> Result<Option<LogEntry>, ApiError>;
    async fn complete_task(&self, task_id: i64) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackendClient {
    config: BackendConfig,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }

    async fn send(
        &self,
        endpoint: Endpoint,
        body: Option<&CommandRequest>,
    ) -> Result<Response, ApiError> {
        let url = endpoint.url(&self.config.base_url);
        tracing::debug!(method = %endpoint.method(), %url, "sending backend request");

        let sent = match (endpoint.method(), body) {
            (Method::Post, Some(body)) => {
                let request = Request::post(&url)
                    .json(body)
                    .map_err(|e| ApiError::Decode(format!("request not encoded: {e}")))?;
                request.send().await
            }
            (Method::Post, None) => Request::post(&url).send().await,
            (Method::Put, _) => Request::put(&url).send().await,
            (Method::Get, _) => Request::get(&url).send().await,
        };

        match sent {
            Ok(response) => {
                tracing::debug!(%url, status = response.status(), "backend responded");
                Ok(response)
            }
            Err(error) => {
                tracing::warn!(%url, %error, "backend request failed");
                Err(ApiError::Network(error.to_string()))
            }
        }
    }
}

async fn expect_ok(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status { status, body })
}

/// The backend answered but its body could not be read.
fn body_unreadable(error: impl std::fmt::Display) -> ApiError {
    ApiError::Decode(format!("response body unreadable: {error}"))
}

/// Error bodies only refresh the views when they carry a task list;
/// FastAPI `{"detail": ...}` bodies leave them untouched.
#[derive(Deserialize)]
struct RejectedCommandBody {
    tasks: Vec<Task>,
    #[serde(default)]
    log: Option<LogEntry>,
}

fn decode_delete_body(accepted: bool, status: u16, body: String) -> Result<DeleteOutcome, ApiError> {
    if accepted {
        return serde_json::from_str::<CommandResponse>(&body)
            .map(|response| DeleteOutcome { accepted, response })
            .map_err(|e| ApiError::Decode(e.to_string()));
    }

    match serde_json::from_str::<RejectedCommandBody>(&body) {
        Ok(RejectedCommandBody { tasks, log }) => Ok(DeleteOutcome {
            accepted,
            response: CommandResponse { tasks, log },
        }),
        Err(_) => Err(ApiError::Status { status, body }),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

impl TaskBackend for BackendClient {
    async fn submit_command(&self, text: &str) -> Result<CommandResponse, ApiError> {
        let request = CommandRequest::new(self.config.user_id, text);
        let response = self.send(Endpoint::SubmitCommand, Some(&request)).await?;
        decode(expect_ok(response).await?).await
    }

    async fn delete_task(&self, task_id: i64) -> Result<DeleteOutcome, ApiError> {
        let request = CommandRequest::delete_task(self.config.user_id, task_id);
        let response = self.send(Endpoint::SubmitCommand, Some(&request)).await?;

        let accepted = response.ok();
        let status = response.status();
        let body = response.text().await.map_err(body_unreadable)?;

        decode_delete_body(accepted, status, body)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let endpoint = Endpoint::ListTasks {
            user_id: self.config.user_id,
        };
        let response = self.send(endpoint, None).await?;
        decode(expect_ok(response).await?).await
    }

    async fn last_log(&self) -> Result<Option<LogEntry>, ApiError> {
        let endpoint = Endpoint::last_log(self.config.user_id);
        let response = self.send(endpoint, None).await?;
        let logs: Vec<LogEntry> = decode(expect_ok(response).await?).await?;
        Ok(logs.into_iter().next())
    }

    async fn complete_task(&self, task_id: i64) -> Result<(), ApiError> {
        let response = self
            .send(Endpoint::CompleteTask { task_id }, None)
            .await?;
        let response = expect_ok(response).await?;

        // The views are reloaded afterwards; the body is only logged.
        match response.json::<Task>().await {
            Ok(task) => tracing::debug!(
                task_id = task.id,
                status = task.status.as_key(),
                "task completion acknowledged"
            ),
            Err(error) => tracing::debug!(%error, "completion body not decoded"),
        }
        Ok(())
    }
}
