use crate::http_client::reqwest::ReqwestHttpClient;
use crate::http_client::HttpClient;
use crate::{ClientConfig, Result};
use http::{header, Method, StatusCode};
use log::{debug, error};
use serde::Serialize;
use serde_json::{json, Value};


/// The result of every request made through [`ApiClient`].
pub type Outcome = std::result::Result<Value, RequestError>;

/// Everything that can go wrong with a single request, flattened into a
/// description meant to be shown to a user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// The request could not be sent or no response was received.
    #[error("{0}")]
    Transport(String),
    /// The server answered with a non-success status and no `error` field.
    #[error("Server Error: {0}")]
    Status(u16),
    /// The server answered with a non-empty `error` field.
    #[error("{0}")]
    Application(String),
    /// The response body was not valid JSON.
    #[error("{0}")]
    Parse(String),
    /// The request payload could not be encoded as JSON.
    #[error("{0}")]
    Serialize(String),
}

impl RequestError {
    pub fn message(&self) -> String {
        format!("Error: {}", self)
    }

    pub fn to_json(&self) -> Value {
        json!({ "message": self.message() })
    }
}

/// Sends JSON requests to a fixed base address.
///
/// Endpoints are appended to the base address as given, so `"http://host/"`
/// and `"/api"` produce `"http://host//api"`. None of the request methods
/// fail in the `?` sense; every failure comes back as the `Err` arm of an
/// [`Outcome`] and is logged on the way out.
pub struct ApiClient<C = ReqwestHttpClient> {
    base_url: String,
    client: C,
}

impl ApiClient<ReqwestHttpClient> {
    pub fn new(base_url: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let client = ReqwestHttpClient::create(config)?;
        Ok(Self::with_client(base_url, client))
    }
}

impl<C: HttpClient> ApiClient<C> {
    pub fn with_client(base_url: impl Into<String>, client: C) -> Self {
        ApiClient {
            base_url: base_url.into(),
            client,
        }
    }

    #[cfg(test)]
    pub(crate) fn client(&self) -> &C {
        &self.client
    }

    pub async fn post<P>(&self, endpoint: &str, payload: &P) -> Outcome
    where
        P: Serialize + ?Sized,
    {
        let outcome = match serde_json::to_string(payload) {
            Ok(body) => self.send(Method::POST, endpoint, Some(body)).await,
            Err(e) => Err(RequestError::Serialize(e.to_string())),
        };
        log_failure(&Method::POST, outcome)
    }

    pub async fn get(&self, endpoint: &str) -> Outcome {
        let outcome = self.send(Method::GET, endpoint, None).await;
        log_failure(&Method::GET, outcome)
    }

    async fn send(&self, method: Method, endpoint: &str, body: Option<String>) -> Outcome {
        let target = format!("{}{}", self.base_url, endpoint);
        debug!("{} {}", method, target);

        let mut builder = http::Request::builder().method(method).uri(target.as_str());
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let request = builder
            .body(body)
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        interpret(response.status(), response.body().as_deref())
    }
}

/// An `error` field wins over the status code, the status code wins over a
/// body that doesn't parse.
fn interpret(status: StatusCode, body: Option<&str>) -> Outcome {
    let parsed = serde_json::from_str::<Value>(body.unwrap_or_default());

    if let Some(description) = parsed.as_ref().ok().and_then(application_error) {
        return Err(RequestError::Application(description));
    }
    if !status.is_success() {
        return Err(RequestError::Status(status.as_u16()));
    }

    parsed.map_err(|e| RequestError::Parse(e.to_string()))
}

fn application_error(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(error) if error.is_empty() => None,
        Value::String(error) => Some(error.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

fn log_failure(method: &Method, outcome: Outcome) -> Outcome {
    if let Err(e) = &outcome {
        error!("Error in {} request: {}", method, e);
    }
    outcome
}
