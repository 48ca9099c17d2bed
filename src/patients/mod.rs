use crate::api::{ApiClient, Outcome, RequestError};
use crate::http_client::reqwest::ReqwestHttpClient;
use crate::http_client::HttpClient;
use crate::output::{Outputter, ResponseSlot};
use crate::Result;
use anyhow::Context;
use serde::Serialize;
use serde_json::Value;


pub const INSERT_MULTIPLE_ENDPOINT: &str = "/api/insert-multiple";
pub const QUERY_ENDPOINT: &str = "/api/query";

const UNKNOWN_ERROR: &str = "Unknown error occurred";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub patient_name: String,
    /// `YYYY-MM-DD`
    pub birth_date: String,
}

impl Patient {
    pub fn new(patient_name: &str, birth_date: &str) -> Self {
        Patient {
            patient_name: patient_name.to_string(),
            birth_date: birth_date.to_string(),
        }
    }
}

/// The rows inserted by [`PatientApp::insert_patients`].
pub fn sample_patients() -> Vec<Patient> {
    vec![
        Patient::new("Sara Brown", "1901-01-01"),
        Patient::new("John Smith", "1941-01-01"),
        Patient::new("Jack Ma", "1961-01-30"),
        Patient::new("Elon Musk", "1999-01-01"),
    ]
}

#[derive(Serialize)]
struct InsertMultiple<'a> {
    patients: &'a [Patient],
}

#[derive(Serialize)]
struct Statement<'a> {
    sql: &'a str,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Query<'a> {
    Insert(&'a str),
    Select(&'a str),
}

impl<'a> Query<'a> {
    /// Trims the query and accepts it only when it starts with `INSERT` or
    /// `SELECT`. The prefix check is case sensitive.
    pub fn parse(query: &'a str) -> std::result::Result<Query<'a>, QueryError> {
        let sql = query.trim();
        if sql.starts_with("INSERT") {
            Ok(Query::Insert(sql))
        } else if sql.starts_with("SELECT") {
            Ok(Query::Select(sql))
        } else {
            Err(QueryError::Unsupported)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Only INSERT or SELECT queries are allowed.")]
    Unsupported,
    #[error(transparent)]
    Request(#[from] RequestError),
}

impl QueryError {
    pub fn message(&self) -> String {
        format!("Error: {}", self)
    }
}

pub type QueryOutcome = std::result::Result<Value, QueryError>;

/// The two actions of the patient page: inserting the sample patients and
/// running a query. Each renders its result into its own slot.
///
/// Only failing to write to the outputter is returned as an error; request
/// failures are rendered and handed back as the outcome.
pub struct PatientApp<'a, C = ReqwestHttpClient> {
    api: ApiClient<C>,
    outputter: &'a mut dyn Outputter,
}

impl<'a, C: HttpClient> PatientApp<'a, C> {
    pub fn new(api: ApiClient<C>, outputter: &'a mut dyn Outputter) -> PatientApp<'a, C> {
        PatientApp { api, outputter }
    }

    pub async fn insert_patients(&mut self) -> Result<Outcome> {
        let patients = sample_patients();
        let outcome = self
            .api
            .post(
                INSERT_MULTIPLE_ENDPOINT,
                &InsertMultiple {
                    patients: &patients,
                },
            )
            .await;

        let message = match &outcome {
            Ok(body) => body
                .get("message")
                .and_then(present_message)
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            Err(e) => e.message(),
        };
        self.display(ResponseSlot::Insert, &message)?;

        Ok(outcome)
    }

    pub async fn submit_query(&mut self, query: &str) -> Result<QueryOutcome> {
        let outcome = match Query::parse(query) {
            Ok(Query::Insert(sql)) => self
                .api
                .post(QUERY_ENDPOINT, &Statement { sql })
                .await
                .map_err(QueryError::from),
            Ok(Query::Select(sql)) => {
                let endpoint = format!("{}?sql={}", QUERY_ENDPOINT, urlencoding::encode(sql));
                self.api.get(&endpoint).await.map_err(QueryError::from)
            }
            Err(e) => Err(e),
        };

        let message = match &outcome {
            Ok(body) => format!("Response: {}", body),
            Err(e) => e.message(),
        };
        self.display(ResponseSlot::Query, &message)?;

        Ok(outcome)
    }

    fn display(&mut self, slot: ResponseSlot, message: &str) -> Result<()> {
        self.outputter
            .display(slot, message)
            .with_context(|| format!("Failed displaying {}", slot))
    }
}

/// `null`, `false`, `0` and `""` count as no message.
fn present_message(message: &Value) -> Option<String> {
    match message {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
