//! # patient-api
//!
//! patient-api is a small client for a patient database HTTP service. It
//! wraps every request in a single outcome shape so that callers never have to
//! deal with transport errors, bad status codes, broken bodies and
//! application errors separately.
//!
//! ```no_run
//! use patient_api::{ApiClient, ClientConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let api = ApiClient::new("http://localhost:3000", ClientConfig::default())?;
//! match api.get("/api/query?sql=SELECT%20*%20FROM%20patients").await {
//!     Ok(rows) => println!("{}", rows),
//!     Err(e) => println!("{}", e.message()),
//! }
//! # Ok(())
//! # }
//! ```

use anyhow::{anyhow, Context};
use std::time::Duration;

pub mod api;
pub mod http_client;
pub mod output;
pub mod patients;

pub use crate::api::{ApiClient, Outcome, RequestError};
pub use crate::patients::PatientApp;


pub type Result<T> = anyhow::Result<T>;

pub type Request = http::Request<Option<String>>;

pub type Response = http::Response<Option<String>>;

pub struct ClientConfig {
    pub ssl_check: bool,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            ssl_check: true,
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new(ssl_check: bool, timeout: Option<Duration>) -> Self {
        Self { ssl_check, timeout }
    }
}

/// Parses a request timeout given in seconds, such as `"2.5"`.
pub fn parse_timeout(seconds: &str) -> Result<Duration> {
    let seconds: f64 = seconds
        .trim()
        .parse()
        .with_context(|| format!("Timeout is not a number: {}", seconds))?;
    if seconds <= 0.0 {
        return Err(anyhow!("Timeout must be more than zero seconds"));
    }
    Duration::try_from_secs_f64(seconds).context("Timeout is out of range")
}
