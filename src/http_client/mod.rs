use crate::{ClientConfig, Request, Response, Result};
use async_trait::async_trait;


pub mod reqwest;

/// Executes a single request against the network.
///
/// Implementations only report failures to complete the exchange. A response
/// with any status code is a successful execution.
#[async_trait]
pub trait HttpClient: Send + Sync {
    fn create(config: ClientConfig) -> Result<Self>
    where
        Self: Sized;

    async fn execute(&self, request: Request) -> Result<Response>;
}
