use crate::http_client::HttpClient;
use crate::{ClientConfig, Request, Response, Result};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;

pub struct ReqwestHttpClient {
    client: Client,
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    fn create(config: ClientConfig) -> Result<ReqwestHttpClient>
    where
        Self: Sized,
    {
        let mut builder = Client::builder().danger_accept_invalid_certs(!config.ssl_check);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .context("Failed building the HTTP client")?;

        Ok(ReqwestHttpClient { client })
    }

    async fn execute(&self, request: Request) -> Result<Response> {
        let (parts, body) = request.into_parts();
        // `Option<String>` is not `Into<Body>`; convert with an empty body first
        let mut outgoing: reqwest::Request = http::Request::from_parts(parts, "").try_into()?;
        *outgoing.body_mut() = body.map(reqwest::Body::from);

        let incoming = self.client.execute(outgoing).await?;

        let mut builder = http::Response::builder()
            .version(incoming.version())
            .status(incoming.status());
        if let Some(headers) = builder.headers_mut() {
            headers.extend(incoming.headers().clone());
        }

        let text = incoming.text().await?;
        let body = Some(text).filter(|text| !text.is_empty());

        Ok(builder.body(body)?)
    }
}
