// HTTP transport for PokéAPI and sprite/cry assets
use crate::domain::error::PokedexError;
use crate::domain::traits::Fetcher;
use crate::infrastructure::config::Config;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use tracing::debug;

pub const ACCEPT_HEADER: &str = "application/json, image/png, image/*;q=0.9, */*;q=0.8";

/// Create the shared HTTP client with the fixed agent, accept header and timeout
pub fn create_client(config: &Config) -> Result<Client, PokedexError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));

    Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(std::time::Duration::from_secs(30))
        .timeout(config.timeout())
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .build()
        .map_err(|e| PokedexError::Config(format!("Failed to build HTTP client: {}", e)))
}

/// Single-shot GET fetcher. No retries: the first failure is returned.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config) -> Result<Self, PokedexError> {
        Ok(Self::new(create_client(config)?))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, PokedexError> {
        debug!(url, "GET");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PokedexError::RemoteStatus {
                code: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?)
    }
}
