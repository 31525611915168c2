use crate::domain::error::PokedexError;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::client::PokedexClient;
use crate::infrastructure::network::http::{create_client, HttpFetcher};
use reqwest::Client;
use std::sync::Arc;

/// Everything the presentation loop and its background units share.
///
/// Built once at startup; clones are cheap handles to the same caches.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<PokedexClient>,
    pub config: Arc<Config>,
    pub http_client: Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, PokedexError> {
        let http_client = create_client(&config)?;
        let fetcher = HttpFetcher::new(http_client.clone());
        let client = PokedexClient::new(Arc::new(fetcher), &config);

        Ok(Self {
            client: Arc::new(client),
            config: Arc::new(config),
            http_client,
        })
    }

    /// State over an arbitrary client, used with fake transports.
    pub fn with_client(client: PokedexClient, config: Config) -> Result<Self, PokedexError> {
        Ok(Self {
            http_client: create_client(&config)?,
            client: Arc::new(client),
            config: Arc::new(config),
        })
    }
}
