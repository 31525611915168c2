use crate::application::normalize::{
    build_detail, build_roster, EntityResource, RegionalListing, SpeciesResource,
};
use crate::domain::error::PokedexError;
use crate::domain::model::{ImageBytes, RecordDetail, RosterEntry};
use crate::domain::traits::Fetcher;
use crate::infrastructure::config::Config;
use crate::infrastructure::storage::cache::{CacheStats, MemoryCache};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Memoizing PokéAPI client
///
/// Owns every cache for the process; construct it once at startup and share
/// it by `Arc`. Lookups for the same uncached key may race and both hit the
/// network; the later write wins.
pub struct PokedexClient {
    fetcher: Arc<dyn Fetcher>,
    base_url: String,
    json_cache: MemoryCache<String, Arc<Value>>,
    roster: OnceCell<Arc<Vec<RosterEntry>>>,
    detail_cache: MemoryCache<u32, Arc<RecordDetail>>,
    image_cache: MemoryCache<String, ImageBytes>,
}

/// Occupancy of the client's caches.
#[derive(Debug, Clone, Copy)]
pub struct ClientCacheStats {
    pub json: CacheStats,
    pub details: CacheStats,
    pub images: CacheStats,
    pub roster_loaded: bool,
}

impl PokedexClient {
    pub fn new(fetcher: Arc<dyn Fetcher>, config: &Config) -> Self {
        Self {
            fetcher,
            base_url: config.api_base().to_string(),
            json_cache: MemoryCache::new(config.cache.json_capacity),
            roster: OnceCell::new(),
            detail_cache: MemoryCache::new(config.cache.detail_capacity),
            image_cache: MemoryCache::new(config.cache.image_capacity),
        }
    }

    pub fn listing_url(&self) -> String {
        format!("{}/pokedex/kanto/", self.base_url)
    }

    pub fn entity_url(&self, id: u32) -> String {
        format!("{}/pokemon/{}/", self.base_url, id)
    }

    pub fn species_url(&self, id: u32) -> String {
        format!("{}/pokemon-species/{}/", self.base_url, id)
    }

    /// Fetch and decode `url`, memoized by the exact URL string.
    /// Failures are never cached.
    pub async fn get_json(&self, url: &str) -> Result<Arc<Value>, PokedexError> {
        let key = url.to_string();
        if let Some(cached) = self.json_cache.get(&key) {
            debug!(url, "json cache hit");
            return Ok(cached);
        }

        let raw = self.fetcher.fetch(url).await?;
        let value: Value = serde_json::from_slice(&raw).map_err(|_| PokedexError::Decode {
            url: url.to_string(),
        })?;

        let value = Arc::new(value);
        self.json_cache.insert(key, value.clone());
        Ok(value)
    }

    async fn get_typed<T: DeserializeOwned>(&self, url: &str) -> Result<T, PokedexError> {
        let value = self.get_json(url).await?;
        let typed: T = Deserialize::deserialize(&*value).map_err(|_| PokedexError::Decode {
            url: url.to_string(),
        })?;
        Ok(typed)
    }

    /// The ordered roster of entries 1..=151, built at most once per client.
    pub async fn get_roster(&self) -> Result<Arc<Vec<RosterEntry>>, PokedexError> {
        let roster = self
            .roster
            .get_or_try_init(|| async move {
                let listing: RegionalListing = self.get_typed(&self.listing_url()).await?;
                let roster = build_roster(listing);
                info!(count = roster.len(), "roster loaded");
                Ok::<_, PokedexError>(Arc::new(roster))
            })
            .await?;
        Ok(roster.clone())
    }

    /// Resolve the normalized detail record for `id`, memoized per id.
    /// Ids are not range-checked here.
    pub async fn get_detail(&self, id: u32) -> Result<Arc<RecordDetail>, PokedexError> {
        if let Some(cached) = self.detail_cache.get(&id) {
            debug!(id, "detail cache hit");
            return Ok(cached);
        }

        let entity: EntityResource = self.get_typed(&self.entity_url(id)).await?;
        let species: SpeciesResource = self.get_typed(&self.species_url(id)).await?;

        let detail = Arc::new(build_detail(id, entity, species));
        info!(id, name = %detail.name, "detail resolved");
        self.detail_cache.insert(id, detail.clone());
        Ok(detail)
    }

    /// Raw sprite bytes for `url`, memoized per URL. An empty URL fails
    /// without touching the network.
    pub async fn get_image_bytes(&self, url: &str) -> Result<ImageBytes, PokedexError> {
        if url.is_empty() {
            return Err(PokedexError::MissingUrl);
        }

        let key = url.to_string();
        if let Some(cached) = self.image_cache.get(&key) {
            debug!(url, "image cache hit");
            return Ok(cached);
        }

        let bytes = self.fetcher.fetch(url).await?;
        self.image_cache.insert(key, bytes.clone());
        Ok(bytes)
    }

    pub fn cache_stats(&self) -> ClientCacheStats {
        ClientCacheStats {
            json: self.json_cache.stats(),
            details: self.detail_cache.stats(),
            images: self.image_cache.stats(),
            roster_loaded: self.roster.initialized(),
        }
    }
}
