use crate::domain::error::PokedexError;
use async_trait::async_trait;
use bytes::Bytes;

/// Transport for raw GET requests
///
/// The HTTP implementation lives in `infrastructure::network::http`;
/// tests swap in fakes that count calls.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the body at `url`, failing on non-2xx status or transport errors.
    async fn fetch(&self, url: &str) -> Result<Bytes, PokedexError>;
}
