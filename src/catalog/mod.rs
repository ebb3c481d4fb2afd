pub mod http_client;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::MovieRecord;

pub use http_client::HttpCatalogClient;

/// Keyword search against the remote movie catalog.
///
/// Any failure (transport, non-success status, undecodable body) is an
/// `Err`; callers decide how to degrade.
#[async_trait]
pub trait CatalogClient {
    async fn search(&self, term: &str) -> Result<Vec<MovieRecord>>;
}
