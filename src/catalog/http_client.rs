use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::app::{MovieTrackError, Result};
use crate::catalog::CatalogClient;
use crate::config::CatalogConfig;
use crate::domain::MovieRecord;
use crate::normalizer::CatalogNormalizer;

pub struct HttpCatalogClient {
    client: Client,
    search_url: Url,
    country: String,
    media: String,
    normalizer: CatalogNormalizer,
}

impl HttpCatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("movietrack/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            search_url: Self::search_endpoint(&config.base_url)?,
            country: config.country.clone(),
            media: config.media.clone(),
            normalizer: CatalogNormalizer::new(),
        })
    }

    fn search_endpoint(base_url: &str) -> Result<Url> {
        let mut base = Url::parse(base_url)?;
        // Url::join replaces the last path segment unless the base ends in '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base.join("search")?)
    }

    /// Full request URL for a search term.
    pub fn search_url(&self, term: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("country", &self.country)
            .append_pair("media", &self.media)
            .append_pair("term", term);
        url
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn search(&self, term: &str) -> Result<Vec<MovieRecord>> {
        let url = self.search_url(term);
        tracing::debug!("Searching catalog: {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MovieTrackError::CatalogStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        let movies = self.normalizer.normalize(&body)?;
        tracing::info!("Catalog returned {} movies for {:?}", movies.len(), term);

        Ok(movies)
    }
}
