//! PokeAPI Client
//!
//! Cache-through HTTP GET and JSON decode for the resources the explorer
//! uses. Response bodies are cached under their fully-qualified request URL.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{PokedexError, Result};
use crate::models::{LocationArea, NamedApiResourceList, Pokemon};

const LOCATION_AREA_ENDPOINT: &str = "location-area";
const POKEMON_ENDPOINT: &str = "pokemon";

/// HTTP client for the PokeAPI, backed by the response cache.
#[derive(Debug)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: Url,
    page_size: u32,
    cache: Cache,
}

impl PokeApiClient {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Errors
    /// Fails if `base_url` does not parse or cannot carry path segments, or
    /// if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration, page_size: u32, cache: Cache) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(PokedexError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            page_size,
            cache,
        })
    }

    /// Creates a client from configuration.
    pub fn from_config(config: &Config, cache: Cache) -> Result<Self> {
        Self::new(
            &config.api_base_url,
            config.http_timeout(),
            config.page_size,
            cache,
        )
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Consumes the client, handing back its cache for shutdown.
    pub fn into_cache(self) -> Cache {
        self.cache
    }

    // == URLs ==
    /// URL of the first page of location areas.
    pub fn first_page_url(&self) -> Url {
        let mut url = self.endpoint_url(&[LOCATION_AREA_ENDPOINT, ""]);
        url.query_pairs_mut()
            .append_pair("offset", "0")
            .append_pair("limit", &self.page_size.to_string());
        url
    }

    pub fn location_area_url(&self, name: &str) -> Url {
        self.endpoint_url(&[LOCATION_AREA_ENDPOINT, name])
    }

    pub fn pokemon_url(&self, name: &str) -> Url {
        self.endpoint_url(&[POKEMON_ENDPOINT, name])
    }

    fn endpoint_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL always accepts path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    // == Resources ==
    /// Fetches one page of location areas.
    pub async fn location_areas(&self, page: &Url) -> Result<NamedApiResourceList> {
        self.fetch(page).await
    }

    /// Fetches a single location area by name.
    pub async fn location_area(&self, name: &str) -> Result<LocationArea> {
        self.fetch(&self.location_area_url(name)).await
    }

    /// Fetches a creature by name.
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        self.fetch(&self.pokemon_url(name)).await
    }

    /// Returns the resource at `url`, from the cache when present.
    ///
    /// On a miss the body is fetched, decoded, and only then cached, so
    /// error statuses and malformed bodies never enter the cache.
    async fn fetch<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        if let Some(body) = self.cache.get(url.as_str()) {
            debug!(url = %url, "Cache hit");
            return Ok(serde_json::from_slice(&body)?);
        }
        debug!(url = %url, "Cache miss");

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PokedexError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        let value = serde_json::from_slice(&body)?;
        self.cache.add(url.as_str(), body.to_vec());

        Ok(value)
    }
}
