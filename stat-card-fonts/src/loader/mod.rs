//! On-demand font loading for glyph coverage gaps.
//!
//! [`FontLoader::load`] resolves a `|`-delimited set of language codes to font
//! families, fetches a bundle for the exact text segment from the font
//! endpoint, decodes it, and memoizes the outcome. Every failure degrades to
//! an empty bundle so a card always renders, with fallback glyphs at worst.
//! Failures are cached like successes and never retried.

mod cache;
pub mod http;

use std::sync::Arc;

use crate::bundle::{self, BundleError};
use crate::language_map::LanguageFontMap;
use crate::types::FontBundle;

pub use cache::FontCache;
use http::{FetchError, FetchResponse, FontEndpoint, font_request_url};

/// Why a fetch produced no fonts.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The endpoint answered with a non-success status.
    #[error("font endpoint has no coverage for {url} (status {status})")]
    NoCoverage { url: String, status: u16 },

    /// The request never produced a response.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The response body is not a valid bundle.
    #[error("malformed font bundle: {0}")]
    Malformed(#[from] BundleError),

    /// The blocking fetch task panicked or was cancelled.
    #[error("font fetch task failed: {0}")]
    TaskFailed(String),
}

/// Fetches, decodes, and memoizes font bundles.
pub struct FontLoader {
    map: LanguageFontMap,
    endpoint: Arc<dyn FontEndpoint>,
    cache: Arc<FontCache>,
}

impl std::fmt::Debug for FontLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontLoader")
            .field("languages", &self.map.len())
            .field("cached", &self.cache.len())
            .finish()
    }
}

impl FontLoader {
    /// Create a loader.
    ///
    /// The cache is passed in so its owner controls its lifetime; share one
    /// cache per process to avoid refetching across renders.
    pub fn new(
        map: LanguageFontMap,
        endpoint: Arc<dyn FontEndpoint>,
        cache: Arc<FontCache>,
    ) -> Self {
        Self {
            map,
            endpoint,
            cache,
        }
    }

    pub fn language_map(&self) -> &LanguageFontMap {
        &self.map
    }

    pub fn cache(&self) -> &Arc<FontCache> {
        &self.cache
    }

    /// Load fonts covering `text_segment` for `language_codes` from `host`.
    ///
    /// Never fails: no coverage, transport failures, and malformed bundles all
    /// yield an empty bundle (logged). Concurrent calls with the same arguments
    /// share a single fetch.
    pub async fn load(&self, host: &str, language_codes: &str, text_segment: &str) -> FontBundle {
        let key = FontCache::key(host, language_codes, text_segment);
        let slot = self.cache.slot(&key);

        if let Some(bundle) = slot.get() {
            log::debug!("Font bundle cache hit: {}", key);
            return bundle.clone();
        }

        slot.get_or_init(|| async {
            log::debug!("Font bundle cache miss: {}", key);
            match self.try_load(host, language_codes, text_segment).await {
                Ok(bundle) => bundle,
                Err(e @ LoadError::NoCoverage { .. }) => {
                    log::debug!("{}", e);
                    FontBundle::empty()
                }
                Err(e @ LoadError::Malformed(_)) => {
                    log::warn!(
                        "Discarding font bundle for '{}' ({}): {}",
                        text_segment,
                        language_codes,
                        e
                    );
                    FontBundle::empty()
                }
                Err(e) => {
                    log::warn!(
                        "Font fetch failed for '{}' ({}), falling back to default glyphs: {}",
                        text_segment,
                        language_codes,
                        e
                    );
                    FontBundle::empty()
                }
            }
        })
        .await
        .clone()
    }

    /// Fetch and decode without touching the cache.
    ///
    /// Unlike [`FontLoader::load`], this keeps "no coverage", transport failure,
    /// and malformed data apart. Codes with no known families return an empty
    /// bundle without a request.
    pub async fn try_load(
        &self,
        host: &str,
        language_codes: &str,
        text_segment: &str,
    ) -> Result<FontBundle, LoadError> {
        let families = self.map.families_for_codes(language_codes);
        if families.is_empty() {
            log::debug!("No font families for '{}'", language_codes);
            return Ok(FontBundle::empty());
        }

        let url = font_request_url(host, &families, text_segment)?;
        let endpoint = Arc::clone(&self.endpoint);
        let request_url = url.clone();
        let response = tokio::task::spawn_blocking(move || endpoint.fetch(&request_url))
            .await
            .map_err(|e| LoadError::TaskFailed(e.to_string()))??;

        match response {
            FetchResponse::Bundle(body) => {
                let bundle = bundle::decode(&body, text_segment)?;
                log::info!(
                    "Loaded {} font(s), {} bytes, for '{}' ({})",
                    bundle.len(),
                    bundle.data_len(),
                    text_segment,
                    language_codes
                );
                Ok(bundle)
            }
            FetchResponse::Status(status) => Err(LoadError::NoCoverage {
                url: url.to_string(),
                status,
            }),
        }
    }
}
