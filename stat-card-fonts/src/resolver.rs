//! Glyph coverage extension point for the layout engine.

use std::future::Future;
use std::sync::Arc;

use crate::loader::FontLoader;
use crate::types::FontBundle;

/// Supplies extra fonts when the layout engine cannot shape a text segment.
///
/// The engine calls [`resolve`](Self::resolve) for each glyph coverage gap,
/// embeds whatever records come back, and retries shaping. Several gaps of
/// one render may be resolved concurrently.
pub trait AdditionalAssetResolver: Send + Sync {
    /// Fonts covering `text_segment` in `language_code`.
    ///
    /// `language_code` may join several codes with `|`. An empty bundle means
    /// no extra coverage is available; this never fails.
    fn resolve(
        &self,
        language_code: &str,
        text_segment: &str,
    ) -> impl Future<Output = FontBundle> + Send;
}

/// Resolver that delegates to a shared [`FontLoader`] for one request host.
///
/// Built per incoming card request; the loader (and its cache) outlives it.
#[derive(Debug, Clone)]
pub struct LoaderResolver {
    host: String,
    loader: Arc<FontLoader>,
}

impl LoaderResolver {
    pub fn new(host: impl Into<String>, loader: Arc<FontLoader>) -> Self {
        Self {
            host: host.into(),
            loader,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

impl AdditionalAssetResolver for LoaderResolver {
    async fn resolve(&self, language_code: &str, text_segment: &str) -> FontBundle {
        self.loader
            .load(&self.host, language_code, text_segment)
            .await
    }
}
