//! Font loader wiring.
//!
//! One [`FontLoader`] (and one [`FontCache`]) is built per process and shared
//! by every card render; each render gets its own [`LoaderResolver`] bound to
//! the host the request came in on.

use std::sync::Arc;

use stat_card_config::Config;
use stat_card_fonts::{
    FontCache, FontEndpoint, FontLoader, HttpFontEndpoint, LanguageFontMap, LoaderResolver,
};

/// Built-in language map with the config's `language_fonts` merged over it.
pub fn language_map(config: &Config) -> LanguageFontMap {
    let mut map = LanguageFontMap::builtin();
    map.extend(config.language_fonts.clone());
    map
}

/// HTTP endpoint honouring the config's timeout, size cap and user agent.
pub fn http_endpoint(config: &Config) -> HttpFontEndpoint {
    HttpFontEndpoint::new(config.fetch_timeout(), config.max_bundle_bytes)
        .with_user_agent(config.user_agent.clone())
}

/// Build the process-wide loader with a fresh cache.
pub fn build_loader(config: &Config) -> Arc<FontLoader> {
    build_loader_with(
        config,
        Arc::new(http_endpoint(config)),
        Arc::new(FontCache::new()),
    )
}

/// Build a loader around an explicit endpoint and cache.
pub fn build_loader_with(
    config: &Config,
    endpoint: Arc<dyn FontEndpoint>,
    cache: Arc<FontCache>,
) -> Arc<FontLoader> {
    let map = language_map(config);
    log::info!(
        "Font loader ready: {} language entries, host {}",
        map.len(),
        config.font_host
    );
    Arc::new(FontLoader::new(map, endpoint, cache))
}

/// Resolver for one card render served from `host`.
pub fn resolver_for(host: &str, loader: &Arc<FontLoader>) -> LoaderResolver {
    LoaderResolver::new(host, Arc::clone(loader))
}
