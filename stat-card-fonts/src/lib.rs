//! Font bundle decoding and on-demand font loading for stat-card rendering.
//!
//! This crate provides:
//! - A static language-to-font-family map
//! - A decoder (and writer) for the length-prefixed binary font bundle format
//! - An async loader that fetches bundles from a font-serving endpoint and
//!   memoizes them per language/text combination
//! - The [`AdditionalAssetResolver`] seam the layout engine calls when it hits
//!   a glyph coverage gap
//!
//! # Architecture
//!
//! The render engine depends only on [`AdditionalAssetResolver`]. The
//! [`LoaderResolver`] implementation closes over a request host and a shared
//! [`FontLoader`], which in turn owns:
//! 1. The [`LanguageFontMap`] used to turn language codes into family names
//! 2. A [`FontEndpoint`] that performs the HTTP request
//! 3. A [`FontCache`] holding one result slot per cache key

pub mod bundle;
pub mod language_map;
pub mod loader;
pub mod resolver;
pub mod types;

// Re-export main types for convenience
pub use bundle::{BundleError, BundleWriter, decode};
pub use language_map::{BUILTIN_LANGUAGE_FONTS, LANGUAGE_CODE_DELIMITER, LanguageFontMap};
pub use loader::http::{FetchError, FetchResponse, FontEndpoint, HttpFontEndpoint};
pub use loader::{FontCache, FontLoader, LoadError};
pub use resolver::{AdditionalAssetResolver, LoaderResolver};
pub use types::{FontBundle, FontRecord, FontStyle, NORMAL_WEIGHT, UNKNOWN_LANGUAGE};
