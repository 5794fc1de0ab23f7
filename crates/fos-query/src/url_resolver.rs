//! Base URL resolution

use url::Url;

use crate::error::{QueryError, QueryResult};

/// Resolves attribute URLs against an absolute base
#[derive(Debug, Clone)]
pub struct UrlResolver {
    base: Url,
}

impl UrlResolver {
    /// Fails when `base` is not an absolute, hierarchical URL
    pub fn new(base: &str) -> QueryResult<Self> {
        let trimmed = base.trim();
        match Url::parse(trimmed) {
            Ok(url) if !url.cannot_be_a_base() => Ok(Self { base: url }),
            _ => Err(QueryError::InvalidBaseUrl {
                base: trimmed.to_string(),
            }),
        }
    }

    /// Resolve `url` against the base.
    ///
    /// Values that are already absolute (`http:`, `mailto:` ...) come back
    /// unchanged; an empty value resolves to the base without its fragment.
    pub fn resolve(&self, url: &str) -> String {
        let url = url.trim();
        if Url::parse(url).is_ok() {
            return url.to_string();
        }
        match self.base.join(url) {
            Ok(resolved) => resolved.to_string(),
            Err(err) => {
                tracing::trace!(url, "leaving unresolvable URL as is: {}", err);
                url.to_string()
            }
        }
    }

    /// One-shot combination of a base and a possibly relative URL
    pub fn combine(base: &str, url: &str) -> QueryResult<String> {
        Ok(Self::new(base)?.resolve(url))
    }
}
