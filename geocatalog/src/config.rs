//! Search configuration.
//!
//! Built once at startup and shared by reference; the exclusion patterns
//! in particular are compiled a single time, never per request.

use std::time::Duration;

use regex::Regex;

/// Default TTL for cached external search results.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Default row limit for a single external search call.
pub const DEFAULT_MAX_ROWS: usize = 1000;

/// Process-wide configuration for the combined search orchestrator.
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    exclusions: Vec<Regex>,
    cache_ttl: Option<Duration>,
    max_rows: Option<usize>,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile an ordered set of exclusion patterns. A layer document
    /// whose name matches any pattern is dropped from search results.
    pub fn with_exclusions<I, S>(mut self, patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclusions = patterns
            .into_iter()
            .map(|p| Regex::new(p.as_ref()))
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }

    /// True when the layer name matches one of the exclusion patterns.
    pub fn excludes(&self, name: &str) -> bool {
        self.exclusions.iter().any(|p| p.is_match(name))
    }

    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl.unwrap_or(DEFAULT_CACHE_TTL)
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows.unwrap_or(DEFAULT_MAX_ROWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::new();
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.max_rows(), 1000);
        assert!(!config.excludes("anything"));
    }

    #[test]
    fn test_exclusion_matching() {
        let config = SearchConfig::new()
            .with_exclusions(["^tmp_", "_scratch$"])
            .unwrap();
        assert!(config.excludes("tmp_upload_123"));
        assert!(config.excludes("roads_scratch"));
        assert!(!config.excludes("base:roads"));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        assert!(SearchConfig::new().with_exclusions(["[unclosed"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = SearchConfig::new()
            .with_cache_ttl(Duration::from_secs(5))
            .with_max_rows(50);
        assert_eq!(config.cache_ttl(), Duration::from_secs(5));
        assert_eq!(config.max_rows(), 50);
    }
}
