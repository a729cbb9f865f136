//! Search provider registry.
//!
//! Interprets the configuration document as a map of provider id to scraper
//! endpoint definition and keeps the active set behind an atomic pointer so
//! request paths can read it while the refresh loop replaces it.

use std::collections::BTreeMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};

use crate::sink::{ConfigSink, SinkError};

/// Active providers keyed by id.
pub type ProviderSet = BTreeMap<String, ProviderConfig>;

/// One scraper endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Search URL template, e.g. `...?q={{query}}&page={{page:1}}`.
    pub url: String,

    #[serde(default = "default_method")]
    pub method: String,

    /// Request body template for non-GET providers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    /// Selector for the repeated result element.
    #[serde(default)]
    pub list: String,

    /// Field name → extraction selector.
    #[serde(default)]
    pub result: BTreeMap<String, Selector>,

    #[serde(default)]
    pub debug: bool,
}

fn default_method() -> String {
    "GET".to_string()
}

/// A CSS selector, optionally followed by extraction steps (`@href`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Selector {
    Single(String),
    Chain(Vec<String>),
}

impl ProviderConfig {
    fn validate(&self, id: &str) -> Result<(), SinkError> {
        let invalid = |reason: &str| SinkError::InvalidProvider {
            id: id.to_string(),
            reason: reason.to_string(),
        };

        if id.is_empty() {
            return Err(invalid("empty provider id"));
        }
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(invalid("url must start with http:// or https://"));
        }
        if self.method.trim().is_empty() {
            return Err(invalid("empty method"));
        }
        if let Some((field, _)) = self.result.iter().find(|(_, s)| match s {
            Selector::Single(s) => s.is_empty(),
            Selector::Chain(steps) => steps.is_empty(),
        }) {
            return Err(invalid(&format!("empty selector for result field '{}'", field)));
        }
        Ok(())
    }
}

/// Holds the active provider set.
pub struct ProviderRegistry {
    active: ArcSwap<ProviderSet>,
}

impl ProviderRegistry {
    /// Registry with no providers.
    pub fn new() -> Self {
        Self {
            active: ArcSwap::from_pointee(ProviderSet::new()),
        }
    }

    /// Registry pre-loaded with `document`.
    pub fn with_document(document: &[u8]) -> Result<Self, SinkError> {
        let registry = Self::new();
        registry.load(document)?;
        Ok(registry)
    }

    /// Current provider set; cheap to call from request paths.
    pub fn snapshot(&self) -> Arc<ProviderSet> {
        self.active.load_full()
    }

    pub fn len(&self) -> usize {
        self.active.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.load().is_empty()
    }

    /// Parse and check a document without activating it.
    pub fn parse(document: &[u8]) -> Result<ProviderSet, SinkError> {
        let set: ProviderSet = serde_json::from_slice(document)?;
        for (id, provider) in &set {
            provider.validate(id)?;
        }
        Ok(set)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSink for ProviderRegistry {
    fn load(&self, canonical: &[u8]) -> Result<(), SinkError> {
        // Fully parse before swapping so a bad document never replaces a good one.
        let set = Self::parse(canonical)?;
        let count = set.len();
        self.active.store(Arc::new(set));
        tracing::info!(providers = count, "Search providers activated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refresh::state::DEFAULT_CONFIG;

    #[test]
    fn test_default_document_loads() {
        let registry = ProviderRegistry::with_document(DEFAULT_CONFIG).unwrap();
        let set = registry.snapshot();
        let jackett = &set["jackett"];
        assert_eq!(jackett.name, "Jackett");
        assert_eq!(jackett.method, "GET");
        assert_eq!(
            jackett.result["url"],
            Selector::Chain(vec![".release-title a".into(), "@href".into()])
        );
        assert_eq!(jackett.result["seeds"], Selector::Single(".release-peers .label-seeders".into()));
    }

    #[test]
    fn test_rejected_document_keeps_previous_set() {
        let registry = ProviderRegistry::with_document(DEFAULT_CONFIG).unwrap();

        let err = registry.load(br#"{"bad": {"name": "Bad", "url": "ftp://x"}}"#).unwrap_err();
        assert!(matches!(err, SinkError::InvalidProvider { ref id, .. } if id == "bad"));

        let err = registry.load(br#"{"bad": {"name": "no url"}}"#).unwrap_err();
        assert!(matches!(err, SinkError::Schema(_)));

        let err = registry.load(br#"["not", "a", "map"]"#).unwrap_err();
        assert!(matches!(err, SinkError::Schema(_)));

        assert_eq!(registry.len(), 1);
        assert!(registry.snapshot().contains_key("jackett"));
    }

    #[test]
    fn test_load_is_idempotent() {
        let registry = ProviderRegistry::new();
        let doc = br#"{"a": {"url": "https://a.example/?q={{query}}", "list": "li"}}"#;
        registry.load(doc).unwrap();
        let first = registry.snapshot();
        registry.load(doc).unwrap();
        assert_eq!(*first, *registry.snapshot());
    }

    #[test]
    fn test_empty_selector_rejected() {
        let err = ProviderRegistry::parse(
            br#"{"a": {"url": "https://a.example", "result": {"name": []}}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("result field 'name'"));
    }
}
