//! Priority-ordered provider registry
//!
//! The registry maps provider ids to providers in the order they were
//! registered. Registration is first-wins: once an id is present, later
//! attempts to register the same id are ignored, and the original provider
//! instance stays in place.

use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;

use crate::error::Result;
use crate::provider::{ContentProvider, ProviderKind};

/// Summary of one registered provider, for display and JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderSummary {
    pub id: String,
    pub kind: ProviderKind,
    pub location: PathBuf,
}

/// Ordered mapping from provider id to provider
#[derive(Debug, Default, Clone)]
pub struct ProviderRegistry {
    providers: IndexMap<String, Arc<ContentProvider>>,
}

impl ProviderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under `id` unless the id is already taken
    ///
    /// Returns `true` if the provider was added.
    pub fn register(&mut self, id: impl Into<String>, provider: impl Into<ContentProvider>) -> bool {
        match self.providers.entry(id.into()) {
            Entry::Occupied(existing) => {
                tracing::debug!(
                    "Provider id {:?} already registered, keeping existing",
                    existing.key()
                );
                false
            }
            Entry::Vacant(slot) => {
                let provider = provider.into();
                tracing::debug!(
                    "Registered {} provider {:?} -> {}",
                    provider.kind(),
                    slot.key(),
                    provider.location().display()
                );
                slot.insert(Arc::new(provider));
                true
            }
        }
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.providers.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<ContentProvider>> {
        self.providers.get(id)
    }

    /// Provider ids in priority order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    /// `(id, provider)` pairs in priority order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<ContentProvider>)> {
        self.providers.iter().map(|(id, p)| (id.as_str(), p))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// First provider, in priority order, that has a file at `path`
    #[must_use]
    pub fn find(&self, path: &str) -> Option<(&str, &Arc<ContentProvider>)> {
        self.iter().find(|(_, provider)| provider.contains(path))
    }

    /// Read a file from the highest-priority provider that has it
    pub fn read(&self, path: &str) -> Result<Option<Vec<u8>>> {
        for (_, provider) in self.iter() {
            if let Some(data) = provider.read(path)? {
                return Ok(Some(data));
            }
        }
        Ok(None)
    }

    /// Summaries of every provider in priority order
    #[must_use]
    pub fn summary(&self) -> Vec<ProviderSummary> {
        self.iter()
            .map(|(id, provider)| ProviderSummary {
                id: id.to_string(),
                kind: provider.kind(),
                location: provider.location().to_path_buf(),
            })
            .collect()
    }
}
