//! Worker capabilities: the bounded external actions a worker may invoke.
//!
//! Capabilities form a closed set behind one invocation interface:
//!
//! - [`WebSearchTool`] - general web search (DuckDuckGo via daedra)
//! - [`SiteQueryTool`] - targeted search that reads the top-ranked page
//! - [`NbaDataTool`] - NBA data fetch from basketball-reference.com
//!
//! The completion engine receives the ordered descriptor list for a worker
//! and decides which capability to invoke and with what query; it can never
//! reach outside the worker's grant.

/// NBA domain data fetch.
pub mod nba;
/// Web search and targeted page reading.
pub mod search;

use crate::types::{AppError, CapabilityDescriptor, CapabilityKind, Result};

pub use nba::NbaDataTool;
pub use search::{SiteQueryTool, WebSearchTool};

/// A bounded external action bound to a worker for one task.
pub enum Capability {
    /// General web search.
    WebSearch(WebSearchTool),
    /// Targeted search that reads the top-ranked page.
    SiteQuery(SiteQueryTool),
    /// NBA domain data fetch.
    DomainFetch(NbaDataTool),
}

impl Capability {
    /// Stable capability name, as advertised to the completion engine.
    pub fn name(&self) -> &str {
        match self {
            Capability::WebSearch(tool) => tool.name(),
            Capability::SiteQuery(tool) => tool.name(),
            Capability::DomainFetch(tool) => tool.name(),
        }
    }

    /// Human-readable description of what the capability does.
    pub fn description(&self) -> &str {
        match self {
            Capability::WebSearch(tool) => tool.description(),
            Capability::SiteQuery(tool) => tool.description(),
            Capability::DomainFetch(tool) => tool.description(),
        }
    }

    /// The descriptor advertised to the completion engine.
    pub fn descriptor(&self) -> CapabilityDescriptor {
        CapabilityDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
        }
    }

    /// Invoke the capability with a free-text query.
    ///
    /// # Errors
    ///
    /// [`AppError::Tool`] on network failure, empty results, or malformed
    /// upstream data. Never retried here; retry policy belongs to the caller.
    pub async fn invoke(&self, query: &str) -> Result<String> {
        match self {
            Capability::WebSearch(tool) => tool.invoke(query).await,
            Capability::SiteQuery(tool) => tool.invoke(query).await,
            Capability::DomainFetch(tool) => tool.invoke(query).await,
        }
    }
}

/// Builds ordered capability lists for worker profiles.
///
/// One HTTP client is shared across every capability the set materializes.
#[derive(Debug, Clone)]
pub struct CapabilitySet {
    http: reqwest::Client,
}

impl CapabilitySet {
    /// Create a capability set with a shared HTTP client.
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("courtside/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http })
    }

    /// Materialize one capability for a kind.
    pub fn capability(&self, kind: CapabilityKind) -> Capability {
        match kind {
            CapabilityKind::WebSearch => Capability::WebSearch(WebSearchTool::new()),
            CapabilityKind::SiteQuery => Capability::SiteQuery(SiteQueryTool::new()),
            CapabilityKind::DomainFetch(dataset) => {
                Capability::DomainFetch(NbaDataTool::new(dataset, self.http.clone()))
            }
        }
    }

    /// Materialize the ordered capability list for a profile's kinds.
    pub fn for_kinds(&self, kinds: &[CapabilityKind]) -> Vec<Capability> {
        kinds.iter().map(|kind| self.capability(*kind)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NbaDataset;

    #[test]
    fn test_capability_names_are_stable() {
        let set = CapabilitySet::new().unwrap();
        assert_eq!(set.capability(CapabilityKind::WebSearch).name(), "web_search");
        assert_eq!(set.capability(CapabilityKind::SiteQuery).name(), "site_query");
        assert_eq!(
            set.capability(CapabilityKind::DomainFetch(NbaDataset::TeamStats))
                .name(),
            "fetch_nba_stats"
        );
        assert_eq!(
            set.capability(CapabilityKind::DomainFetch(NbaDataset::InjuryReport))
                .name(),
            "fetch_nba_injuries"
        );
    }

    #[test]
    fn test_for_kinds_preserves_order() {
        let set = CapabilitySet::new().unwrap();
        let kinds = [
            CapabilityKind::SiteQuery,
            CapabilityKind::WebSearch,
            CapabilityKind::DomainFetch(NbaDataset::TeamStats),
        ];

        let names: Vec<String> = set
            .for_kinds(&kinds)
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["site_query", "web_search", "fetch_nba_stats"]);
    }

    #[test]
    fn test_descriptors_are_nonempty() {
        let set = CapabilitySet::new().unwrap();
        for kind in [
            CapabilityKind::WebSearch,
            CapabilityKind::SiteQuery,
            CapabilityKind::DomainFetch(NbaDataset::InjuryReport),
        ] {
            let descriptor = set.capability(kind).descriptor();
            assert!(!descriptor.name.is_empty());
            assert!(!descriptor.description.is_empty());
        }
    }
}
