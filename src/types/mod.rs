use serde::{Deserialize, Serialize};

// ============= Routing Types =============

/// Outcome of classifying a request against the route taxonomy.
///
/// "No match" is a normal, representable outcome (`route == None`), distinct
/// from an encoder failure.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
    /// Best-matching route name, when the score cleared the confidence threshold.
    pub route: Option<String>,
    /// The best similarity score observed across all routes.
    pub score: f32,
}

// ============= Capability Types =============

/// Datasets served by the NBA data-fetch capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NbaDataset {
    /// Per-team roster and per-game player stats.
    TeamStats,
    /// League-wide injury report.
    InjuryReport,
}

/// The closed set of external actions a worker may be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityKind {
    /// General web search.
    WebSearch,
    /// Targeted search that reads the top-ranked page.
    SiteQuery,
    /// NBA domain data fetch for one dataset.
    DomainFetch(NbaDataset),
}

/// Descriptor advertised to the completion engine for one capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityDescriptor {
    /// Stable capability name the engine invokes by.
    pub name: String,
    /// What the capability does and what its query should look like.
    pub description: String,
}

// ============= Execution Types =============

/// Terminal value of a dispatched request. Not retained by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// The worker's natural-language findings.
    pub text: String,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Empty or malformed request. The caller should fix the input and retry.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No route cleared the confidence threshold. Recoverable by rephrasing.
    #[error(
        "No route matched with confidence (best score {best_score:.3}, threshold {threshold:.3})"
    )]
    Unroutable { best_score: f32, threshold: f32 },

    /// A route name with no registered worker profile. Configuration defect,
    /// caught at startup validation.
    #[error("No worker profile registered for route: {0}")]
    UnknownRoute(String),

    /// A route name registered twice. Configuration defect.
    #[error("Route already registered: {0}")]
    DuplicateRoute(String),

    /// Invalid static configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The text encoder failed to produce an embedding.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A capability invocation failed (network failure, empty result,
    /// malformed upstream data).
    #[error("Tool '{name}' failed: {message}")]
    Tool { name: String, message: String },

    /// The completion engine failed.
    #[error("Completion error: {0}")]
    Completion(String),

    /// An external-collaborator failure surfaced while serving a request.
    #[error("Task execution failed ({context}): {source}")]
    Execution {
        context: String,
        #[source]
        source: Box<AppError>,
    },
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unroutable_display_carries_scores() {
        let err = AppError::Unroutable {
            best_score: 0.412,
            threshold: 0.72,
        };
        let message = err.to_string();
        assert!(message.contains("0.412"));
        assert!(message.contains("0.720"));
    }

    #[test]
    fn test_execution_wraps_source() {
        let err = AppError::Execution {
            context: "route 'stats'".to_string(),
            source: Box::new(AppError::Completion("upstream timeout".to_string())),
        };
        let message = err.to_string();
        assert!(message.contains("route 'stats'"));
        assert!(message.contains("upstream timeout"));
    }

    #[test]
    fn test_capability_kind_serde_round_trip() {
        let kind = CapabilityKind::DomainFetch(NbaDataset::InjuryReport);
        let json = serde_json::to_string(&kind).unwrap();
        let back: CapabilityKind = serde_json::from_str(&json).unwrap();
        assert_eq!(kind, back);
    }
}
