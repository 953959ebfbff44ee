//! Worker profiles and the route-to-worker lookup.
//!
//! Behavior differences between workers are pure data: role, goal, backstory,
//! capability kinds, and task template. There is no per-worker type.

/// Built-in worker personas for the NBA research taxonomy.
pub mod profiles;

use crate::routing::RouteRegistry;
use crate::types::{AppError, CapabilityKind, Result};
use std::collections::HashMap;

/// Static persona and capability configuration bound to one route.
#[derive(Debug, Clone)]
pub struct WorkerProfile {
    /// Short role title, e.g. "NBA Injury Researcher".
    pub role: String,
    /// What the worker is meant to accomplish.
    pub goal: String,
    /// Free-text persona and methodology description.
    pub backstory: String,
    /// Ordered capability kinds this worker may invoke.
    pub capabilities: Vec<CapabilityKind>,
    /// Prefix template for composed task descriptions.
    pub task_template: String,
    /// A task runs on exactly one worker; delegation stays disabled.
    pub allow_delegation: bool,
}

/// Static lookup from route name to [`WorkerProfile`].
///
/// A 1:1 mapping, immutable at runtime. Consistency with the route registry
/// is checked eagerly at startup via [`WorkerRegistry::validate_routes`], not
/// discovered lazily mid-request.
#[derive(Debug, Clone, Default)]
pub struct WorkerRegistry {
    profiles: HashMap<String, WorkerProfile>,
}

impl WorkerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            profiles: HashMap::new(),
        }
    }

    /// The built-in worker taxonomy matching [`RouteRegistry::nba_default`].
    pub fn nba_default() -> Self {
        Self {
            profiles: profiles::defaults()
                .into_iter()
                .map(|(route, profile)| (route.to_string(), profile))
                .collect(),
        }
    }

    /// Register a worker profile for a route name.
    ///
    /// # Errors
    ///
    /// `Configuration` when the route already has a profile, or when the
    /// profile requests delegation (tasks run on exactly one worker).
    pub fn register(&mut self, route: &str, profile: WorkerProfile) -> Result<()> {
        if profile.allow_delegation {
            return Err(AppError::Configuration(format!(
                "Worker profile for route '{}' requests delegation; tasks run on a single worker",
                route
            )));
        }
        if self.profiles.contains_key(route) {
            return Err(AppError::Configuration(format!(
                "Worker profile already registered for route '{}'",
                route
            )));
        }

        self.profiles.insert(route.to_string(), profile);
        Ok(())
    }

    /// Resolve a route name to its worker profile.
    pub fn resolve(&self, route: &str) -> Result<&WorkerProfile> {
        self.profiles
            .get(route)
            .ok_or_else(|| AppError::UnknownRoute(route.to_string()))
    }

    /// Whether a profile is registered for the route.
    pub fn has_profile(&self, route: &str) -> bool {
        self.profiles.contains_key(route)
    }

    /// Number of registered profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the registry holds no profiles.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Verify every registered route resolves to a worker profile.
    ///
    /// # Errors
    ///
    /// `UnknownRoute` naming the first route without a profile.
    pub fn validate_routes(&self, routes: &RouteRegistry) -> Result<()> {
        for route in routes.routes() {
            if !self.profiles.contains_key(route.name()) {
                return Err(AppError::UnknownRoute(route.name().to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_profile() -> WorkerProfile {
        WorkerProfile {
            role: "Test Researcher".to_string(),
            goal: "Research things".to_string(),
            backstory: "A test persona".to_string(),
            capabilities: vec![CapabilityKind::WebSearch],
            task_template: "Research the following".to_string(),
            allow_delegation: false,
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = WorkerRegistry::new();
        registry.register("stats", test_profile()).unwrap();

        let profile = registry.resolve("stats").unwrap();
        assert_eq!(profile.role, "Test Researcher");
    }

    #[test]
    fn test_resolve_unknown_route() {
        let registry = WorkerRegistry::new();
        let err = registry.resolve("nonexistent").unwrap_err();
        assert!(matches!(err, AppError::UnknownRoute(route) if route == "nonexistent"));
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut registry = WorkerRegistry::new();
        registry.register("stats", test_profile()).unwrap();

        let err = registry.register("stats", test_profile()).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_register_rejects_delegation() {
        let mut registry = WorkerRegistry::new();
        let mut profile = test_profile();
        profile.allow_delegation = true;

        let err = registry.register("stats", profile).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_validate_routes_missing_profile() {
        let routes = RouteRegistry::nba_default();
        let workers = WorkerRegistry::new();

        let err = workers.validate_routes(&routes).unwrap_err();
        assert!(matches!(err, AppError::UnknownRoute(_)));
    }

    #[test]
    fn test_nba_default_covers_default_routes() {
        let routes = RouteRegistry::nba_default();
        let workers = WorkerRegistry::nba_default();

        workers.validate_routes(&routes).unwrap();
        assert_eq!(workers.len(), routes.len());
    }

    #[test]
    fn test_nba_default_profiles_are_bounded() {
        let workers = WorkerRegistry::nba_default();
        for route in ["stats", "injuries", "general"] {
            let profile = workers.resolve(route).unwrap();
            assert!(!profile.capabilities.is_empty());
            assert!(!profile.allow_delegation);
            assert!(!profile.task_template.is_empty());
        }
    }
}
