//! Route registry: the canonical intent taxonomy and its worked examples.

use crate::types::{AppError, Result};

/// A named intent category defined by example phrasings.
///
/// Created at process start from static configuration and immutable
/// thereafter; utterances never mutate.
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    utterances: Vec<String>,
}

impl Route {
    /// The route's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Example phrasings, in declaration order.
    pub fn utterances(&self) -> &[String] {
        &self.utterances
    }
}

/// Holds the intent taxonomy in registration order.
///
/// Registration order is load-bearing: the router breaks score ties in favor
/// of the earliest-registered route, because several routes in the default
/// taxonomy carry semantically overlapping example phrasings ("team
/// performance" flavored utterances appear under both the general and
/// team-performance intents).
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    routes: Vec<Route>,
}

/// The default NBA research taxonomy. Registration order matters, see
/// [`RouteRegistry`].
const DEFAULT_ROUTES: &[(&str, &[&str])] = &[
    (
        "injuries",
        &[
            "player injury updates",
            "team injury report",
            "injury status of [player name]",
            "[team name] injury list",
            "update on [player name]'s recovery",
        ],
    ),
    (
        "general",
        &[
            "season highlights",
            "game recaps",
            "upcoming NBA matchups",
            "notable NBA news",
            "recent trends in NBA",
        ],
    ),
    (
        "market",
        &[
            "betting line movements",
            "NBA betting odds",
            "betting trends in NBA",
        ],
    ),
    (
        "expert",
        &[
            "expert NBA predictions",
            "NBA game analysis",
            "NBA match forecasts",
        ],
    ),
    (
        "team_performance",
        &[
            "team recent performance in NBA",
            "team winning streaks in NBA",
            "detailed team game analysis",
            "offensive and defensive ratings of [team name]",
            "player performance statistics of [team name] in recent games",
        ],
    ),
    (
        "advisor",
        &[
            "betting advice for NBA games",
            "NBA betting strategy",
            "sports betting tips for NBA",
        ],
    ),
    (
        "stats",
        &[
            "team statistics",
            "individual player stats",
            "season averages for players",
            "NBA player scoring leaders",
            "NBA rebounding statistics",
            "roster",
            "team roster",
            "rosters",
            "current NBA standings",
            "current roster of",
            "research the current rosters for a team and list their starters",
            "update me on the current roster of the",
        ],
    ),
];

impl RouteRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// The built-in NBA research taxonomy.
    pub fn nba_default() -> Self {
        Self {
            routes: DEFAULT_ROUTES
                .iter()
                .map(|(name, utterances)| Route {
                    name: (*name).to_string(),
                    utterances: utterances.iter().map(|u| (*u).to_string()).collect(),
                })
                .collect(),
        }
    }

    /// Register a named route with its example utterances.
    ///
    /// # Errors
    ///
    /// `DuplicateRoute` when the name is already registered; `Configuration`
    /// when the utterance list is empty.
    pub fn register(&mut self, name: &str, utterances: &[&str]) -> Result<()> {
        if self.routes.iter().any(|r| r.name == name) {
            return Err(AppError::DuplicateRoute(name.to_string()));
        }
        if utterances.is_empty() {
            return Err(AppError::Configuration(format!(
                "Route '{}' must declare at least one utterance",
                name
            )));
        }

        self.routes.push(Route {
            name: name.to_string(),
            utterances: utterances.iter().map(|u| (*u).to_string()).collect(),
        });
        Ok(())
    }

    /// All routes, in registration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the registry holds no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
