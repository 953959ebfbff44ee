//! Semantic routing: the intent taxonomy and the classifier over it.

/// Route registry holding the intent taxonomy.
pub mod registry;
/// Request classifier over the primed taxonomy.
pub mod router;

pub use registry::{Route, RouteRegistry};
pub use router::Router;
