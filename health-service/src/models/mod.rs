use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A person as owned by the external registry. Queried, never mutated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
}

/// One element of the `/health/all` aggregation: a registry person merged
/// with their stored document, `{}` when none exists.
#[derive(Debug, Serialize)]
pub struct PersonHealth {
    pub id: i64,
    pub name: String,
    pub health: Value,
}
