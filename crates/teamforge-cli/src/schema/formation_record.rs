use chrono::{DateTime, Utc};
use serde::Serialize;
use teamforge_formation::{Formation, FormationConfig};

/// A formation as written to the output file.
#[derive(Debug, Clone, Serialize)]
pub struct FormationRecord {
    pub formed_at: DateTime<Utc>,
    pub candidate_count: usize,
    pub config: FormationConfig,
    #[serde(flatten)]
    pub formation: Formation,
}
