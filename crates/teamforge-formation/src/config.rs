use serde::{Deserialize, Serialize};
use teamforge_genetic::genetic::GeneticParams;

use crate::FormationSeed;

/// Players per team in a standard match.
pub const DEFAULT_TEAM_SIZE: usize = 5;

/// Settings for one formation request.
///
/// Every field is optional when deserializing; genetic parameters sit at the
/// top level next to `team_size`:
///
/// ```
/// use teamforge_formation::FormationConfig;
///
/// let config: FormationConfig =
///     serde_json::from_str(r#"{ "generations": 400, "mutation_rate": 0.2 }"#).unwrap();
/// assert_eq!(config.team_size, 5);
/// assert_eq!(config.genetic.generations, 400);
/// assert_eq!(config.genetic.population_size, 100);
/// assert!(config.seed.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormationConfig {
    pub team_size: usize,
    #[serde(flatten)]
    pub genetic: GeneticParams,
    /// Fixed seed; a fresh one is drawn per request when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<FormationSeed>,
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            team_size: DEFAULT_TEAM_SIZE,
            genetic: GeneticParams::default(),
            seed: None,
        }
    }
}

impl FormationConfig {
    /// Number of candidates needed to fill both teams.
    #[must_use]
    pub fn required_players(&self) -> usize {
        self.team_size * 2
    }

    #[must_use]
    pub fn with_seed(mut self, seed: FormationSeed) -> Self {
        self.seed = Some(seed);
        self
    }
}
