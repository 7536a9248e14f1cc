use super::traits::{check_positive, check_rate, ConfigSection};
use crate::error::MelodyError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    /// Per-gene probability of a uniform redraw.
    pub mutation_rate: f64,
    /// Probability that an offspring goes through mutation at all.
    pub mutation_probability: f64,
    pub crossover_rate: f64,
    pub hall_of_fame_size: usize,
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 5,
            generations: 3,
            mutation_rate: 0.3,
            mutation_probability: 0.3,
            crossover_rate: 0.5,
            hall_of_fame_size: 1,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), MelodyError> {
        let section = Self::section_name();
        check_positive(section, "population_size", self.population_size)?;
        check_positive(section, "generations", self.generations)?;
        check_positive(section, "hall_of_fame_size", self.hall_of_fame_size)?;
        check_rate(section, "mutation_rate", self.mutation_rate)?;
        check_rate(section, "mutation_probability", self.mutation_probability)?;
        check_rate(section, "crossover_rate", self.crossover_rate)?;
        Ok(())
    }
}
