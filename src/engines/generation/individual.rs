use super::genome::Genome;
use serde::{Deserialize, Serialize};

/// A genome paired with its cached fitness. Lower fitness is better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    genome: Genome,
    fitness: Option<f64>,
}

impl Individual {
    pub fn new(genome: Genome) -> Self {
        Self {
            genome,
            fitness: None,
        }
    }

    pub fn genome(&self) -> &[u32] {
        &self.genome
    }

    /// Mutable access to the genes. Any cached fitness is invalidated.
    pub fn genome_mut(&mut self) -> &mut [u32] {
        self.fitness = None;
        &mut self.genome
    }

    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Sort key: unevaluated individuals rank behind every evaluated one.
    pub(crate) fn rank_key(&self) -> f64 {
        self.fitness.unwrap_or(f64::INFINITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genome_edit_invalidates_fitness() {
        let mut individual = Individual::new(vec![1, 2, 3]);
        individual.set_fitness(2.0);
        assert!(individual.is_evaluated());

        individual.genome_mut()[0] = 4;
        assert_eq!(individual.fitness(), None);
        assert_eq!(individual.genome(), &[4, 2, 3]);
    }
}
