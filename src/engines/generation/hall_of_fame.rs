use crate::engines::generation::individual::Individual;

/// Best individuals seen across all generations, best first.
///
/// Survives population replacement. Members are only ever displaced by a strictly
/// better individual, so the recorded best fitness never increases.
pub struct HallOfFame {
    members: Vec<Individual>,
    max_size: usize,
}

impl HallOfFame {
    pub fn new(max_size: usize) -> Self {
        Self {
            members: Vec::with_capacity(max_size),
            max_size,
        }
    }

    /// Offer every evaluated individual of a population.
    pub fn update(&mut self, population: &[Individual]) {
        for individual in population {
            self.try_add(individual);
        }
    }

    /// Attempt to add an individual to the Hall of Fame
    pub fn try_add(&mut self, individual: &Individual) -> bool {
        let Some(fitness) = individual.fitness() else {
            return false;
        };
        if self.max_size == 0 {
            return false;
        }

        // Deduplication check
        if self.members.iter().any(|m| m.genome() == individual.genome()) {
            return false;
        }

        if self.members.len() >= self.max_size {
            match self.worst_fitness() {
                Some(worst) if fitness < worst => {
                    self.members.pop();
                }
                _ => return false,
            }
        }

        // Insert behind equal-fitness incumbents
        let position = self
            .members
            .iter()
            .position(|m| fitness < m.rank_key())
            .unwrap_or(self.members.len());
        self.members.insert(position, individual.clone());
        true
    }

    pub fn best(&self) -> Option<&Individual> {
        self.members.first()
    }

    pub fn best_fitness(&self) -> Option<f64> {
        self.best().and_then(Individual::fitness)
    }

    fn worst_fitness(&self) -> Option<f64> {
        self.members.last().and_then(Individual::fitness)
    }

    /// Get all members, best first
    pub fn get_all(&self) -> &[Individual] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
