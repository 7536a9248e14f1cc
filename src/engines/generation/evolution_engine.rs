use crate::config::EvolutionConfig as EvolutionSettings;
use crate::engines::evaluation::FitnessOracle;
use crate::engines::generation::{
    hall_of_fame::HallOfFame,
    individual::Individual,
    operators::*,
};
use crate::error::MelodyError;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    pub genome_length: usize,
    pub gene_range: std::ops::Range<u32>,
    /// Per-gene redraw probability inside mutation.
    pub mutation_rate: f64,
    /// Probability an offspring is passed through mutation.
    pub mutation_probability: f64,
    pub crossover_rate: f64,
    pub hall_of_fame_size: usize,
    pub seed: Option<u64>,
}

impl EvolutionConfig {
    /// Builds the engine settings for a melody of `genome_length` beat slots over a
    /// scale of `scale_size` pitches.
    pub fn from_settings(settings: &EvolutionSettings, genome_length: usize, scale_size: usize) -> Self {
        let upper = u32::try_from(scale_size).unwrap_or(u32::MAX).max(1);
        Self {
            population_size: settings.population_size,
            generations: settings.generations,
            genome_length,
            gene_range: 0..upper,
            mutation_rate: settings.mutation_rate,
            mutation_probability: settings.mutation_probability,
            crossover_rate: settings.crossover_rate,
            hall_of_fame_size: settings.hall_of_fame_size,
            seed: settings.seed,
        }
    }
}

pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize);
    fn on_candidate_evaluated(&mut self, candidate: usize, total: usize, fitness: f64);
    fn on_generation_complete(&mut self, generation: usize, best: &Individual, hall_of_fame_size: usize);
}

/// Interactive generational loop: vary, evaluate, truncate, record.
pub struct EvolutionEngine<O: FitnessOracle> {
    config: EvolutionConfig,
    oracle: O,
    hall_of_fame: HallOfFame,
    rng: StdRng,
}

impl<O: FitnessOracle> EvolutionEngine<O> {
    pub fn new(config: EvolutionConfig, oracle: O) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let hall_of_fame = HallOfFame::new(config.hall_of_fame_size);

        Self {
            config,
            oracle,
            hall_of_fame,
            rng,
        }
    }

    /// Run the evolution process and return the best individual found.
    ///
    /// A failed evaluation aborts the run; the Hall of Fame keeps whatever was
    /// recorded before the failure.
    pub fn run<C: ProgressCallback>(&mut self, callback: &mut C) -> Result<Individual, MelodyError> {
        if self.config.population_size == 0 || self.config.gene_range.is_empty() {
            return Err(MelodyError::Generation(
                "population size and gene range must be non-empty".to_string(),
            ));
        }

        // Initialize population
        let mut population = self.initialize_population();

        for generation in 0..self.config.generations {
            callback.on_generation_start(generation);
            log::info!("Generation {} of {}", generation + 1, self.config.generations);

            let mut offspring = self.vary(&population);
            self.evaluate_population(&mut offspring, callback)?;

            population = select_best(&offspring, self.config.population_size);
            self.hall_of_fame.update(&population);

            let best = self.hall_of_fame.best().ok_or_else(|| {
                MelodyError::Generation(format!("no evaluated individual after generation {}", generation + 1))
            })?;
            log::info!(
                "Generation {} complete, best fitness {:?}",
                generation + 1,
                best.fitness()
            );
            callback.on_generation_complete(generation, best, self.hall_of_fame.len());
        }

        self.hall_of_fame
            .best()
            .cloned()
            .ok_or_else(|| MelodyError::Generation("no generations were run".to_string()))
    }

    fn initialize_population(&mut self) -> Vec<Individual> {
        (0..self.config.population_size)
            .map(|_| {
                Individual::new(random_genome(
                    self.config.genome_length,
                    self.config.gene_range.clone(),
                    &mut self.rng,
                ))
            })
            .collect()
    }

    /// Clone the population, cross consecutive pairs and mutate.
    fn vary(&mut self, population: &[Individual]) -> Vec<Individual> {
        let mut offspring = population.to_vec();

        for i in (1..offspring.len()).step_by(2) {
            if self.rng.gen::<f64>() < self.config.crossover_rate {
                let (left, right) = offspring.split_at_mut(i);
                let cut = two_point_crossover(
                    left[i - 1].genome_mut(),
                    right[0].genome_mut(),
                    &mut self.rng,
                );
                log::debug!("Crossed offspring {} and {} at {:?}", i - 1, i, cut);
            }
        }

        for (i, individual) in offspring.iter_mut().enumerate() {
            if self.rng.gen::<f64>() < self.config.mutation_probability {
                mutate(
                    individual.genome_mut(),
                    self.config.mutation_rate,
                    self.config.gene_range.clone(),
                    &mut self.rng,
                );
                log::debug!("Mutated offspring {}", i);
            }
        }

        offspring
    }

    fn evaluate_population<C: ProgressCallback>(
        &mut self,
        offspring: &mut [Individual],
        callback: &mut C,
    ) -> Result<(), MelodyError> {
        let total = offspring.len();
        for (i, individual) in offspring.iter_mut().enumerate() {
            let fitness = self.oracle.evaluate(individual.genome()).map_err(|e| {
                log::error!("Evaluation of candidate {}/{} failed: {}", i + 1, total, e);
                e
            })?;
            individual.set_fitness(fitness);
            callback.on_candidate_evaluated(i + 1, total, fitness);
        }
        Ok(())
    }

    pub fn get_hall_of_fame(&self) -> &HallOfFame {
        &self.hall_of_fame
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }
}
