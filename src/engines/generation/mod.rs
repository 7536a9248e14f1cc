pub mod genome;
pub mod gene_consumer;
pub mod individual;
pub mod operators;
pub mod hall_of_fame;
pub mod evolution_engine;
pub mod progress;

pub use genome::Genome;
pub use individual::Individual;
pub use hall_of_fame::HallOfFame;
pub use evolution_engine::{EvolutionEngine, EvolutionConfig, ProgressCallback};
pub use progress::BestMelodyReporter;
