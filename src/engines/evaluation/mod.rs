pub mod renderer;
pub mod rating;
pub mod oracle;

pub use renderer::MelodyRenderer;
pub use rating::{ConsoleRatingPrompt, Rating, RatingPrompt, RatingResponse};
pub use oracle::{FitnessOracle, HumanFitnessOracle};
