pub mod generation;
pub mod evaluation;
