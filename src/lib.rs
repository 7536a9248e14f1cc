pub mod audio;
pub mod config;
pub mod engines;
pub mod error;
pub mod setup;
pub mod summary;
pub mod theory;
pub mod types;

pub use error::{MelodyError, Result};
