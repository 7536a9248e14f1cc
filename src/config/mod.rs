pub mod traits;
pub mod evolution;
pub mod melody;
pub mod audio;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::EvolutionConfig;
pub use melody::MelodyConfig;
pub use audio::AudioConfig;
pub use traits::ConfigSection;
