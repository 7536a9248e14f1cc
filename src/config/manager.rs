use super::{
    audio::AudioConfig,
    evolution::EvolutionConfig,
    melody::MelodyConfig,
    traits::ConfigSection,
};
use crate::error::MelodyError;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variables look like `MELODYEVO__EVOLUTION__POPULATION_SIZE=8`.
pub const ENV_PREFIX: &str = "MELODYEVO";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub melody: MelodyConfig,
    pub audio: AudioConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), MelodyError> {
        self.evolution.validate()?;
        self.melody.validate()?;
        self.audio.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: AppConfig,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Layers defaults, an optional TOML file and `MELODYEVO__*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, MelodyError> {
        let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(" ")
                    .with_list_parse_key("melody.chords")
                    .with_list_parse_key("melody.note_durations")
                    .with_list_parse_key("audio.player_args"),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        log::debug!("Loaded configuration: {:?}", config);
        Ok(Self { config })
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), MelodyError> {
        let toml_str = toml::to_string_pretty(&self.config)?;

        std::fs::write(path, toml_str)
            .map_err(|e| MelodyError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    pub fn update<F>(&mut self, f: F) -> Result<(), MelodyError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.config.clone();
        f(&mut candidate);
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
