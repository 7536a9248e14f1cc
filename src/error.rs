use thiserror::Error;

#[derive(Error, Debug)]
pub enum MelodyError {
    #[error("Invalid rating: {0}")]
    InvalidRating(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid chord symbol: {0}")]
    InvalidChordSymbol(String),

    #[error("Chord {chord} is not available in {key}")]
    ChordNotInKey { chord: String, key: String },

    #[error("Rendering error: {0}")]
    Rendering(String),

    #[error("Playback error: {0}")]
    Playback(String),

    #[error("Evaluation failed for genome {genome:?}: {source}")]
    Evaluation {
        genome: Vec<u32>,
        #[source]
        source: Box<MelodyError>,
    },

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Input closed while waiting for a response")]
    InputClosed,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

impl MelodyError {
    /// Wraps a failure raised while a candidate was being evaluated.
    pub fn evaluation(genome: &[u32], source: MelodyError) -> Self {
        MelodyError::Evaluation {
            genome: genome.to_vec(),
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, MelodyError>;
