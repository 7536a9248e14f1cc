use super::traits::{check_positive, ConfigSection};
use crate::error::MelodyError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// SoundFont used by the synthesizer. Required before anything can be rendered.
    pub soundfont_path: Option<PathBuf>,
    pub synth_command: String,
    pub player_command: String,
    pub player_args: Vec<String>,
    pub sample_rate: u32,
    pub tempo_bpm: u32,
    pub work_dir: PathBuf,
    /// Play the best melody after every generation.
    pub play_best: bool,
    /// General MIDI program numbers.
    pub melody_program: u8,
    pub chord_program: u8,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            soundfont_path: None,
            synth_command: "fluidsynth".to_string(),
            player_command: "aplay".to_string(),
            player_args: vec!["-q".to_string()],
            sample_rate: 44100,
            tempo_bpm: 120,
            work_dir: PathBuf::from("melodyevo-work"),
            play_best: true,
            melody_program: 0,
            chord_program: 0,
        }
    }
}

impl ConfigSection for AudioConfig {
    fn section_name() -> &'static str {
        "audio"
    }

    fn validate(&self) -> Result<(), MelodyError> {
        let section = Self::section_name();
        check_positive(section, "sample_rate", self.sample_rate as usize)?;
        check_positive(section, "tempo_bpm", self.tempo_bpm as usize)?;
        if self.melody_program > 127 || self.chord_program > 127 {
            return Err(MelodyError::Configuration(
                "audio programs must be General MIDI numbers 0-127".to_string(),
            ));
        }
        if self.synth_command.trim().is_empty() || self.player_command.trim().is_empty() {
            return Err(MelodyError::Configuration(
                "audio.synth_command and audio.player_command must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
