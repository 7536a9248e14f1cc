use super::traits::{check_positive, ConfigSection};
use crate::error::MelodyError;
use crate::types::HALF_BEATS_PER_BEAT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MelodyConfig {
    pub number_of_bars: usize,
    pub beats_per_bar: u32,
    /// Key such as `C`, `a` or `Bb major`. Prompted for when absent.
    pub key: Option<String>,
    /// One chord symbol per bar. Prompted for when empty.
    pub chords: Vec<String>,
    /// Hide the last diatonic chord (VII) from the setup prompt.
    pub drop_last_diatonic_chord: bool,
    /// Candidate note lengths in beats, each a positive multiple of half a beat.
    pub note_durations: Vec<f64>,
}

impl Default for MelodyConfig {
    fn default() -> Self {
        Self {
            number_of_bars: 4,
            beats_per_bar: 8,
            key: None,
            chords: Vec::new(),
            drop_last_diatonic_chord: true,
            note_durations: vec![0.5, 1.0, 1.5, 2.0],
        }
    }
}

impl MelodyConfig {
    /// Note durations converted to half beats.
    pub fn duration_half_beats(&self) -> Result<Vec<u32>, MelodyError> {
        self.note_durations
            .iter()
            .map(|&beats| {
                let halves = beats * HALF_BEATS_PER_BEAT as f64;
                if beats <= 0.0 || halves.fract() != 0.0 {
                    Err(MelodyError::Configuration(format!(
                        "melody.note_durations must be positive multiples of 0.5, got {}",
                        beats
                    )))
                } else {
                    Ok(halves as u32)
                }
            })
            .collect()
    }
}

impl ConfigSection for MelodyConfig {
    fn section_name() -> &'static str {
        "melody"
    }

    fn validate(&self) -> Result<(), MelodyError> {
        let section = Self::section_name();
        check_positive(section, "number_of_bars", self.number_of_bars)?;
        check_positive(section, "beats_per_bar", self.beats_per_bar as usize)?;
        if self.note_durations.is_empty() {
            return Err(MelodyError::Configuration(
                "melody.note_durations must not be empty".to_string(),
            ));
        }
        self.duration_half_beats()?;
        if !self.chords.is_empty() && self.chords.len() != self.number_of_bars {
            return Err(MelodyError::Configuration(format!(
                "melody.chords has {} chords but number_of_bars is {}",
                self.chords.len(),
                self.number_of_bars
            )));
        }
        Ok(())
    }
}
