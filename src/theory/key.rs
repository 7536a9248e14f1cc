//! Key signatures: a tonic plus a mode.

use super::pitch::PitchClass;
use crate::error::{MelodyError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Major,
    Minor,
}

impl Mode {
    /// Semitone offsets of the seven scale degrees from the tonic.
    pub fn intervals(self) -> [u8; 7] {
        match self {
            Mode::Major => [0, 2, 4, 5, 7, 9, 11],
            Mode::Minor => [0, 2, 3, 5, 7, 8, 10],
        }
    }

    fn from_word(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "major" | "maj" | "ionian" => Some(Mode::Major),
            "minor" | "min" | "aeolian" => Some(Mode::Minor),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Major => write!(f, "major"),
            Mode::Minor => write!(f, "minor"),
        }
    }
}

/// Tonal context of a run. Immutable once parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySignature {
    tonic: PitchClass,
    mode: Mode,
    prefer_flats: bool,
}

impl KeySignature {
    pub fn new(tonic: PitchClass, mode: Mode) -> Self {
        Self {
            tonic,
            mode,
            prefer_flats: conventionally_flat(tonic, mode),
        }
    }

    pub fn tonic(&self) -> PitchClass {
        self.tonic
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn prefer_flats(&self) -> bool {
        self.prefer_flats
    }

    /// The seven diatonic pitch classes starting on the tonic.
    pub fn scale_classes(&self) -> Vec<PitchClass> {
        self.mode
            .intervals()
            .iter()
            .map(|&i| self.tonic.transpose(i))
            .collect()
    }
}

fn conventionally_flat(tonic: PitchClass, mode: Mode) -> bool {
    match mode {
        Mode::Major => matches!(tonic.semitone(), 1 | 3 | 5 | 8 | 10),
        Mode::Minor => matches!(tonic.semitone(), 0 | 2 | 3 | 5 | 7 | 10),
    }
}

impl FromStr for KeySignature {
    type Err = MelodyError;

    /// Accepts `C`, `C major`, `a` (lowercase tonic is minor), `A minor`, `Bb`, `F#m`.
    fn from_str(text: &str) -> Result<Self> {
        let invalid = || MelodyError::InvalidKey(text.trim().to_string());
        let mut words = text.split_whitespace();
        let tonic_word = words.next().ok_or_else(invalid)?;
        let (tonic, flat, suffix) = PitchClass::parse_prefix(tonic_word).ok_or_else(invalid)?;

        let suffix_mode = match suffix {
            "" => None,
            "m" | "min" => Some(Mode::Minor),
            "maj" | "M" => Some(Mode::Major),
            _ => return Err(invalid()),
        };
        let word_mode = match words.next() {
            Some(word) => Some(Mode::from_word(word).ok_or_else(invalid)?),
            None => None,
        };
        if words.next().is_some() {
            return Err(invalid());
        }

        let mode = match (suffix_mode, word_mode) {
            (Some(a), Some(b)) if a != b => return Err(invalid()),
            (Some(mode), _) | (None, Some(mode)) => mode,
            (None, None) if tonic_word.starts_with(|c: char| c.is_ascii_lowercase()) => Mode::Minor,
            (None, None) => Mode::Major,
        };

        let mut key = KeySignature::new(tonic, mode);
        if flat {
            key.prefer_flats = true;
        } else if tonic_word.contains('#') || tonic_word.contains('♯') {
            key.prefer_flats = false;
        }
        Ok(key)
    }
}

impl fmt::Display for KeySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic.name(self.prefer_flats), self.mode)
    }
}
