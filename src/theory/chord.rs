//! Textual chord symbols such as `Am`, `F#dim` or `G7`.

use super::pitch::PitchClass;
use crate::error::{MelodyError, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Dominant7,
    Major7,
    Minor7,
    HalfDiminished7,
    Sus2,
    Sus4,
}

impl ChordQuality {
    /// Semitone offsets of the chord tones from the root.
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Diminished => &[0, 3, 6],
            ChordQuality::Augmented => &[0, 4, 8],
            ChordQuality::Dominant7 => &[0, 4, 7, 10],
            ChordQuality::Major7 => &[0, 4, 7, 11],
            ChordQuality::Minor7 => &[0, 3, 7, 10],
            ChordQuality::HalfDiminished7 => &[0, 3, 6, 10],
            ChordQuality::Sus2 => &[0, 2, 7],
            ChordQuality::Sus4 => &[0, 5, 7],
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::HalfDiminished7 => "m7b5",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        let quality = match suffix {
            "" | "M" | "maj" => ChordQuality::Major,
            "m" | "min" | "-" => ChordQuality::Minor,
            "dim" | "°" | "o" => ChordQuality::Diminished,
            "aug" | "+" => ChordQuality::Augmented,
            "7" | "dom7" => ChordQuality::Dominant7,
            "maj7" | "M7" | "Δ7" => ChordQuality::Major7,
            "m7" | "min7" | "-7" => ChordQuality::Minor7,
            "m7b5" | "ø" | "ø7" => ChordQuality::HalfDiminished7,
            "sus2" => ChordQuality::Sus2,
            "sus4" | "sus" => ChordQuality::Sus4,
            _ => return None,
        };
        Some(quality)
    }
}

/// A chord root plus quality. Enharmonic spellings compare equal.
#[derive(Debug, Clone, Copy, Eq)]
pub struct ChordSymbol {
    root: PitchClass,
    quality: ChordQuality,
    prefer_flats: bool,
}

impl ChordSymbol {
    pub fn new(root: PitchClass, quality: ChordQuality) -> Self {
        Self {
            root,
            quality,
            prefer_flats: false,
        }
    }

    pub fn spelled_with_flats(mut self, prefer_flats: bool) -> Self {
        self.prefer_flats = prefer_flats;
        self
    }

    pub fn root(&self) -> PitchClass {
        self.root
    }

    pub fn quality(&self) -> ChordQuality {
        self.quality
    }
}

impl PartialEq for ChordSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.quality == other.quality
    }
}

impl std::hash::Hash for ChordSymbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.root.hash(state);
        self.quality.hash(state);
    }
}

impl FromStr for ChordSymbol {
    type Err = MelodyError;

    fn from_str(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let invalid = || MelodyError::InvalidChordSymbol(trimmed.to_string());
        if !trimmed.starts_with(|c: char| c.is_ascii_uppercase()) {
            return Err(invalid());
        }
        let (root, flat, suffix) = PitchClass::parse_prefix(trimmed).ok_or_else(invalid)?;
        let quality = ChordQuality::from_suffix(suffix).ok_or_else(invalid)?;
        Ok(ChordSymbol::new(root, quality).spelled_with_flats(flat))
    }
}

impl fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root.name(self.prefer_flats), self.quality.suffix())
    }
}

/// Ordered chord symbols, one per bar. Fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordProgression(Vec<ChordSymbol>);

impl ChordProgression {
    pub fn new(chords: Vec<ChordSymbol>) -> Self {
        Self(chords)
    }

    /// Parses a whitespace separated list such as `"C G Am F"`.
    pub fn parse_list(text: &str) -> Result<Self> {
        text.split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    pub fn chords(&self) -> &[ChordSymbol] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn symbols(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ChordProgression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbols().join(" "))
    }
}
