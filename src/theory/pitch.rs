//! Pitch classes and concrete MIDI pitches.

use serde::{Deserialize, Serialize};
use std::fmt;

const SHARP_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
const FLAT_NAMES: [&str; 12] = ["C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B"];

/// One of the twelve chromatic pitch classes, `0` = C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PitchClass(u8);

impl PitchClass {
    pub fn new(semitone: u8) -> Self {
        Self(semitone % 12)
    }

    pub fn semitone(self) -> u8 {
        self.0
    }

    pub fn transpose(self, semitones: u8) -> Self {
        Self::new(self.0 + semitones % 12)
    }

    pub fn name(self, prefer_flats: bool) -> &'static str {
        if prefer_flats {
            FLAT_NAMES[self.0 as usize]
        } else {
            SHARP_NAMES[self.0 as usize]
        }
    }

    /// Parses a leading note name (`C`, `F#`, `Bb`, `c`) and returns the pitch class,
    /// whether it was spelled with a flat, and the unconsumed remainder.
    pub fn parse_prefix(text: &str) -> Option<(Self, bool, &str)> {
        let mut chars = text.char_indices();
        let (_, letter) = chars.next()?;
        let base = match letter.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };
        let rest = &text[letter.len_utf8()..];
        let (offset, flat, rest) = match rest.chars().next() {
            Some('#') | Some('♯') => {
                let c = rest.chars().next().map(char::len_utf8).unwrap_or(1);
                (1, false, &rest[c..])
            }
            Some('b') | Some('♭') => {
                let c = rest.chars().next().map(char::len_utf8).unwrap_or(1);
                (11, true, &rest[c..])
            }
            _ => (0, false, rest),
        };
        Some((Self::new(base + offset), flat, rest))
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name(false))
    }
}

/// A concrete pitch as a MIDI note number (middle C = C4 = 60).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pitch(u8);

impl Pitch {
    pub fn from_midi(midi: u8) -> Self {
        Self(midi.min(127))
    }

    /// Builds a pitch from a class and an octave in scientific pitch notation.
    pub fn new(class: PitchClass, octave: i8) -> Self {
        let midi = (octave as i16 + 1) * 12 + class.semitone() as i16;
        Self(midi.clamp(0, 127) as u8)
    }

    pub fn midi(self) -> u8 {
        self.0
    }

    pub fn class(self) -> PitchClass {
        PitchClass::new(self.0 % 12)
    }

    pub fn octave(self) -> i8 {
        (self.0 / 12) as i8 - 1
    }

    pub fn transpose(self, semitones: u8) -> Self {
        Self::from_midi(self.0.saturating_add(semitones))
    }

    /// Note name with octave, e.g. `Bb3` or `A#3`.
    pub fn name(self, prefer_flats: bool) -> String {
        format!("{}{}", self.class().name(prefer_flats), self.octave())
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefix_accidentals() {
        let (pc, flat, rest) = PitchClass::parse_prefix("Bbm7").unwrap();
        assert_eq!(pc.semitone(), 10);
        assert!(flat);
        assert_eq!(rest, "m7");

        let (pc, flat, rest) = PitchClass::parse_prefix("F#").unwrap();
        assert_eq!(pc.semitone(), 6);
        assert!(!flat);
        assert_eq!(rest, "");

        let (pc, _, _) = PitchClass::parse_prefix("Cb").unwrap();
        assert_eq!(pc.semitone(), 11);

        assert!(PitchClass::parse_prefix("H").is_none());
        assert!(PitchClass::parse_prefix("").is_none());
    }

    #[test]
    fn test_pitch_octave_and_display() {
        let middle_c = Pitch::new(PitchClass::new(0), 4);
        assert_eq!(middle_c.midi(), 60);
        assert_eq!(middle_c.octave(), 4);
        assert_eq!(middle_c.to_string(), "C4");
        assert_eq!(middle_c.transpose(13).to_string(), "C#5");
        assert_eq!(middle_c.transpose(13).name(true), "Db5");
    }
}
