use crate::theory::{ChordSymbol, Pitch};
use std::fmt;

/// Durations are counted in half beats so that bar arithmetic stays exact.
pub const HALF_BEATS_PER_BEAT: u32 = 2;

/// A single melody note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    pub pitch: Pitch,
    pub half_beats: u32,
}

impl NoteEvent {
    pub fn beats(&self) -> f64 {
        self.half_beats as f64 / HALF_BEATS_PER_BEAT as f64
    }

    pub fn label(&self, prefer_flats: bool) -> String {
        format!("{}({})", self.pitch.name(prefer_flats), self.beats())
    }
}

impl fmt::Display for NoteEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label(false))
    }
}

/// A chord sustained for a whole bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordEvent {
    pub symbol: ChordSymbol,
    pub pitches: Vec<Pitch>,
    pub half_beats: u32,
}

impl ChordEvent {
    pub fn beats(&self) -> f64 {
        self.half_beats as f64 / HALF_BEATS_PER_BEAT as f64
    }
}

/// Notes and chords decoded from one genome. Recomputed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMelody {
    pub notes: Vec<NoteEvent>,
    pub chords: Vec<ChordEvent>,
    pub beats_per_bar: u32,
    /// Spell notes with flats, following the key.
    pub prefer_flats: bool,
}

impl RenderedMelody {
    /// Melody notes grouped by the bar they fall in.
    pub fn bars(&self) -> Vec<Vec<NoteEvent>> {
        let bar_len = self.beats_per_bar * HALF_BEATS_PER_BEAT;
        let mut bars = Vec::with_capacity(self.chords.len());
        let mut current = Vec::new();
        let mut filled = 0;
        for note in &self.notes {
            current.push(*note);
            filled += note.half_beats;
            if filled >= bar_len {
                bars.push(std::mem::take(&mut current));
                filled = 0;
            }
        }
        if !current.is_empty() {
            bars.push(current);
        }
        bars
    }

    pub fn total_beats(&self) -> f64 {
        self.notes.iter().map(NoteEvent::beats).sum()
    }
}

impl fmt::Display for RenderedMelody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (bar, (chord, notes)) in self.chords.iter().zip(self.bars()).enumerate() {
            let line: Vec<String> = notes.iter().map(|n| n.label(self.prefer_flats)).collect();
            writeln!(f, "  bar {} [{}]: {}", bar + 1, chord.symbol, line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::{Pitch, PitchClass};

    #[test]
    fn test_display_spells_notes_like_the_key() {
        let mut melody = RenderedMelody {
            notes: vec![
                NoteEvent { pitch: Pitch::new(PitchClass::new(10), 4), half_beats: 2 },
                NoteEvent { pitch: Pitch::new(PitchClass::new(3), 5), half_beats: 2 },
            ],
            chords: vec![ChordEvent {
                symbol: "Bb".parse().unwrap(),
                pitches: Vec::new(),
                half_beats: 4,
            }],
            beats_per_bar: 2,
            prefer_flats: true,
        };
        assert_eq!(melody.to_string(), "  bar 1 [Bb]: Bb4(1) Eb5(1)\n");

        melody.prefer_flats = false;
        assert_eq!(melody.to_string(), "  bar 1 [Bb]: A#4(1) D#5(1)\n");
    }
}
