use super::chord::{ChordQuality, ChordSymbol};
use super::key::KeySignature;
use super::pitch::Pitch;
use crate::error::Result;

/// Resolves keys and chord symbols to concrete pitches.
pub trait PitchResolver {
    /// Ordered scale pitches usable as melody notes. Genes index into this list.
    fn scale_pitches(&self, key: &KeySignature) -> Vec<Pitch>;

    /// Concrete chord tones for a chord symbol in the given key.
    fn chord_tones(&self, chord: &ChordSymbol, key: &KeySignature) -> Result<Vec<Pitch>>;

    /// Triads built on each degree of the key, I through VII.
    fn diatonic_chords(&self, key: &KeySignature) -> Vec<ChordSymbol>;
}

/// Diatonic resolver: melody spans one octave from the tonic in octave 4,
/// chords are voiced in root position from octave 3.
#[derive(Debug, Clone, Copy)]
pub struct DiatonicResolver {
    melody_octave: i8,
    chord_octave: i8,
}

impl DiatonicResolver {
    pub fn new(melody_octave: i8, chord_octave: i8) -> Self {
        Self {
            melody_octave,
            chord_octave,
        }
    }
}

impl Default for DiatonicResolver {
    fn default() -> Self {
        Self::new(4, 3)
    }
}

impl PitchResolver for DiatonicResolver {
    fn scale_pitches(&self, key: &KeySignature) -> Vec<Pitch> {
        let tonic = Pitch::new(key.tonic(), self.melody_octave);
        key.mode()
            .intervals()
            .iter()
            .map(|&i| tonic.transpose(i))
            .chain(std::iter::once(tonic.transpose(12)))
            .collect()
    }

    fn chord_tones(&self, chord: &ChordSymbol, _key: &KeySignature) -> Result<Vec<Pitch>> {
        let root = Pitch::new(chord.root(), self.chord_octave);
        Ok(chord
            .quality()
            .intervals()
            .iter()
            .map(|&i| root.transpose(i))
            .collect())
    }

    fn diatonic_chords(&self, key: &KeySignature) -> Vec<ChordSymbol> {
        let classes = key.scale_classes();
        (0..classes.len())
            .map(|degree| {
                let root = classes[degree];
                let third = classes[(degree + 2) % classes.len()];
                let fifth = classes[(degree + 4) % classes.len()];
                let third_gap = (third.semitone() + 12 - root.semitone()) % 12;
                let fifth_gap = (fifth.semitone() + 12 - root.semitone()) % 12;
                let quality = match (third_gap, fifth_gap) {
                    (4, 8) => ChordQuality::Augmented,
                    (4, _) => ChordQuality::Major,
                    (3, 6) => ChordQuality::Diminished,
                    _ => ChordQuality::Minor,
                };
                ChordSymbol::new(root, quality).spelled_with_flats(key.prefer_flats())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(chords: &[ChordSymbol]) -> Vec<String> {
        chords.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_scale_pitches_span_octave() {
        let key: KeySignature = "C".parse().unwrap();
        let pitches = DiatonicResolver::default().scale_pitches(&key);
        let midi: Vec<u8> = pitches.iter().map(|p| p.midi()).collect();
        assert_eq!(midi, vec![60, 62, 64, 65, 67, 69, 71, 72]);
    }

    #[test]
    fn test_chord_tones_root_position() {
        let key: KeySignature = "C".parse().unwrap();
        let resolver = DiatonicResolver::default();
        let c = resolver.chord_tones(&"C".parse().unwrap(), &key).unwrap();
        assert_eq!(c.iter().map(|p| p.midi()).collect::<Vec<_>>(), vec![48, 52, 55]);
        let am = resolver.chord_tones(&"Am".parse().unwrap(), &key).unwrap();
        assert_eq!(am.iter().map(ToString::to_string).collect::<Vec<_>>(), vec!["A3", "C4", "E4"]);
    }

    #[test]
    fn test_diatonic_chords() {
        let resolver = DiatonicResolver::default();
        let c_major: KeySignature = "C".parse().unwrap();
        assert_eq!(
            names(&resolver.diatonic_chords(&c_major)),
            vec!["C", "Dm", "Em", "F", "G", "Am", "Bdim"]
        );
        let d_minor: KeySignature = "d".parse().unwrap();
        assert_eq!(
            names(&resolver.diatonic_chords(&d_minor)),
            vec!["Dm", "Edim", "F", "Gm", "Am", "Bb", "C"]
        );
    }
}
