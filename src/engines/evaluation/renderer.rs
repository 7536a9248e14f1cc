use crate::engines::generation::gene_consumer::GeneConsumer;
use crate::error::{MelodyError, Result};
use crate::theory::{ChordProgression, KeySignature, Pitch, PitchResolver};
use crate::types::{ChordEvent, NoteEvent, RenderedMelody, HALF_BEATS_PER_BEAT};
use rand::Rng;

/// Decodes genomes into bar-aligned melody notes over a fixed chord progression.
///
/// Scale pitches and chord tones are resolved once at construction, so an
/// unresolvable chord is reported before any genome is decoded.
#[derive(Debug, Clone)]
pub struct MelodyRenderer {
    key: KeySignature,
    progression: ChordProgression,
    beats_per_bar: u32,
    durations: Vec<u32>,
    scale: Vec<Pitch>,
    chord_tones: Vec<Vec<Pitch>>,
}

impl MelodyRenderer {
    /// `durations` are the candidate note lengths in half beats.
    pub fn new<P: PitchResolver>(
        resolver: &P,
        key: KeySignature,
        progression: ChordProgression,
        beats_per_bar: u32,
        durations: Vec<u32>,
    ) -> Result<Self> {
        if progression.is_empty() {
            return Err(MelodyError::Configuration("chord progression is empty".to_string()));
        }
        if beats_per_bar == 0 {
            return Err(MelodyError::Configuration("beats per bar must be at least 1".to_string()));
        }
        if durations.is_empty() || durations.contains(&0) {
            return Err(MelodyError::Configuration(
                "note durations must be non-empty and positive".to_string(),
            ));
        }

        let scale = resolver.scale_pitches(&key);
        if scale.is_empty() {
            return Err(MelodyError::Configuration(format!("{} has no scale pitches", key)));
        }
        let chord_tones = progression
            .chords()
            .iter()
            .map(|chord| {
                let tones = resolver.chord_tones(chord, &key)?;
                if tones.is_empty() {
                    return Err(MelodyError::InvalidChordSymbol(chord.to_string()));
                }
                Ok(tones)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            key,
            progression,
            beats_per_bar,
            durations,
            scale,
            chord_tones,
        })
    }

    pub fn key(&self) -> &KeySignature {
        &self.key
    }

    pub fn progression(&self) -> &ChordProgression {
        &self.progression
    }

    pub fn beats_per_bar(&self) -> u32 {
        self.beats_per_bar
    }

    pub fn scale_size(&self) -> usize {
        self.scale.len()
    }

    pub fn number_of_bars(&self) -> usize {
        self.progression.len()
    }

    pub fn genome_length(&self) -> usize {
        self.number_of_bars() * self.beats_per_bar as usize
    }

    /// Decode a genome. Every bar sums to exactly `beats_per_bar` beats.
    ///
    /// Each note reads the gene of the beat slot it starts in (gene values wrap
    /// modulo the scale size) and draws its length from the candidate durations,
    /// clamped to what is left of the bar. The duration draw is the only
    /// nondeterminism; pass a seeded rng for reproducible output.
    pub fn decode<R: Rng>(&self, genome: &[u32], rng: &mut R) -> RenderedMelody {
        let bar_half_beats = self.beats_per_bar * HALF_BEATS_PER_BEAT;
        let mut consumer = GeneConsumer::new(genome);
        let mut notes = Vec::new();
        let mut chords = Vec::with_capacity(self.progression.len());

        for (bar, chord) in self.progression.chords().iter().enumerate() {
            let mut remaining = bar_half_beats;
            while remaining > 0 {
                let elapsed_beats = (bar_half_beats - remaining) / HALF_BEATS_PER_BEAT;
                consumer.seek(bar * self.beats_per_bar as usize + elapsed_beats as usize);
                let pitch = self.scale[consumer.choose(self.scale.len())];

                let drawn = self.durations[rng.gen_range(0..self.durations.len())];
                let half_beats = drawn.min(remaining);
                notes.push(NoteEvent { pitch, half_beats });
                remaining -= half_beats;
            }

            chords.push(ChordEvent {
                symbol: *chord,
                pitches: self.chord_tones[bar].clone(),
                half_beats: bar_half_beats,
            });
        }

        RenderedMelody {
            notes,
            chords,
            beats_per_bar: self.beats_per_bar,
            prefer_flats: self.key.prefer_flats(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::DiatonicResolver;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn renderer(chords: &str, beats_per_bar: u32) -> MelodyRenderer {
        MelodyRenderer::new(
            &DiatonicResolver::default(),
            "C".parse().unwrap(),
            ChordProgression::parse_list(chords).unwrap(),
            beats_per_bar,
            vec![1, 2, 3, 4],
        )
        .unwrap()
    }

    #[test]
    fn test_bars_sum_to_beats_per_bar() {
        let renderer = renderer("C G Am F", 8);
        let mut rng = StdRng::seed_from_u64(17);
        for seed in 0..50u32 {
            let genome: Vec<u32> = (0..32).map(|i| i * 7 + seed).collect();
            let melody = renderer.decode(&genome, &mut rng);
            assert_eq!(melody.chords.len(), 4);
            let bars = melody.bars();
            assert_eq!(bars.len(), 4);
            for bar in bars {
                let half_beats: u32 = bar.iter().map(|n| n.half_beats).sum();
                assert_eq!(half_beats, 16);
            }
        }
    }

    #[test]
    fn test_out_of_range_genes_wrap() {
        let renderer = renderer("C", 4);
        let mut rng = StdRng::seed_from_u64(2);
        let melody = renderer.decode(&[8, 9, u32::MAX, 1_000_001], &mut rng);
        let scale = DiatonicResolver::default().scale_pitches(renderer.key());
        assert!(melody.notes.iter().all(|n| scale.contains(&n.pitch)));
        assert_eq!(melody.notes[0].pitch, scale[0]);
    }

    #[test]
    fn test_short_and_empty_genomes_decode() {
        let renderer = renderer("C G", 4);
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(renderer.decode(&[], &mut rng).total_beats(), 8.0);
        assert_eq!(renderer.decode(&[3], &mut rng).total_beats(), 8.0);
    }

    #[test]
    fn test_first_note_reads_first_gene_of_each_bar() {
        let renderer = renderer("C F", 4);
        let mut rng = StdRng::seed_from_u64(8);
        let genome = [2, 0, 0, 0, 5, 0, 0, 0];
        let melody = renderer.decode(&genome, &mut rng);
        let bars = melody.bars();
        assert_eq!(bars[0][0].pitch.to_string(), "E4");
        assert_eq!(bars[1][0].pitch.to_string(), "A4");
    }

    #[test]
    fn test_chord_track_sustains_whole_bar() {
        let renderer = renderer("C G", 3);
        let melody = renderer.decode(&[0; 6], &mut StdRng::seed_from_u64(0));
        assert!(melody.chords.iter().all(|c| c.beats() == 3.0));
        assert_eq!(melody.chords[1].symbol.to_string(), "G");
        assert_eq!(melody.chords[1].pitches.len(), 3);
    }

    #[test]
    fn test_flat_keys_print_flat_note_names() {
        let renderer = MelodyRenderer::new(
            &DiatonicResolver::default(),
            "F".parse().unwrap(),
            ChordProgression::parse_list("Bb").unwrap(),
            1,
            vec![2],
        )
        .unwrap();
        let melody = renderer.decode(&[3], &mut StdRng::seed_from_u64(0));
        assert!(melody.prefer_flats);
        assert_eq!(melody.to_string(), "  bar 1 [Bb]: Bb4(1)\n");
    }

    #[test]
    fn test_rejects_empty_progression() {
        let result = MelodyRenderer::new(
            &DiatonicResolver::default(),
            "C".parse().unwrap(),
            ChordProgression::new(Vec::new()),
            4,
            vec![1, 2],
        );
        assert!(matches!(result, Err(MelodyError::Configuration(_))));
    }
}
