mod common;

use common::renderer;
use melodyevo::engines::generation::operators::random_genome;
use melodyevo::theory::{DiatonicResolver, PitchResolver};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_single_bar_c_major_scenario() {
    let renderer = renderer("C major", "C", 4);
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..20 {
        let melody = renderer.decode(&[0, 2, 4, 0], &mut rng);

        assert_eq!(melody.total_beats(), 4.0);
        let allowed = ["C4", "E4", "G4"];
        for note in &melody.notes {
            assert!(allowed.contains(&note.pitch.to_string().as_str()), "unexpected {}", note);
        }
        // The first note always starts on beat 0 and reads gene 0
        assert_eq!(melody.notes[0].pitch.to_string(), "C4");

        assert_eq!(melody.chords.len(), 1);
        let chord = &melody.chords[0];
        assert_eq!(chord.beats(), 4.0);
        let tones: Vec<String> = chord.pitches.iter().map(ToString::to_string).collect();
        assert_eq!(tones, vec!["C3", "E3", "G3"]);
    }
}

#[test]
fn test_every_bar_fills_exactly() {
    let renderer = renderer("a", "Am Dm E Am", 8);
    let mut rng = StdRng::seed_from_u64(23);

    for _ in 0..100 {
        let genome = random_genome(renderer.genome_length(), 0..8, &mut rng);
        let melody = renderer.decode(&genome, &mut rng);
        assert_eq!(melody.chords.len(), 4);
        for bar in melody.bars() {
            let beats: f64 = bar.iter().map(|n| n.beats()).sum();
            assert_eq!(beats, 8.0);
            assert!(bar.iter().all(|n| n.beats() > 0.0 && n.beats() <= 2.0));
        }
    }
}

#[test]
fn test_arbitrary_integers_never_fail() {
    let renderer = renderer("Eb", "Eb Ab Bb Eb", 4);
    let scale = DiatonicResolver::default().scale_pitches(renderer.key());
    let mut rng = StdRng::seed_from_u64(31);

    for _ in 0..100 {
        let genome: Vec<u32> = (0..renderer.genome_length()).map(|_| rng.gen()).collect();
        let melody = renderer.decode(&genome, &mut rng);
        assert_eq!(melody.total_beats(), 16.0);
        assert!(melody.notes.iter().all(|n| scale.contains(&n.pitch)));
    }
}
