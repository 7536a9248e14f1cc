use super::evolution_engine::ProgressCallback;
use super::individual::Individual;
use crate::audio::AudioService;
use crate::engines::evaluation::MelodyRenderer;
use crate::error::Result;
use crate::types::RenderedMelody;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

/// Surfaces progress on the console and plays the Hall-of-Fame best after every
/// generation. Purely observational: render or playback failures are logged and
/// the run carries on.
pub struct BestMelodyReporter<A: AudioService> {
    renderer: MelodyRenderer,
    audio: A,
    work_dir: PathBuf,
    play_best: bool,
    rng: StdRng,
    reports: usize,
    failures: usize,
}

impl<A: AudioService> BestMelodyReporter<A> {
    pub fn new(
        renderer: MelodyRenderer,
        audio: A,
        work_dir: &Path,
        play_best: bool,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            renderer,
            audio,
            work_dir: work_dir.to_path_buf(),
            play_best,
            rng,
            reports: 0,
            failures: 0,
        }
    }

    pub fn reports(&self) -> usize {
        self.reports
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    fn play(&mut self, generation: usize, melody: &RenderedMelody) -> Result<()> {
        let path = self.work_dir.join(format!("best_gen_{}.wav", generation + 1));
        self.audio.render(melody, &path)?;
        if self.play_best {
            println!("Playing best melody and chords...");
            self.audio.play(&path)?;
        }
        Ok(())
    }
}

impl<A: AudioService> ProgressCallback for BestMelodyReporter<A> {
    fn on_generation_start(&mut self, generation: usize) {
        println!("\nGeneration {}:", generation + 1);
    }

    fn on_candidate_evaluated(&mut self, candidate: usize, total: usize, fitness: f64) {
        log::debug!("Evaluated {}/{} candidates, fitness {}", candidate, total, fitness);
    }

    fn on_generation_complete(&mut self, generation: usize, best: &Individual, hall_of_fame_size: usize) {
        self.reports += 1;
        let melody = self.renderer.decode(best.genome(), &mut self.rng);
        println!(
            "\nBest melody found (fitness {}, hall of fame size {}):",
            best.fitness().map_or_else(|| "-".to_string(), |f| f.to_string()),
            hall_of_fame_size
        );
        print!("{}", melody);

        if let Err(e) = self.play(generation, &melody) {
            self.failures += 1;
            log::warn!("Could not play the best melody of generation {}: {}", generation + 1, e);
        }
    }
}
