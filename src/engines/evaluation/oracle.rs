use super::rating::{RatingPrompt, RatingResponse};
use super::renderer::MelodyRenderer;
use crate::audio::AudioService;
use crate::error::{MelodyError, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

/// Synchronous request/response fitness contract: submit a genome, get a scalar.
///
/// Lower is better.
pub trait FitnessOracle {
    fn evaluate(&mut self, genome: &[u32]) -> Result<f64>;
}

/// Plays each candidate to a listener and turns their 1-5 rating into fitness.
///
/// Rendering and playback failures are fatal and carry the offending genome.
pub struct HumanFitnessOracle<A: AudioService, P: RatingPrompt> {
    renderer: MelodyRenderer,
    audio: A,
    prompt: P,
    output: PathBuf,
    rng: StdRng,
    evaluations: usize,
}

impl<A: AudioService, P: RatingPrompt> HumanFitnessOracle<A, P> {
    pub fn new(
        renderer: MelodyRenderer,
        audio: A,
        prompt: P,
        work_dir: &Path,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            renderer,
            audio,
            prompt,
            output: work_dir.join("candidate.wav"),
            rng,
            evaluations: 0,
        }
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }
}

impl<A: AudioService, P: RatingPrompt> FitnessOracle for HumanFitnessOracle<A, P> {
    fn evaluate(&mut self, genome: &[u32]) -> Result<f64> {
        let melody = self.renderer.decode(genome, &mut self.rng);
        log::debug!("Candidate {:?} decodes to {} notes", genome, melody.notes.len());

        self.audio
            .render(&melody, &self.output)
            .map_err(|e| MelodyError::evaluation(genome, e))?;
        self.prompt.announce("\nPlease rate the following melody:")?;

        loop {
            self.audio
                .play(&self.output)
                .map_err(|e| MelodyError::evaluation(genome, e))?;

            match self.prompt.request_rating()? {
                RatingResponse::Rating(rating) => {
                    self.evaluations += 1;
                    log::info!("Candidate rated {} (fitness {})", rating.value(), rating.fitness());
                    return Ok(rating.fitness());
                }
                RatingResponse::Replay => log::debug!("Replaying candidate"),
            }
        }
    }
}
