#![allow(dead_code)]

use melodyevo::audio::AudioService;
use melodyevo::engines::evaluation::MelodyRenderer;
use melodyevo::engines::generation::{Individual, ProgressCallback};
use melodyevo::theory::{ChordProgression, DiatonicResolver};
use melodyevo::types::RenderedMelody;
use melodyevo::{MelodyError, Result};
use std::path::{Path, PathBuf};

/// Audio service that records calls instead of producing sound.
#[derive(Default)]
pub struct RecordingAudio {
    pub renders: Vec<(PathBuf, RenderedMelody)>,
    pub plays: Vec<PathBuf>,
    pub fail_render: bool,
    pub fail_play: bool,
}

impl AudioService for RecordingAudio {
    fn render(&mut self, melody: &RenderedMelody, output: &Path) -> Result<()> {
        if self.fail_render {
            return Err(MelodyError::Rendering("synth unavailable".to_string()));
        }
        self.renders.push((output.to_path_buf(), melody.clone()));
        Ok(())
    }

    fn play(&mut self, path: &Path) -> Result<()> {
        if self.fail_play {
            return Err(MelodyError::Playback("no audio device".to_string()));
        }
        self.plays.push(path.to_path_buf());
        Ok(())
    }
}

/// Records what the engine reports each generation.
#[derive(Default)]
pub struct RecordingCallback {
    pub started: Vec<usize>,
    pub evaluated: usize,
    pub best_fitness: Vec<f64>,
    pub best_genomes: Vec<Vec<u32>>,
}

impl ProgressCallback for RecordingCallback {
    fn on_generation_start(&mut self, generation: usize) {
        self.started.push(generation);
    }

    fn on_candidate_evaluated(&mut self, _candidate: usize, _total: usize, _fitness: f64) {
        self.evaluated += 1;
    }

    fn on_generation_complete(&mut self, _generation: usize, best: &Individual, _size: usize) {
        self.best_fitness.push(best.fitness().unwrap_or(f64::INFINITY));
        self.best_genomes.push(best.genome().to_vec());
    }
}

pub fn renderer(key: &str, chords: &str, beats_per_bar: u32) -> MelodyRenderer {
    MelodyRenderer::new(
        &DiatonicResolver::default(),
        key.parse().unwrap(),
        ChordProgression::parse_list(chords).unwrap(),
        beats_per_bar,
        vec![1, 2, 3, 4],
    )
    .unwrap()
}
