use crate::engines::generation::Individual;
use crate::error::Result;
use crate::theory::{ChordProgression, KeySignature};
use serde::Serialize;
use std::path::Path;

/// One-off report of the best melody of a run. Never read back.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub key: String,
    pub chords: Vec<String>,
    pub genome: Vec<u32>,
    pub fitness: Option<f64>,
    pub completed: bool,
    pub timestamp: String,
}

impl RunSummary {
    pub fn new(
        key: &KeySignature,
        progression: &ChordProgression,
        best: &Individual,
        completed: bool,
    ) -> Self {
        Self {
            key: key.to_string(),
            chords: progression.symbols(),
            genome: best.genome().to_vec(),
            fitness: best.fitness(),
            completed,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
