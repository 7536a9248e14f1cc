use crate::error::Result;
use crate::types::RenderedMelody;
use std::path::Path;

/// Turns decoded melodies into audio and plays it back.
///
/// Renders must be deterministic for identical note and chord input.
pub trait AudioService {
    /// Render melody and chords together into a playable file at `output`.
    fn render(&mut self, melody: &RenderedMelody, output: &Path) -> Result<()>;

    /// Play a rendered file, blocking until playback completes.
    fn play(&mut self, path: &Path) -> Result<()>;
}
