use super::midi::{write_midi, MidiSettings};
use super::service::AudioService;
use crate::config::AudioConfig;
use crate::error::{MelodyError, Result};
use crate::types::RenderedMelody;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Renders through an external SoundFont synthesizer (FluidSynth by default) and
/// plays through an external player command.
#[derive(Debug, Clone)]
pub struct FluidSynthService {
    soundfont: Option<PathBuf>,
    synth_command: String,
    player_command: String,
    player_args: Vec<String>,
    sample_rate: u32,
    midi: MidiSettings,
}

impl FluidSynthService {
    pub fn from_config(config: &AudioConfig) -> Self {
        Self {
            soundfont: config.soundfont_path.clone(),
            synth_command: config.synth_command.clone(),
            player_command: config.player_command.clone(),
            player_args: config.player_args.clone(),
            sample_rate: config.sample_rate,
            midi: MidiSettings {
                tempo_bpm: config.tempo_bpm,
                melody_program: config.melody_program,
                chord_program: config.chord_program,
            },
        }
    }

    fn soundfont(&self) -> Result<&Path> {
        let path = self.soundfont.as_deref().ok_or_else(|| {
            MelodyError::Rendering("no soundfont configured (set audio.soundfont_path)".to_string())
        })?;
        if !path.is_file() {
            return Err(MelodyError::Rendering(format!(
                "soundfont {} does not exist",
                path.display()
            )));
        }
        Ok(path)
    }
}

impl AudioService for FluidSynthService {
    fn render(&mut self, melody: &RenderedMelody, output: &Path) -> Result<()> {
        let soundfont = self.soundfont()?;
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let scratch = ScratchFile::new(output.with_extension("mid"));
        write_midi(melody, &self.midi, scratch.path())?;

        log::debug!("Synthesizing {} -> {}", scratch.path().display(), output.display());
        let status = Command::new(&self.synth_command)
            .arg("-ni")
            .arg("-q")
            .arg("-F")
            .arg(output)
            .arg("-r")
            .arg(self.sample_rate.to_string())
            .arg(soundfont)
            .arg(scratch.path())
            .stdout(Stdio::null())
            .status()
            .map_err(|e| {
                MelodyError::Rendering(format!("failed to start {}: {}", self.synth_command, e))
            })?;

        if !status.success() {
            return Err(MelodyError::Rendering(format!(
                "{} exited with {}",
                self.synth_command, status
            )));
        }
        Ok(())
    }

    fn play(&mut self, path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(MelodyError::Playback(format!("{} does not exist", path.display())));
        }
        let status = Command::new(&self.player_command)
            .args(&self.player_args)
            .arg(path)
            .status()
            .map_err(|e| {
                MelodyError::Playback(format!("failed to start {}: {}", self.player_command, e))
            })?;

        if !status.success() {
            return Err(MelodyError::Playback(format!(
                "{} exited with {}",
                self.player_command, status
            )));
        }
        Ok(())
    }
}

/// Working file removed when dropped, whichever way the render exits.
struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                log::warn!("Could not remove {}: {}", self.path.display(), e);
            }
        }
    }
}
