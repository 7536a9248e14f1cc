// MIDI output for decoded melodies.
//
// Writes a Standard MIDI File (format 1): a tempo track, a melody track and a
// chord track on separate channels. One beat is one quarter note.

use crate::error::{MelodyError, Result};
use crate::types::{RenderedMelody, HALF_BEATS_PER_BEAT};
use midly::{
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use std::path::Path;

/// Ticks per quarter note in MIDI output.
const TICKS_PER_QUARTER: u16 = 480;

/// Ticks per half beat.
const TICKS_PER_HALF_BEAT: u32 = TICKS_PER_QUARTER as u32 / HALF_BEATS_PER_BEAT;

const MELODY_CHANNEL: u8 = 0;
const CHORD_CHANNEL: u8 = 1;
const MELODY_VELOCITY: u8 = 90;
const CHORD_VELOCITY: u8 = 60;

#[derive(Debug, Clone, Copy)]
pub struct MidiSettings {
    pub tempo_bpm: u32,
    pub melody_program: u8,
    pub chord_program: u8,
}

impl Default for MidiSettings {
    fn default() -> Self {
        Self {
            tempo_bpm: 120,
            melody_program: 0,
            chord_program: 0,
        }
    }
}

/// Convert a melody to MIDI and write to a file.
pub fn write_midi(melody: &RenderedMelody, settings: &MidiSettings, path: &Path) -> Result<()> {
    let smf = melody_to_smf(melody, settings);
    smf.save(path)
        .map_err(|e| MelodyError::Rendering(format!("failed to write {}: {}", path.display(), e)))
}

/// Convert a melody to an in-memory SMF.
pub fn melody_to_smf(melody: &RenderedMelody, settings: &MidiSettings) -> Smf<'static> {
    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    // Track 0: tempo and meter
    let tempo_microseconds = 60_000_000 / settings.tempo_bpm.max(1);
    let numerator = melody.beats_per_bar.min(u8::MAX as u32) as u8;
    smf.tracks.push(vec![
        meta(0, MetaMessage::Tempo(u24::new(tempo_microseconds))),
        meta(0, MetaMessage::TimeSignature(numerator, 2, 24, 8)),
        meta(0, MetaMessage::EndOfTrack),
    ]);

    let mut melody_track = track_header("Melody", MELODY_CHANNEL, settings.melody_program);
    for note in &melody.notes {
        let key = u7::new(note.pitch.midi());
        melody_track.push(midi(0, MELODY_CHANNEL, MidiMessage::NoteOn { key, vel: u7::new(MELODY_VELOCITY) }));
        melody_track.push(midi(
            note.half_beats * TICKS_PER_HALF_BEAT,
            MELODY_CHANNEL,
            MidiMessage::NoteOff { key, vel: u7::new(0) },
        ));
    }
    melody_track.push(meta(0, MetaMessage::EndOfTrack));
    smf.tracks.push(melody_track);

    let mut chord_track = track_header("Chords", CHORD_CHANNEL, settings.chord_program);
    for chord in &melody.chords {
        for pitch in &chord.pitches {
            chord_track.push(midi(
                0,
                CHORD_CHANNEL,
                MidiMessage::NoteOn { key: u7::new(pitch.midi()), vel: u7::new(CHORD_VELOCITY) },
            ));
        }
        for (i, pitch) in chord.pitches.iter().enumerate() {
            // All tones release together at the end of the bar
            let delta = if i == 0 { chord.half_beats * TICKS_PER_HALF_BEAT } else { 0 };
            chord_track.push(midi(
                delta,
                CHORD_CHANNEL,
                MidiMessage::NoteOff { key: u7::new(pitch.midi()), vel: u7::new(0) },
            ));
        }
    }
    chord_track.push(meta(0, MetaMessage::EndOfTrack));
    smf.tracks.push(chord_track);

    smf
}

fn track_header(name: &'static str, channel: u8, program: u8) -> Track<'static> {
    vec![
        meta(0, MetaMessage::TrackName(name.as_bytes())),
        midi(0, channel, MidiMessage::ProgramChange { program: u7::new(program.min(127)) }),
    ]
}

fn meta(delta: u32, message: MetaMessage<'static>) -> TrackEvent<'static> {
    TrackEvent {
        delta: u28::new(delta),
        kind: TrackEventKind::Meta(message),
    }
}

fn midi(delta: u32, channel: u8, message: MidiMessage) -> TrackEvent<'static> {
    TrackEvent {
        delta: u28::new(delta),
        kind: TrackEventKind::Midi {
            channel: u4::new(channel),
            message,
        },
    }
}
