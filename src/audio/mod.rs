pub mod service;
pub mod midi;
pub mod synth;

pub use service::AudioService;
pub use midi::{write_midi, MidiSettings};
pub use synth::FluidSynthService;
