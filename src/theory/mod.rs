pub mod pitch;
pub mod key;
pub mod chord;
pub mod resolver;

pub use pitch::{Pitch, PitchClass};
pub use key::{KeySignature, Mode};
pub use chord::{ChordProgression, ChordQuality, ChordSymbol};
pub use resolver::{DiatonicResolver, PitchResolver};
