//! Interactive selection of the key and chord progression before a run.

use crate::engines::evaluation::rating::read_answer_line;
use crate::error::{MelodyError, Result};
use crate::theory::{ChordProgression, ChordSymbol, KeySignature, PitchResolver};
use std::io::{BufRead, StdinLock, Stdout, Write};

/// Chords offered for a key, optionally without the last (VII) chord.
pub fn offered_chords<P: PitchResolver>(
    resolver: &P,
    key: &KeySignature,
    drop_last: bool,
) -> Vec<ChordSymbol> {
    let mut chords = resolver.diatonic_chords(key);
    if drop_last {
        chords.pop();
    }
    chords
}

/// Parses chord symbols and checks them against the offered chords and bar count.
pub fn resolve_progression<S: AsRef<str>>(
    symbols: &[S],
    key: &KeySignature,
    offered: &[ChordSymbol],
    number_of_bars: usize,
) -> Result<ChordProgression> {
    let chords = symbols
        .iter()
        .map(|s| s.as_ref().parse::<ChordSymbol>())
        .collect::<Result<Vec<_>>>()?;

    for chord in &chords {
        if !offered.contains(chord) {
            return Err(MelodyError::ChordNotInKey {
                chord: chord.to_string(),
                key: key.to_string(),
            });
        }
    }
    if chords.len() != number_of_bars {
        return Err(MelodyError::Configuration(format!(
            "expected {} chords (one per bar), got {}",
            number_of_bars,
            chords.len()
        )));
    }
    Ok(ChordProgression::new(chords))
}

pub struct SetupPrompt<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> SetupPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        read_answer_line(&mut self.input)?.ok_or(MelodyError::InputClosed)
    }

    pub fn prompt_key(&mut self) -> Result<KeySignature> {
        loop {
            let answer = self.read_answer("Enter a key: ")?;
            match answer.parse::<KeySignature>() {
                Ok(key) => return Ok(key),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    pub fn prompt_chords(
        &mut self,
        key: &KeySignature,
        offered: &[ChordSymbol],
        number_of_bars: usize,
    ) -> Result<ChordProgression> {
        let names: Vec<String> = offered.iter().map(ToString::to_string).collect();
        writeln!(self.output, "Chords in {}: [{}]", key, names.join(", "))?;
        loop {
            let question = format!(
                "Enter {} of the above chords separated by a space: ",
                number_of_bars
            );
            let answer = self.read_answer(&question)?;
            let symbols: Vec<&str> = answer.split_whitespace().collect();
            match resolve_progression(&symbols, key, offered, number_of_bars) {
                Ok(progression) => return Ok(progression),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }
}

impl SetupPrompt<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}
