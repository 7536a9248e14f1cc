use crate::error::{MelodyError, Result};
use std::io::{BufRead, StdinLock, Stdout, Write};
use std::str::FromStr;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A listener's verdict on a candidate, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: i64) -> Result<Self> {
        if value < MIN_RATING as i64 || value > MAX_RATING as i64 {
            return Err(MelodyError::InvalidRating(format!(
                "{} is outside {}-{}",
                value, MIN_RATING, MAX_RATING
            )));
        }
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Minimization fitness: a top rating of 5 maps to 1.
    pub fn fitness(self) -> f64 {
        (MAX_RATING + 1 - self.0) as f64
    }
}

impl FromStr for Rating {
    type Err = MelodyError;

    fn from_str(text: &str) -> Result<Self> {
        let text = text.trim();
        let value: i64 = text.parse().map_err(|_| {
            MelodyError::InvalidRating(format!(
                "{:?} is not a whole number between {} and {}",
                text, MIN_RATING, MAX_RATING
            ))
        })?;
        Rating::new(value)
    }
}

/// Reads one line, replacing bytes that are not UTF-8. `None` at end of input.
pub(crate) fn read_answer_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingResponse {
    Rating(Rating),
    /// Hear the current candidate again before rating.
    Replay,
}

/// Source of human ratings.
pub trait RatingPrompt {
    /// Show a line of text to the listener.
    fn announce(&mut self, message: &str) -> Result<()>;

    /// Block until a valid rating or a replay request arrives.
    fn request_rating(&mut self) -> Result<RatingResponse>;
}

/// Line-oriented prompt that re-asks until the answer is valid.
pub struct ConsoleRatingPrompt<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleRatingPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl ConsoleRatingPrompt<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> RatingPrompt for ConsoleRatingPrompt<R, W> {
    fn announce(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    fn request_rating(&mut self) -> Result<RatingResponse> {
        loop {
            write!(
                self.output,
                "Enter rating ({}-{}, r to replay): ",
                MIN_RATING, MAX_RATING
            )?;
            self.output.flush()?;

            let line = read_answer_line(&mut self.input)?.ok_or(MelodyError::InputClosed)?;
            let answer = line.as_str();
            if answer.eq_ignore_ascii_case("r") || answer.eq_ignore_ascii_case("replay") {
                return Ok(RatingResponse::Replay);
            }
            match answer.parse::<Rating>() {
                Ok(rating) => return Ok(RatingResponse::Rating(rating)),
                Err(e) => {
                    log::debug!("Rejected rating input: {}", e);
                    writeln!(self.output, "{}", e)?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_rating_maps_to_minimization_fitness() {
        assert_eq!(Rating::new(5).unwrap().fitness(), 1.0);
        assert_eq!(Rating::new(1).unwrap().fitness(), 5.0);
        assert_eq!("3".parse::<Rating>().unwrap().value(), 3);
    }

    #[test]
    fn test_rejects_out_of_range_and_non_numeric() {
        for text in ["0", "6", "abc", "", "2.5", "-1"] {
            assert!(
                matches!(text.parse::<Rating>(), Err(MelodyError::InvalidRating(_))),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_prompt_reprompts_until_valid() {
        let input = Cursor::new("0\n6\nabc\n4\n");
        let mut prompt = ConsoleRatingPrompt::new(input, Vec::new());
        let response = prompt.request_rating().unwrap();
        assert_eq!(response, RatingResponse::Rating(Rating::new(4).unwrap()));

        let output = String::from_utf8(prompt.into_output()).unwrap();
        assert_eq!(output.matches("Enter rating").count(), 4);
        assert_eq!(output.matches("Invalid rating").count(), 3);
    }

    #[test]
    fn test_prompt_reprompts_after_non_utf8_line() {
        let input = Cursor::new(b"\xff\xfe\n4\n".to_vec());
        let mut prompt = ConsoleRatingPrompt::new(input, Vec::new());
        let response = prompt.request_rating().unwrap();
        assert_eq!(response, RatingResponse::Rating(Rating::new(4).unwrap()));

        let output = String::from_utf8(prompt.into_output()).unwrap();
        assert_eq!(output.matches("Enter rating").count(), 2);
        assert_eq!(output.matches("Invalid rating").count(), 1);
    }

    #[test]
    fn test_prompt_replay_and_closed_input() {
        let mut prompt = ConsoleRatingPrompt::new(Cursor::new("R\n"), Vec::new());
        assert_eq!(prompt.request_rating().unwrap(), RatingResponse::Replay);
        assert!(matches!(prompt.request_rating(), Err(MelodyError::InputClosed)));
    }
}
