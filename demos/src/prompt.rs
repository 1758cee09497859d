//! Console input for the interactive tutorials.
//!
//! Tutorials never read stdin directly. They take an [`InputSource`] so
//! tests can script answers and batch runs can skip the questions.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Where a tutorial gets its answers from.
pub trait InputSource {
    /// Show `prompt` and return the next line, or `None` when no input is
    /// available.
    fn read_line(&mut self, prompt: &str) -> Option<String>;
}

/// Reads answers from the terminal.
#[derive(Debug, Default)]
pub struct StdinSource;

impl InputSource for StdinSource {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        io::stdout().flush().ok()?;
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

/// Replays a fixed list of answers, then behaves like [`NonInteractive`].
#[derive(Debug, Default)]
pub struct ScriptedSource {
    lines: VecDeque<String>,
}

impl ScriptedSource {
    /// Create a source that answers with `lines` in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl InputSource for ScriptedSource {
    fn read_line(&mut self, _prompt: &str) -> Option<String> {
        self.lines.pop_front()
    }
}

/// Never has input. Every question falls back to its default.
#[derive(Debug, Default)]
pub struct NonInteractive;

impl InputSource for NonInteractive {
    fn read_line(&mut self, _prompt: &str) -> Option<String> {
        None
    }
}

/// How an answer to [`read_count`] was turned into a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountSource {
    /// The answer parsed and was in range.
    Answered,
    /// No input was available.
    NoInput,
    /// The answer was not a whole number.
    Unparsable,
    /// The answer was above the maximum.
    ClampedHigh,
    /// The answer was below the minimum.
    ClampedLow,
}

/// Result of [`read_count`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountAnswer {
    /// The number to use.
    pub value: u32,
    /// How `value` was obtained.
    pub source: CountSource,
}

impl CountAnswer {
    /// Message to show when the answer was not taken as given.
    pub fn note(&self, default: u32, min: u32, max: u32) -> Option<String> {
        match self.source {
            CountSource::Answered => None,
            CountSource::NoInput => Some(format!("No input available, using {default}.")),
            CountSource::Unparsable => Some(format!("That is a weird number. Using {default}.")),
            CountSource::ClampedHigh => Some(format!("Too many! Using the maximum of {max}.")),
            CountSource::ClampedLow => Some(format!("Too few! Using the minimum of {min}.")),
        }
    }
}

/// Ask for a whole number in `[min, max]`.
///
/// Missing or unparsable answers give `default`; out-of-range answers are
/// clamped. Negative answers count as below the minimum.
pub fn read_count(
    source: &mut dyn InputSource,
    prompt: &str,
    default: u32,
    min: u32,
    max: u32,
) -> CountAnswer {
    let Some(line) = source.read_line(prompt) else {
        return CountAnswer {
            value: default,
            source: CountSource::NoInput,
        };
    };
    let Ok(n) = line.trim().parse::<i64>() else {
        return CountAnswer {
            value: default,
            source: CountSource::Unparsable,
        };
    };
    if n > i64::from(max) {
        CountAnswer {
            value: max,
            source: CountSource::ClampedHigh,
        }
    } else if n < i64::from(min) {
        CountAnswer {
            value: min,
            source: CountSource::ClampedLow,
        }
    } else {
        CountAnswer {
            value: n as u32,
            source: CountSource::Answered,
        }
    }
}

/// Wait for the user to press enter. Returns immediately without input.
pub fn pause(source: &mut dyn InputSource, prompt: &str) {
    let _ = source.read_line(prompt);
}
