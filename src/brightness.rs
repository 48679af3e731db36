//! Brightness request handling
//!
//! Turns the user's request (command-line argument or one interactive line)
//! into a [`BrightnessLevel`] within the range the compositor accepts.

use crate::error::{Result, SdrBoostError};
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Lowest level the boost accepts (no boost)
pub const MIN_BRIGHTNESS: f64 = 1.0;

/// Highest level the boost accepts
pub const MAX_BRIGHTNESS: f64 = 6.0;

/// Prompt shown when no argument was given
pub const PROMPT: &str = "Enter desired brightness from 1.0 to 6.0:";

/// A brightness value already clamped to `[MIN_BRIGHTNESS, MAX_BRIGHTNESS]`
///
/// The scale is whatever the compositor's private entry point makes of it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct BrightnessLevel(f64);

impl BrightnessLevel {
    /// Build a level from any request, clamping it into range
    pub fn clamped(requested: f64) -> Self {
        Self(clamp_brightness(requested))
    }

    /// The clamped value
    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for BrightnessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Clamp a requested brightness into `[MIN_BRIGHTNESS, MAX_BRIGHTNESS]`
///
/// NaN maps to `MIN_BRIGHTNESS`.
pub fn clamp_brightness(requested: f64) -> f64 {
    if requested.is_nan() {
        return MIN_BRIGHTNESS;
    }
    requested.clamp(MIN_BRIGHTNESS, MAX_BRIGHTNESS)
}

/// Parse a brightness request
///
/// Surrounding whitespace is ignored. NaN and infinities are rejected.
pub fn parse_brightness(input: &str) -> Result<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| SdrBoostError::InputParse {
            input: input.trim_end_matches(['\r', '\n']).to_string(),
        })
}

/// Where the brightness request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestSource {
    /// Positional command-line argument
    Argument,
    /// Line read from standard input after prompting
    Interactive,
}

/// Resolve the brightness request from the argument or, if absent, one
/// interactive line
///
/// On a parse failure the diagnostic is written to `out` and
/// [`SdrBoostError::InputParse`] is returned; the caller must exit without
/// touching any monitor.
pub fn read_brightness<R: BufRead, W: Write>(
    argument: Option<&str>,
    input: &mut R,
    out: &mut W,
) -> Result<f64> {
    let (raw, source) = if let Some(arg) = argument {
        (arg.to_string(), RequestSource::Argument)
    } else {
        writeln!(out, "{PROMPT}")?;
        out.flush()?;
        // Bytes that are not UTF-8 become U+FFFD, which never parses
        let mut line = Vec::new();
        input.read_until(b'\n', &mut line)?;
        (
            String::from_utf8_lossy(&line).into_owned(),
            RequestSource::Interactive,
        )
    };

    debug!("Brightness request from {:?}: {:?}", source, raw);

    match parse_brightness(&raw) {
        Ok(value) => {
            info!("Parsed brightness request {}", value);
            Ok(value)
        }
        Err(e) => {
            match source {
                RequestSource::Argument => writeln!(out, "Cannot parse, exiting: {raw}")?,
                RequestSource::Interactive => writeln!(out, "Cannot parse input, exiting")?,
            }
            Err(e)
        }
    }
}
