//! Value parsers for compound command-line arguments.

use pizza_core::{FlourInput, parse_optional};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ArgError {
    #[error("expected W:GRAMS (either side may be empty), got `{0}`")]
    FlourFormat(String),

    #[error("expected WIDTHxLENGTH in cm, e.g. 30x40, got `{0}`")]
    PanFormat(String),

    #[error("pan sides must be positive numbers, got `{0}`")]
    PanSize(String),
}

/// One `--flour W:GRAMS` entry. Empty or unparsable sides are unset.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlourArg(pub FlourInput);

impl FromStr for FlourArg {
    type Err = ArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, grams) = s
            .split_once(':')
            .ok_or_else(|| ArgError::FlourFormat(s.to_string()))?;
        Ok(FlourArg(FlourInput::from_text(w, grams)))
    }
}

/// `--pan WIDTHxLENGTH`, in cm.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanSize {
    pub width_cm: f64,
    pub length_cm: f64,
}

impl FromStr for PanSize {
    type Err = ArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, l) = s
            .split_once(['x', 'X', '*'])
            .ok_or_else(|| ArgError::PanFormat(s.to_string()))?;
        match (parse_optional(w), parse_optional(l)) {
            (Some(width_cm), Some(length_cm)) if width_cm > 0.0 && length_cm > 0.0 => {
                Ok(PanSize {
                    width_cm,
                    length_cm,
                })
            }
            _ => Err(ArgError::PanSize(s.to_string())),
        }
    }
}
