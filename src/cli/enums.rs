//! CLI enum types for output format and orientation correction.

use clap::ValueEnum;

use crate::config::OutputFormat;
use crate::frame::Orientation;

/// How committed scenes are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Output {
    #[default]
    Log,
    Json,
}

impl From<Output> for OutputFormat {
    fn from(o: Output) -> Self {
        match o {
            Output::Log => OutputFormat::Log,
            Output::Json => OutputFormat::Json,
        }
    }
}

/// Correction applied to front-camera frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Correction {
    None,
    Mirrored,
    LeftMirrored,
}

impl From<Correction> for Orientation {
    fn from(c: Correction) -> Self {
        match c {
            Correction::None => Orientation::Up,
            Correction::Mirrored => Orientation::UpMirrored,
            Correction::LeftMirrored => Orientation::LeftMirrored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_conversion() {
        assert_eq!(OutputFormat::from(Output::Json), OutputFormat::Json);
        assert_eq!(OutputFormat::from(Output::default()), OutputFormat::Log);
    }

    #[test]
    fn test_correction_conversion() {
        assert_eq!(Orientation::from(Correction::None), Orientation::Up);
        assert_eq!(
            Orientation::from(Correction::LeftMirrored),
            Orientation::LeftMirrored
        );
    }
}
