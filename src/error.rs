use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

use rand_distr::uniform::Error as UniformError;

/// The result type used across the crate.
pub type Result<T> = std::result::Result<T, MindErr>;

/// The crate's error type.
#[derive(Debug)]
pub enum MindErr {
    /// A vector or grid did not have the length the operation requires.
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// The codec was asked to encode a value that does not fit its width.
    CodeOutOfRange { code: u32, width: usize },
    /// A skill code received from outside the core could not be accepted.
    InvalidSkillCode(String),
    /// A construction or configuration parameter is invalid.
    InvalidInput(&'static str),
    Distribution(UniformError),
    Io(io::Error),
    Json(serde_json::Error),
}

impl Display for MindErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MindErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "size mismatch for {what}: got {got}, expected {expected}"
            ),
            MindErr::CodeOutOfRange { code, width } => write!(
                f,
                "code {code} does not fit in {width} bits, valid range is [0, {})",
                1u64 << width
            ),
            MindErr::InvalidSkillCode(msg) => write!(f, "invalid skill code: {msg}"),
            MindErr::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            MindErr::Distribution(e) => write!(f, "invalid weight distribution: {e}"),
            MindErr::Io(e) => write!(f, "io error: {e}"),
            MindErr::Json(e) => write!(f, "invalid json: {e}"),
        }
    }
}

impl Error for MindErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MindErr::Distribution(e) => Some(e),
            MindErr::Io(e) => Some(e),
            MindErr::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<UniformError> for MindErr {
    fn from(value: UniformError) -> Self {
        Self::Distribution(value)
    }
}

impl From<io::Error> for MindErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for MindErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_mismatch_names_both_lengths() {
        let err = MindErr::SizeMismatch {
            what: "inputs",
            got: 4,
            expected: 5,
        };

        assert_eq!(err.to_string(), "size mismatch for inputs: got 4, expected 5");
    }

    #[test]
    fn out_of_range_reports_valid_range() {
        let err = MindErr::CodeOutOfRange { code: 32, width: 5 };
        assert_eq!(
            err.to_string(),
            "code 32 does not fit in 5 bits, valid range is [0, 32)"
        );
    }

    #[test]
    fn io_errors_keep_their_source() {
        let err = MindErr::from(io::Error::other("boom"));
        assert!(err.source().is_some());
    }
}
