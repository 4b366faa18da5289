use std::{fmt, io};

#[derive(Debug)]
pub enum SimError {
    /// Malformed input line (1-based line number).
    InputFormat { line: usize, reason: String },
    Io(io::Error),
    Configuration(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputFormat { line, reason } => {
                write!(f, "wrong input format on line {line}: {reason}")
            }
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Configuration(reason) => write!(f, "invalid configuration: {reason}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SimError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
