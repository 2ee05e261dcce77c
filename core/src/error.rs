use std::fmt;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VectorError {
    /// `unit`, `normal` or a projection was requested on a zero-length vector.
    DegenerateVector,
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateVector => write!(f, "degenerate vector: magnitude is zero"),
        }
    }
}

impl std::error::Error for VectorError {}

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    Missing {
        key: String,
    },
    Unparsable {
        key: String,
        value: String,
    },
    OutOfRange {
        key: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { key } => write!(f, "missing required option {key}"),
            Self::Unparsable { key, value } => {
                write!(f, "option {key} has an unparsable value: {value:?}")
            }
            Self::OutOfRange {
                key,
                value,
                min,
                max,
            } => write!(f, "option {key}={value} out of range [{min}..={max}]"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug)]
pub enum PersistenceError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "score file {} io failure: {source}", path.display())
            }
            Self::Encode { path, source } => {
                write!(f, "score file {} encode failure: {source}", path.display())
            }
            Self::Decode { path, source } => {
                write!(f, "score file {} is not valid json: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode { source, .. } | Self::Decode { source, .. } => Some(source),
        }
    }
}
