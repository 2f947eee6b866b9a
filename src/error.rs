use core::fmt;

/// Result alias for `kindred`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by signature validation, clustering and table output.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input was empty.
    EmptyInput,

    /// A split was requested for fewer than two instances.
    TooFewInstances {
        /// Number of instances supplied.
        found: usize,
    },

    /// A label-set partition references a label outside the vocabulary.
    UnknownLabel {
        /// The offending label.
        label: String,
    },

    /// A multiset entry carried a non-positive occurrence count.
    InvalidCount {
        /// Rendered signature of the offending entry.
        signature: String,
    },

    /// I/O failure while writing the type table.
    Io(String),

    /// Generic error with message.
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::TooFewInstances { found } => {
                write!(f, "cannot split {found} instance(s); at least 2 are required")
            }
            Error::UnknownLabel { label } => {
                write!(f, "partition references unknown label '{label}'")
            }
            Error::InvalidCount { signature } => {
                write!(f, "signature '{signature}' has a non-positive occurrence count")
            }
            Error::Io(msg) => write!(f, "i/o error: {msg}"),
            Error::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}
