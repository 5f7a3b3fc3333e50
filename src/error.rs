/// An error that can occur when constructing or remapping over an alphabet.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// A destination slice had the wrong length for the requested mapping.
    Size {
        /// The length the operation requires.
        expected: usize,
        /// The length that was supplied.
        actual: usize,
    },
    /// A byte (or code) does not belong to the alphabet.
    Mapping {
        /// The offending byte or code.
        byte: u8,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Size { expected, actual } => write!(
                f,
                "destination slice has length {} but the mapping requires {}",
                actual, expected,
            ),
            Error::Mapping { byte } => {
                write!(f, "byte {:#04x} is not part of the alphabet", byte)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
