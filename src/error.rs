use thiserror::Error;

/// Which hard ceiling of the 4-byte edge record was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    /// A letter value does not fit in the 5-bit letter field.
    Letter {
        /// The offending letter index.
        value: u8,
    },
    /// A block offset does not fit in the 24-bit offset field.
    Offset {
        /// The offending offset, in record units.
        offset: usize,
    },
}

impl std::fmt::Display for Overflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Overflow::Letter { value } => {
                write!(f, "letter value {value} does not fit in 5 bits")
            }
            Overflow::Offset { offset } => {
                write!(f, "edge block offset {offset} does not fit in 24 bits")
            }
        }
    }
}

/// Errors produced while building, encoding or decoding a DAWG.
#[derive(Error, Debug)]
pub enum DawgError {
    /// Words were not provided in ascending order. Aborts the build.
    #[error("words out of alphabetical order: {previous:?} then {word:?}")]
    OutOfOrderInput {
        /// The previously accepted word.
        previous: String,
        /// The word that sorts before it.
        word: String,
    },
    /// The word is longer than the configured limit.
    #[error("word {word:?} is longer than {limit} characters")]
    WordTooLong {
        /// The rejected word.
        word: String,
        /// The configured word-length limit.
        limit: usize,
    },
    /// The word contains a character outside the alphabet.
    #[error("illegal character {ch:?} at position {position} in {word:?}")]
    IllegalCharacter {
        /// The rejected word.
        word: String,
        /// The first character not in the alphabet.
        ch: char,
        /// Character position of `ch` within `word`.
        position: usize,
    },
    /// The empty word cannot be stored in the binary format.
    #[error("empty word")]
    EmptyWord,
    /// The DAWG does not fit in the fixed-width record format.
    #[error("format overflow: {0}")]
    FormatOverflow(Overflow),
    /// The input is not a well-formed DAWG binary.
    #[error("malformed DAWG binary: {0}")]
    MalformedBinary(String),
    /// The alphabet configuration is unusable.
    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),
    /// Reading input or writing output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DawgError {
    /// True for errors that only reject the current word; the build may continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DawgError::WordTooLong { .. } | DawgError::IllegalCharacter { .. } | DawgError::EmptyWord
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DawgError>;
