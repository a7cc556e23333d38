use std::fmt;

use crate::error::{DawgError, Result};

/// Default maximum word length.
pub const WORD_LIMIT: usize = 16;

/// Letters of the default alphabet, in sort order.
pub const DEFAULT_LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

const NO_LETTER: u8 = u8::MAX;

/// An ordered set of ASCII letters that may appear in words.
///
/// Each letter is identified by its index in the alphabet. Indices are what
/// vertices store as their `value`, and the alphabet order is the sort order
/// words must be presented in.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    letters: Box<[u8]>,
    index: [u8; 128],
}

impl Alphabet {
    /// Creates an alphabet from its letters, listed in sort order.
    ///
    /// # Errors
    ///
    /// Returns [`DawgError::InvalidAlphabet`] if `letters` is empty, contains a
    /// duplicate, or contains anything other than lowercase ASCII graphic
    /// characters. Input is lowercased before it reaches the builder, so
    /// uppercase letters could never match.
    pub fn new(letters: &str) -> Result<Self> {
        if letters.is_empty() {
            return Err(DawgError::InvalidAlphabet("alphabet is empty".into()));
        }
        let mut index = [NO_LETTER; 128];
        let mut collected = Vec::with_capacity(letters.len());
        for ch in letters.chars() {
            if !ch.is_ascii_graphic() || ch.is_ascii_uppercase() {
                return Err(DawgError::InvalidAlphabet(format!(
                    "{ch:?} is not a lowercase printable ASCII character"
                )));
            }
            let byte = ch as u8;
            if index[byte as usize] != NO_LETTER {
                return Err(DawgError::InvalidAlphabet(format!("{ch:?} appears twice")));
            }
            index[byte as usize] = collected.len() as u8;
            collected.push(byte);
        }
        Ok(Alphabet {
            letters: collected.into_boxed_slice(),
            index,
        })
    }

    /// Number of letters in the alphabet.
    #[inline]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Always false; an alphabet holds at least one letter.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Returns the index of `ch`, or `None` if it is not part of the alphabet.
    #[inline]
    pub fn index_of(&self, ch: char) -> Option<u8> {
        if !ch.is_ascii() {
            return None;
        }
        match self.index[ch as usize] {
            NO_LETTER => None,
            i => Some(i),
        }
    }

    /// Returns the letter with index `value`.
    ///
    /// Panics if `value` is out of range.
    #[inline]
    pub fn letter(&self, value: u8) -> char {
        self.letters[value as usize] as char
    }

    /// Iterates over the letters in sort order.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.iter().map(|&b| b as char)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Alphabet::new(DEFAULT_LETTERS).expect("default alphabet is valid")
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters: String = self.letters().collect();
        f.debug_tuple("Alphabet").field(&letters).finish()
    }
}

/// Settings shared by every stage of a build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DawgConfig {
    /// Letters words may contain.
    pub alphabet: Alphabet,
    /// Words longer than this are rejected.
    pub word_limit: usize,
}

impl DawgConfig {
    /// Creates a configuration with the given alphabet and the default word limit.
    pub fn new(alphabet: Alphabet) -> Self {
        DawgConfig {
            alphabet,
            word_limit: WORD_LIMIT,
        }
    }

    /// Sets the maximum word length. A limit of zero is raised to one.
    pub fn with_word_limit(mut self, word_limit: usize) -> Self {
        self.word_limit = word_limit.max(1);
        self
    }
}

impl Default for DawgConfig {
    fn default() -> Self {
        DawgConfig::new(Alphabet::default())
    }
}
