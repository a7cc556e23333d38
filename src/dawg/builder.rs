use std::cmp::Ordering;

use smallvec::SmallVec;
use tracing::{info, warn};

use super::arena::VertexArena;
use super::minimize;
use super::renumber::renumber;
use super::vertex::{Vertex, VertexId};
use super::Dawg;
use crate::config::{DawgConfig, WORD_LIMIT};
use crate::error::{DawgError, Result};

/// Letter indices of one word.
pub(crate) type Letters = SmallVec<[u8; WORD_LIMIT]>;

/// Grows a trie from words presented in ascending order.
///
/// Every word is checked before it touches the trie, so a rejected word
/// leaves the builder exactly as it was. Repeating the previous word is
/// accepted and changes nothing.
pub struct TrieBuilder {
    config: DawgConfig,
    arena: VertexArena,
    root: VertexId,
    previous: Letters,
    words: usize,
}

impl TrieBuilder {
    /// Creates a builder holding only the root vertex.
    pub fn new(config: DawgConfig) -> Self {
        let mut arena = VertexArena::new();
        let root = arena.alloc(Vertex::new(0, 0, config.alphabet.len(), None));
        TrieBuilder {
            config,
            arena,
            root,
            previous: Letters::new(),
            words: 0,
        }
    }

    /// Adds a word to the trie.
    ///
    /// # Errors
    ///
    /// - [`DawgError::EmptyWord`], [`DawgError::WordTooLong`] and
    ///   [`DawgError::IllegalCharacter`] reject this word only; the caller may
    ///   keep adding words.
    /// - [`DawgError::OutOfOrderInput`] if the word sorts before the previous
    ///   one. The build cannot be completed after this.
    pub fn add_word(&mut self, word: &str) -> Result<()> {
        let letters = self.letters_of(word)?;
        match letters.as_slice().cmp(self.previous.as_slice()) {
            Ordering::Less => {
                return Err(DawgError::OutOfOrderInput {
                    previous: self.previous_word(),
                    word: word.to_owned(),
                })
            }
            Ordering::Equal => return Ok(()),
            Ordering::Greater => {}
        }
        self.insert(&letters);
        self.previous = letters;
        self.words += 1;
        Ok(())
    }

    /// Number of distinct words added so far.
    pub fn word_count(&self) -> usize {
        self.words
    }

    /// Finishes the build and returns the trie.
    pub fn finish(self) -> Trie {
        Trie {
            config: self.config,
            arena: self.arena,
            root: self.root,
            minimized: false,
        }
    }

    fn letters_of(&self, word: &str) -> Result<Letters> {
        if word.is_empty() {
            return Err(DawgError::EmptyWord);
        }
        if word.chars().count() > self.config.word_limit {
            return Err(DawgError::WordTooLong {
                word: word.to_owned(),
                limit: self.config.word_limit,
            });
        }
        word.chars()
            .enumerate()
            .map(|(position, ch)| {
                self.config
                    .alphabet
                    .index_of(ch)
                    .ok_or_else(|| DawgError::IllegalCharacter {
                        word: word.to_owned(),
                        ch,
                        position,
                    })
            })
            .collect()
    }

    fn previous_word(&self) -> String {
        self.previous
            .iter()
            .map(|&letter| self.config.alphabet.letter(letter))
            .collect()
    }

    fn insert(&mut self, letters: &[u8]) {
        let len = letters.len();
        let alphabet_len = self.config.alphabet.len();
        let root = &mut self.arena[self.root];
        root.leaf_distance = root.leaf_distance.max(len);

        let mut node = self.root;
        for (i, &letter) in letters.iter().enumerate() {
            let child = match self.arena[node].get(letter) {
                Some(child) => child,
                None => {
                    let id = self.arena.len() as u32;
                    let child = self
                        .arena
                        .alloc(Vertex::new(id, letter, alphabet_len, Some(node)));
                    self.arena[node].insert(letter, child);
                    child
                }
            };
            let vertex = &mut self.arena[child];
            vertex.leaf_distance = vertex.leaf_distance.max(len - i - 1);
            node = child;
        }
        self.arena[node].is_word = true;
    }
}

/// A trie produced by [`TrieBuilder`], minimized in place by [`Trie::minimize`].
pub struct Trie {
    config: DawgConfig,
    arena: VertexArena,
    root: VertexId,
    minimized: bool,
}

impl Trie {
    /// Number of vertices still part of the graph, root included.
    pub fn vertex_count(&self) -> usize {
        self.arena.live_count()
    }

    /// The configuration the trie was built with.
    pub fn config(&self) -> &DawgConfig {
        &self.config
    }

    /// True once [`minimize`](Trie::minimize) has run.
    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// Merges structurally identical subtrees and returns how many vertices
    /// were eliminated.
    ///
    /// After this the graph is a DAG and vertices may have several parents, so
    /// calling it again does nothing and returns 0.
    pub fn minimize(&mut self) -> usize {
        if self.minimized {
            return 0;
        }
        let trie_vertices = self.arena.live_count();
        let merged = minimize::minimize(&mut self.arena, self.root);
        self.minimized = true;

        info!("Created trie with {trie_vertices} vertices");
        info!(
            "Converted to DAWG with {} vertices, eliminating {}% of trie vertices",
            trie_vertices - merged,
            merged * 100 / trie_vertices
        );
        merged
    }

    /// Minimizes the trie if needed and assigns final vertex ids.
    pub fn into_dawg(mut self) -> Dawg {
        self.minimize();
        renumber(&self.arena, self.root, &self.config.alphabet)
    }

    pub(crate) fn arena(&self) -> &VertexArena {
        &self.arena
    }

    pub(crate) fn root_id(&self) -> VertexId {
        self.root
    }
}

/// Builds a minimized DAWG from words in ascending order.
///
/// Words that are empty, too long or contain letters outside the alphabet
/// are logged and skipped. A word that sorts before its predecessor aborts
/// the build.
///
/// # Examples
///
/// ```
/// use dawgc::dawg::builder::build_dawg;
/// use dawgc::dawg::enumerate::collect_words;
/// use dawgc::DawgConfig;
///
/// let dawg = build_dawg(["bake", "cake", "fake", "lake"], &DawgConfig::default()).unwrap();
/// // root, four first letters, one shared "a", "k" and "e".
/// assert_eq!(dawg.vertex_count(), 8);
/// assert_eq!(collect_words(&dawg), ["bake", "cake", "fake", "lake"]);
/// ```
///
/// ```
/// use dawgc::dawg::builder::build_dawg;
/// use dawgc::{DawgConfig, DawgError};
///
/// let res = build_dawg(["zebra", "apple"], &DawgConfig::default());
/// assert!(matches!(res, Err(DawgError::OutOfOrderInput { .. })));
/// ```
pub fn build_dawg<W: AsRef<str>>(
    words: impl IntoIterator<Item = W>,
    config: &DawgConfig,
) -> Result<Dawg> {
    let mut builder = TrieBuilder::new(config.clone());
    for word in words {
        let word = word.as_ref();
        match builder.add_word(word) {
            Ok(()) => {}
            Err(e) if e.is_recoverable() => warn!("Skipping {word:?}: {e}"),
            Err(e) => return Err(e),
        }
    }
    Ok(builder.finish().into_dawg())
}
