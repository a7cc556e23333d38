use std::convert::Infallible;
use std::io::Write;

use smallvec::SmallVec;

use super::vertex::{ChildIter, Vertex, VertexId};
use crate::config::{Alphabet, WORD_LIMIT};
use crate::error::Result;

/// Read access shared by every graph form: a trie, a minimized trie, a
/// built [`Dawg`](super::Dawg) and a decoded one.
pub trait WordGraph {
    /// The alphabet letter indices refer to.
    fn alphabet(&self) -> &Alphabet;
    /// Handle of the root vertex.
    fn root_id(&self) -> VertexId;
    /// Returns a vertex by handle.
    fn vertex(&self, id: VertexId) -> &Vertex;
}

/// Visits every word in ascending order, stopping at the first error.
///
/// Children are visited in letter order and a word is reported before the
/// words that extend it, which yields exactly the order the builder requires.
pub fn try_for_each_word<G, E>(
    graph: &G,
    mut visit: impl FnMut(&str) -> std::result::Result<(), E>,
) -> std::result::Result<(), E>
where
    G: WordGraph + ?Sized,
{
    let alphabet = graph.alphabet();
    let root = graph.vertex(graph.root_id());
    if root.is_word() {
        visit("")?;
    }

    let mut word = String::with_capacity(WORD_LIMIT);
    let mut stack: SmallVec<[ChildIter<'_>; WORD_LIMIT + 1]> = SmallVec::new();
    stack.push(root.children());
    while let Some(children) = stack.last_mut() {
        let next = children.next();
        match next {
            Some((letter, child)) => {
                let vertex = graph.vertex(child);
                word.push(alphabet.letter(letter));
                if vertex.is_word() {
                    visit(&word)?;
                }
                stack.push(vertex.children());
            }
            None => {
                stack.pop();
                word.pop();
            }
        }
    }
    Ok(())
}

/// Visits every word in ascending order.
pub fn for_each_word<G: WordGraph + ?Sized>(graph: &G, mut visit: impl FnMut(&str)) {
    let res: std::result::Result<(), Infallible> = try_for_each_word(graph, |word| {
        visit(word);
        Ok(())
    });
    match res {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

/// Collects every word in ascending order.
pub fn collect_words<G: WordGraph + ?Sized>(graph: &G) -> Vec<String> {
    let mut words = Vec::new();
    for_each_word(graph, |word| words.push(word.to_owned()));
    words
}

/// Writes every word, one per line, in ascending order.
pub fn write_words<G: WordGraph + ?Sized>(graph: &G, out: &mut impl Write) -> Result<()> {
    try_for_each_word(graph, |word| writeln!(out, "{word}"))?;
    Ok(())
}
