/// Handle-based vertex arena.
pub(crate) mod arena;
/// Trie construction from sorted words.
pub mod builder;
/// Bit-packed binary encoding and decoding of a DAWG.
pub mod codec;
/// Depth-first word enumeration over any graph form.
pub mod enumerate;
/// Graphviz rendering of a graph.
pub mod graphviz;
/// Bottom-up merging of identical subtrees.
mod minimize;
/// Final vertex numbering.
mod renumber;
/// Vertex type and structural hashing.
pub mod vertex;

pub use builder::{build_dawg, Trie, TrieBuilder};
pub use enumerate::WordGraph;
pub use vertex::{Vertex, VertexId};

use crate::config::Alphabet;
use arena::VertexArena;

/// An immutable, minimized DAWG with final vertex ids.
///
/// Vertex `i` is stored at handle `i`; the root is vertex 0. A `Dawg` is
/// produced by [`Trie::into_dawg`], [`build_dawg`] or [`codec::decode`].
#[derive(Clone, Debug)]
pub struct Dawg {
    pub(crate) alphabet: Alphabet,
    pub(crate) arena: VertexArena,
    pub(crate) edge_count: usize,
}

impl Dawg {
    /// The root vertex.
    #[inline]
    pub fn root(&self) -> &Vertex {
        &self.arena[VertexId(0)]
    }

    /// Returns a vertex by id.
    ///
    /// Panics if `id` does not belong to this DAWG.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.arena[id]
    }

    /// Iterates over all vertices in id order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = &Vertex> + '_ {
        (0..self.arena.len() as u32).map(move |i| &self.arena[VertexId(i)])
    }

    /// Number of vertices, root included.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.arena.len()
    }

    /// Number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// The alphabet letter indices refer to.
    #[inline]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
}

impl WordGraph for Dawg {
    fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn root_id(&self) -> VertexId {
        VertexId(0)
    }

    fn vertex(&self, id: VertexId) -> &Vertex {
        &self.arena[id]
    }
}

impl WordGraph for Trie {
    fn alphabet(&self) -> &Alphabet {
        &self.config().alphabet
    }

    fn root_id(&self) -> VertexId {
        Trie::root_id(self)
    }

    fn vertex(&self, id: VertexId) -> &Vertex {
        &self.arena()[id]
    }
}
