//! Handle-based arena for DAWG vertices.
//!
//! Vertices are addressed by [`VertexId`] rather than by reference, so a
//! merge during minimization only has to rewrite one edge slot and flag the
//! superseded handle as retired. Retired vertices stay in place until the
//! renumberer copies the live ones into a fresh, compact arena.

use std::ops::{Index, IndexMut};

use super::vertex::{Vertex, VertexId};

/// A growable store of vertices with stable handles.
#[derive(Clone, Debug, Default)]
pub(crate) struct VertexArena {
    vertices: Vec<Vertex>,
    retired: Vec<bool>,
    live: usize,
}

impl VertexArena {
    /// Creates an empty arena.
    pub(crate) fn new() -> Self {
        VertexArena::default()
    }

    /// Creates an empty arena with room for `capacity` vertices.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        VertexArena {
            vertices: Vec::with_capacity(capacity),
            retired: Vec::with_capacity(capacity),
            live: 0,
        }
    }

    /// Stores a vertex and returns its handle.
    pub(crate) fn alloc(&mut self, vertex: Vertex) -> VertexId {
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(vertex);
        self.retired.push(false);
        self.live += 1;
        id
    }

    /// Marks a vertex as no longer part of the graph.
    ///
    /// The slot is not reused; nothing may point at it afterwards.
    pub(crate) fn retire(&mut self, id: VertexId) {
        let retired = &mut self.retired[id.index()];
        debug_assert!(!*retired, "vertex retired twice");
        if !*retired {
            *retired = true;
            self.live -= 1;
        }
    }

    /// True if `id` was retired by a merge.
    #[inline]
    pub(crate) fn is_retired(&self, id: VertexId) -> bool {
        self.retired[id.index()]
    }

    /// Total number of slots, including retired ones.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Number of vertices that are still part of the graph.
    #[inline]
    pub(crate) fn live_count(&self) -> usize {
        self.live
    }
}

impl Index<VertexId> for VertexArena {
    type Output = Vertex;

    #[inline]
    fn index(&self, id: VertexId) -> &Vertex {
        debug_assert!(!self.is_retired(id), "access to retired vertex");
        &self.vertices[id.index()]
    }
}

impl IndexMut<VertexId> for VertexArena {
    #[inline]
    fn index_mut(&mut self, id: VertexId) -> &mut Vertex {
        debug_assert!(!self.is_retired(id), "access to retired vertex");
        &mut self.vertices[id.index()]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn handles_are_sequential() {
        let mut arena = VertexArena::new();
        let a = arena.alloc(Vertex::new(0, 0, 2, None));
        let b = arena.alloc(Vertex::new(1, 1, 2, Some(a)));
        assert_eq!(a, VertexId(0));
        assert_eq!(b, VertexId(1));
        assert_eq!(arena[b].trie_parent, Some(a));
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.live_count(), 2);
    }

    #[test]
    fn retire_keeps_slot_but_drops_live_count() {
        let mut arena = VertexArena::with_capacity(4);
        let a = arena.alloc(Vertex::new(0, 0, 2, None));
        let b = arena.alloc(Vertex::new(1, 1, 2, Some(a)));
        arena.retire(b);
        assert!(arena.is_retired(b));
        assert!(!arena.is_retired(a));
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.live_count(), 1);
    }
}
