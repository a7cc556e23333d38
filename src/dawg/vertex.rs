/// Stable handle of a vertex inside the arena that stores it.
///
/// Two edges point at the same vertex exactly when their handles are equal,
/// which is what structural comparison during minimization relies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub(crate) u32);

impl VertexId {
    /// Position of the vertex in its arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw bit pattern of an edge slot: 0 when empty, handle + 1 otherwise.
    #[inline]
    fn slot_bits(slot: Option<VertexId>) -> u32 {
        slot.map_or(0, |id| id.0.wrapping_add(1))
    }
}

/// A vertex of a trie, a minimized DAWG or a decoded DAWG.
#[derive(Clone, Debug)]
pub struct Vertex {
    pub(crate) id: u32,
    pub(crate) value: u8,
    pub(crate) is_word: bool,
    pub(crate) edge_count: usize,
    pub(crate) leaf_distance: usize,
    pub(crate) hashcode: u32,
    pub(crate) trie_parent: Option<VertexId>,
    pub(crate) edges: Box<[Option<VertexId>]>,
}

impl Vertex {
    /// Creates a vertex with no children and one empty slot per letter.
    pub(crate) fn new(id: u32, value: u8, alphabet_len: usize, trie_parent: Option<VertexId>) -> Self {
        Vertex {
            id,
            value,
            is_word: false,
            edge_count: 0,
            leaf_distance: 0,
            hashcode: 0,
            trie_parent,
            edges: vec![None; alphabet_len].into_boxed_slice(),
        }
    }

    /// Identifier of the vertex. In a [`Dawg`](super::Dawg) this is the final,
    /// renumbered id; the root is always 0.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Letter index of the edge leading into this vertex.
    #[inline]
    pub fn value(&self) -> u8 {
        self.value
    }

    /// True if a word ends at this vertex.
    #[inline]
    pub fn is_word(&self) -> bool {
        self.is_word
    }

    /// Number of outgoing edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Length of the longest word suffix below this vertex.
    #[inline]
    pub fn leaf_distance(&self) -> usize {
        self.leaf_distance
    }

    /// Returns the child reached through `letter`, if any.
    #[inline]
    pub fn get(&self, letter: u8) -> Option<VertexId> {
        self.edges.get(letter as usize).copied().flatten()
    }

    /// Iterates over `(letter, child)` pairs in ascending letter order.
    #[inline]
    pub fn children(&self) -> ChildIter<'_> {
        ChildIter {
            slots: &self.edges,
            front: 0,
            back: self.edges.len(),
            remaining: self.edge_count,
        }
    }

    /// Fills the empty slot for `letter`.
    pub(crate) fn insert(&mut self, letter: u8, child: VertexId) {
        let slot = &mut self.edges[letter as usize];
        debug_assert!(slot.is_none(), "insert: letter already has a child");
        *slot = Some(child);
        self.edge_count += 1;
    }

    /// Points the existing edge for `letter` at `child`.
    pub(crate) fn replace(&mut self, letter: u8, child: VertexId) {
        let slot = &mut self.edges[letter as usize];
        debug_assert!(slot.is_some(), "replace: letter has no child");
        *slot = Some(child);
    }

    /// Recomputes the structural hash from the value, the word flag and the raw
    /// child handles.
    ///
    /// Only meaningful once every child is canonical: children are hashed by
    /// identity, not by content.
    pub(crate) fn rehash(&mut self) {
        let v = self.value as u32;
        let mut hash = v ^ (v << 5) ^ (v << 10) ^ (v << 15) ^ (v << 20) ^ (v << 25);
        hash = hash.wrapping_add(self.is_word as u32);
        for &slot in self.edges.iter() {
            hash ^= VertexId::slot_bits(slot);
            hash = hash.rotate_left(5);
        }
        self.hashcode = hash;
    }

    /// One-level structural equality: children are compared by handle.
    ///
    /// Equivalent to a full recursive comparison as long as both vertices'
    /// children have already been canonicalized.
    pub(crate) fn same_structure(&self, other: &Vertex) -> bool {
        self.hashcode == other.hashcode
            && self.value == other.value
            && self.is_word == other.is_word
            && self.edges == other.edges
    }
}

/// Iterator over the occupied edge slots of a [`Vertex`].
#[derive(Clone)]
pub struct ChildIter<'v> {
    slots: &'v [Option<VertexId>],
    front: usize,
    back: usize,
    remaining: usize,
}

impl Iterator for ChildIter<'_> {
    type Item = (u8, VertexId);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        while self.front < self.back {
            let letter = self.front;
            self.front += 1;
            if let Some(child) = self.slots[letter] {
                self.remaining -= 1;
                return Some((letter as u8, child));
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for ChildIter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        while self.back > self.front {
            self.back -= 1;
            if let Some(child) = self.slots[self.back] {
                self.remaining -= 1;
                return Some((self.back as u8, child));
            }
        }
        None
    }
}

impl ExactSizeIterator for ChildIter<'_> {}
