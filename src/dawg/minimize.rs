//! Bottom-up hash-consing of a trie into a minimal DAWG.
//!
//! Vertices are bucketed by leaf distance and processed leaves-first. When a
//! vertex at distance `d` is examined, every vertex below it has a smaller
//! distance and has already been replaced by its canonical representative,
//! so comparing child handles is as strong as comparing whole subtrees.

use tracing::debug;

use super::arena::VertexArena;
use super::vertex::VertexId;

/// Scratch state for one minimization. Nothing outlives the call.
struct Minimizer<'a> {
    arena: &'a mut VertexArena,
    root: VertexId,
    /// Non-root vertices, grouped by ascending leaf distance.
    order: Vec<VertexId>,
    table: Vec<Option<VertexId>>,
    merged: usize,
}

/// Collapses structurally identical subtrees of the trie rooted at `root`.
///
/// Returns the number of vertices eliminated. The root is never merged.
pub(crate) fn minimize(arena: &mut VertexArena, root: VertexId) -> usize {
    let mut minimizer = Minimizer::new(arena, root);
    minimizer.sort_by_leaf_distance();
    minimizer.merge();
    minimizer.merged
}

impl<'a> Minimizer<'a> {
    fn new(arena: &'a mut VertexArena, root: VertexId) -> Self {
        let capacity = (arena.live_count() * 3 / 2).max(2);
        Minimizer {
            arena,
            root,
            order: Vec::new(),
            table: vec![None; capacity],
            merged: 0,
        }
    }

    /// Hashes every vertex and counting-sorts the non-root ones by leaf distance.
    fn sort_by_leaf_distance(&mut self) {
        let buckets = self.arena[self.root].leaf_distance.max(1);
        let mut counts = vec![0usize; buckets];
        let mut found = Vec::with_capacity(self.arena.live_count());

        // Still a tree at this point, so no vertex is reached twice.
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let vertex = &mut self.arena[id];
            vertex.rehash();
            if id != self.root {
                counts[vertex.leaf_distance] += 1;
                found.push(id);
            }
            stack.extend(vertex.children().map(|(_, child)| child));
        }

        let mut offsets = Vec::with_capacity(buckets);
        let mut total = 0;
        for count in &counts {
            offsets.push(total);
            total += count;
        }

        let mut order = vec![self.root; total];
        for id in found {
            let slot = &mut offsets[self.arena[id].leaf_distance];
            order[*slot] = id;
            *slot += 1;
        }
        debug!(vertices = total, buckets, "bucketed trie by leaf distance");
        self.order = order;
    }

    fn merge(&mut self) {
        let order = std::mem::take(&mut self.order);
        for id in order {
            match self.find_sole(id) {
                Ok(sole) => self.replace(id, sole),
                Err(pos) => self.table[pos] = Some(id),
            }
        }
    }

    /// Finds a registered vertex structurally equal to `id`, or the free table
    /// slot where `id` should be registered.
    fn find_sole(&self, id: VertexId) -> Result<VertexId, usize> {
        let vertex = &self.arena[id];
        let capacity = self.table.len();
        let mut pos = vertex.hashcode as usize % capacity;
        while let Some(candidate) = self.table[pos] {
            if self.arena[candidate].same_structure(vertex) {
                return Ok(candidate);
            }
            pos = (pos + 1) % capacity;
        }
        Err(pos)
    }

    /// Points the trie parent of `id` at `sole` and retires `id`.
    fn replace(&mut self, id: VertexId, sole: VertexId) {
        debug_assert_ne!(id, sole);
        let vertex = &self.arena[id];
        let letter = vertex.value;
        let parent = vertex
            .trie_parent
            .expect("every non-root trie vertex has a parent");
        debug_assert_eq!(self.arena[parent].get(letter), Some(id));

        let parent = &mut self.arena[parent];
        parent.replace(letter, sole);
        // The parent's child identities changed; it is hashed again before
        // its own bucket is reached.
        parent.rehash();
        self.arena.retire(id);
        self.merged += 1;
    }
}
