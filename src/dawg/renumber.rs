use hashbrown::HashMap;

use super::arena::VertexArena;
use super::vertex::VertexId;
use super::Dawg;
use crate::config::Alphabet;

/// Copies the graph reachable from `root` into a compact arena whose handles
/// are the final vertex ids.
///
/// Parents are visited in id order and their edges in letter order. A
/// vertex is numbered once the last of its parents has been visited, so the
/// root is 0 and every vertex has a larger id than all of its parents. The
/// encoder relies on this: every edge points at a block further on.
/// Retired vertices are not reachable and are left behind.
pub(crate) fn renumber(arena: &VertexArena, root: VertexId, alphabet: &Alphabet) -> Dawg {
    // Parents not yet visited, per reachable vertex.
    let mut waiting: HashMap<VertexId, usize> = HashMap::with_capacity(arena.live_count());
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        for (_, child) in arena[id].children() {
            let count = waiting.entry(child).or_insert(0);
            if *count == 0 {
                stack.push(child);
            }
            *count += 1;
        }
    }

    let mut new_ids: HashMap<VertexId, VertexId> = HashMap::with_capacity(waiting.len() + 1);
    let mut discovered = vec![root];
    new_ids.insert(root, VertexId(0));

    let mut next = 0;
    while next < discovered.len() {
        let parent = discovered[next];
        for (_, child) in arena[parent].children() {
            let count = waiting
                .get_mut(&child)
                .expect("every reachable child was counted");
            *count -= 1;
            if *count == 0 {
                new_ids.insert(child, VertexId(discovered.len() as u32));
                discovered.push(child);
            }
        }
        next += 1;
    }
    debug_assert_eq!(discovered.len(), waiting.len() + 1, "graph has a cycle");

    let mut compact = VertexArena::with_capacity(discovered.len());
    let mut edge_count = 0;
    for (id, &old) in discovered.iter().enumerate() {
        let mut vertex = arena[old].clone();
        vertex.id = id as u32;
        vertex.trie_parent = None;
        for slot in vertex.edges.iter_mut() {
            *slot = slot.map(|child| new_ids[&child]);
        }
        vertex.rehash();
        edge_count += vertex.edge_count;
        compact.alloc(vertex);
    }

    Dawg {
        alphabet: alphabet.clone(),
        arena: compact,
        edge_count,
    }
}
