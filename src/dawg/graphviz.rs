use std::io::Write;

use hashbrown::HashSet;

use super::enumerate::WordGraph;
use super::vertex::VertexId;
use crate::error::Result;

/// Renders the graph as a Graphviz `digraph`.
///
/// Each reachable vertex is declared once, shared vertices included. The
/// root is drawn as a diamond labelled `root`; other vertices are labelled
/// with their letter, followed by ` *` if a word ends there.
pub fn render_graphviz<G: WordGraph + ?Sized>(graph: &G) -> String {
    let alphabet = graph.alphabet();
    let root = graph.root_id();
    let mut dot = String::from("digraph G {\n");
    let mut visited: HashSet<VertexId> = HashSet::new();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let vertex = graph.vertex(id);
        if id == root {
            dot.push_str(&format!("\tn{} [label=\"root\", shape=Mdiamond];\n", vertex.id()));
        } else {
            let marker = if vertex.is_word() { " *" } else { "" };
            dot.push_str(&format!(
                "\tn{} [label=\"{}{marker}\"];\n",
                vertex.id(),
                alphabet.letter(vertex.value())
            ));
        }
        for (_, child) in vertex.children() {
            dot.push_str(&format!("\tn{} -> n{};\n", vertex.id(), graph.vertex(child).id()));
        }
        // Reversed so that children are declared in letter order.
        stack.extend(vertex.children().rev().map(|(_, child)| child));
    }
    dot.push_str("}\n");
    dot
}

/// Writes the Graphviz rendering of `graph` to `out`.
pub fn write_graphviz<G: WordGraph + ?Sized>(graph: &G, out: &mut impl Write) -> Result<()> {
    out.write_all(render_graphviz(graph).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::DawgConfig;
    use crate::dawg::builder::build_dawg;

    #[test]
    fn shared_vertices_are_declared_once() {
        let dawg = build_dawg(["bad", "cad"], &DawgConfig::default()).unwrap();
        let dot = render_graphviz(&dawg);
        assert_eq!(
            dot,
            "digraph G {\n\
             \tn0 [label=\"root\", shape=Mdiamond];\n\
             \tn0 -> n1;\n\
             \tn0 -> n2;\n\
             \tn1 [label=\"b\"];\n\
             \tn1 -> n3;\n\
             \tn3 [label=\"a\"];\n\
             \tn3 -> n4;\n\
             \tn4 [label=\"d *\"];\n\
             \tn2 [label=\"c\"];\n\
             \tn2 -> n3;\n\
             }\n"
        );
    }

    #[test]
    fn renders_a_trie() {
        let mut builder = crate::dawg::TrieBuilder::new(DawgConfig::default());
        builder.add_word("ab").unwrap();
        let trie = builder.finish();
        let mut out = Vec::new();
        write_graphviz(&trie, &mut out).unwrap();
        let dot = String::from_utf8(out).unwrap();
        assert!(dot.starts_with("digraph G {\n\tn0 [label=\"root\", shape=Mdiamond];\n"));
        assert!(dot.contains("\tn1 [label=\"a\"];\n"));
        assert!(dot.contains("\tn2 [label=\"b *\"];\n"));
        assert!(dot.ends_with("}\n"));
    }
}
