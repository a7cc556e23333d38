//! Fixed-width binary format for a minimized DAWG.
//!
//! The file is a flat array of 32-bit edge records, stored big-endian. The
//! outgoing edges of each vertex form a contiguous block, blocks appear in
//! vertex id order and edges within a block in ascending letter order. The
//! root's block starts at record 0; the root itself has no record.
//!
//! ```text
//!  31   30   29     25   24   23                              0
//! ┌────┬────┬─────────┬────┬─────────────────────────────────┐
//! │WORD│LAST│ letter  │ 0  │ offset of the target's block     │
//! └────┴────┴─────────┴────┴─────────────────────────────────┘
//! ```
//!
//! - `WORD`: the target vertex ends a word.
//! - `LAST`: this is the last edge of the source vertex's block.
//! - `letter`: letter index of the target vertex (at most 31).
//! - `offset`: record index where the target's block starts, or 0 if the
//!   target has no children. Record 0 always belongs to the root, which is
//!   never a target, so 0 is unambiguous.
//!
//! The format carries no explicit sharing information. The decoder
//! recovers it by mapping identical records (ignoring `LAST`) to one vertex,
//! which reproduces the minimized graph exactly.

use std::io::Write;

use hashbrown::HashMap;
use mark_last::MarkLastIterator;
use tracing::debug;

use super::arena::VertexArena;
use super::renumber::renumber;
use super::vertex::{Vertex, VertexId};
use super::Dawg;
use crate::config::Alphabet;
use crate::error::{DawgError, Overflow, Result};

/// Set when the target vertex ends a word.
pub const WORD_FLAG: u32 = 0x8000_0000;
/// Set on the last edge of a block.
pub const LAST_SIBLING_FLAG: u32 = 0x4000_0000;
/// Largest letter index the 5-bit letter field can hold.
pub const MAX_LETTER: u8 = 0x1F;
/// Largest block offset the 24-bit offset field can hold.
pub const MAX_OFFSET: usize = 0x00FF_FFFF;
/// Size of one edge record in bytes.
pub const RECORD_SIZE: usize = 4;

const LETTER_SHIFT: u32 = 25;
const OFFSET_MASK: u32 = MAX_OFFSET as u32;

/// Number of literals per line in the embeddable rendering.
const LITERALS_PER_LINE: usize = 8;

/// One encoded edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeRecord(u32);

impl EdgeRecord {
    /// Packs an edge. `letter` and `offset` must already be within range.
    pub fn new(is_word: bool, last_sibling: bool, letter: u8, offset: u32) -> Self {
        debug_assert!(letter <= MAX_LETTER);
        debug_assert!(offset <= OFFSET_MASK);
        let mut bits = ((letter as u32) << LETTER_SHIFT) | (offset & OFFSET_MASK);
        if is_word {
            bits |= WORD_FLAG;
        }
        if last_sibling {
            bits |= LAST_SIBLING_FLAG;
        }
        EdgeRecord(bits)
    }

    /// Wraps a raw record.
    #[inline]
    pub fn from_bits(bits: u32) -> Self {
        EdgeRecord(bits)
    }

    /// The raw 32-bit record.
    #[inline]
    pub fn bits(self) -> u32 {
        self.0
    }

    /// True if the target vertex ends a word.
    #[inline]
    pub fn is_word(self) -> bool {
        self.0 & WORD_FLAG != 0
    }

    /// True if this is the last edge of its block.
    #[inline]
    pub fn is_last_sibling(self) -> bool {
        self.0 & LAST_SIBLING_FLAG != 0
    }

    /// Letter index of the target vertex.
    #[inline]
    pub fn letter(self) -> u8 {
        ((self.0 >> LETTER_SHIFT) & MAX_LETTER as u32) as u8
    }

    /// Block offset of the target vertex, 0 if it has no children.
    #[inline]
    pub fn offset(self) -> usize {
        (self.0 & OFFSET_MASK) as usize
    }

    /// Everything that identifies the target vertex: the record minus its
    /// position within the source block.
    #[inline]
    fn target_key(self) -> u32 {
        self.0 & !LAST_SIBLING_FLAG
    }
}

/// Encodes a DAWG into edge records.
///
/// # Errors
///
/// Returns [`DawgError::FormatOverflow`] if a letter index exceeds
/// [`MAX_LETTER`] or a block offset exceeds [`MAX_OFFSET`]. The whole graph
/// is checked before any record is produced.
pub fn encode(dawg: &Dawg) -> Result<Vec<EdgeRecord>> {
    encode_with_limit(dawg, MAX_OFFSET)
}

pub(crate) fn encode_with_limit(dawg: &Dawg, max_offset: usize) -> Result<Vec<EdgeRecord>> {
    let offsets = block_offsets(dawg);
    check_capacity(dawg, &offsets, max_offset)?;

    let mut records = Vec::with_capacity(dawg.edge_count());
    for vertex in dawg.vertices() {
        for (last, (_, child)) in vertex.children().mark_last() {
            let target = dawg.vertex(child);
            let offset = if target.edge_count() == 0 {
                0
            } else {
                offsets[child.index()]
            };
            records.push(EdgeRecord::new(
                target.is_word(),
                last,
                target.value(),
                offset as u32,
            ));
        }
    }
    debug!(
        vertices = dawg.vertex_count(),
        records = records.len(),
        "encoded DAWG"
    );
    Ok(records)
}

/// Record index where each vertex's block starts: the number of edges owned
/// by all vertices with a smaller id.
fn block_offsets(dawg: &Dawg) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(dawg.vertex_count());
    let mut total = 0;
    for vertex in dawg.vertices() {
        offsets.push(total);
        total += vertex.edge_count();
    }
    offsets
}

fn check_capacity(dawg: &Dawg, offsets: &[usize], max_offset: usize) -> Result<()> {
    for vertex in dawg.vertices().skip(1) {
        if vertex.value() > MAX_LETTER {
            return Err(DawgError::FormatOverflow(Overflow::Letter {
                value: vertex.value(),
            }));
        }
        let offset = offsets[vertex.id() as usize];
        if vertex.edge_count() > 0 && offset > max_offset {
            return Err(DawgError::FormatOverflow(Overflow::Offset { offset }));
        }
    }
    Ok(())
}

/// Serializes records as big-endian bytes.
pub fn to_bytes(records: &[EdgeRecord]) -> Vec<u8> {
    records
        .iter()
        .flat_map(|record| record.bits().to_be_bytes())
        .collect()
}

/// Renders records as comma-separated `0xXXXXXXXX` literals, eight per line,
/// for embedding in source code.
pub fn render_embedded(records: &[EdgeRecord]) -> String {
    let mut text = String::with_capacity(records.len() * 12 + 1);
    for (i, chunk) in records.chunks(LITERALS_PER_LINE).enumerate() {
        if i > 0 {
            text.push_str(",\n");
        }
        let line: Vec<String> = chunk
            .iter()
            .map(|record| format!("0x{:08X}", record.bits()))
            .collect();
        text.push_str(&line.join(", "));
    }
    if !text.is_empty() {
        text.push('\n');
    }
    text
}

/// Encodes `dawg` and writes the binary form to `out`.
///
/// Nothing is written unless encoding succeeds.
pub fn write_binary(dawg: &Dawg, out: &mut impl Write) -> Result<()> {
    let bytes = to_bytes(&encode(dawg)?);
    out.write_all(&bytes)?;
    Ok(())
}

/// Encodes `dawg` and writes the embeddable text form to `out`.
///
/// Nothing is written unless encoding succeeds.
pub fn write_embedded(dawg: &Dawg, out: &mut impl Write) -> Result<()> {
    let text = render_embedded(&encode(dawg)?);
    out.write_all(text.as_bytes())?;
    Ok(())
}

/// Parses big-endian bytes into records.
///
/// # Errors
///
/// Returns [`DawgError::MalformedBinary`] if the length is not a multiple of
/// [`RECORD_SIZE`].
pub fn from_bytes(bytes: &[u8]) -> Result<Vec<EdgeRecord>> {
    if bytes.len() % RECORD_SIZE != 0 {
        return Err(DawgError::MalformedBinary(format!(
            "length {} is not a multiple of {RECORD_SIZE}",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(RECORD_SIZE)
        .map(|c| EdgeRecord(u32::from_be_bytes([c[0], c[1], c[2], c[3]])))
        .collect())
}

/// Decodes a binary DAWG.
///
/// # Errors
///
/// Returns [`DawgError::MalformedBinary`] if the data is truncated, refers
/// past its end, uses a letter outside `alphabet`, repeats a letter within
/// one block or describes a cycle.
pub fn decode(bytes: &[u8], alphabet: &Alphabet) -> Result<Dawg> {
    decode_records(&from_bytes(bytes)?, alphabet)
}

/// Decodes a graph from already parsed records.
pub fn decode_records(records: &[EdgeRecord], alphabet: &Alphabet) -> Result<Dawg> {
    let alphabet_len = alphabet.len();
    let mut arena = VertexArena::with_capacity(records.len() + 1);
    let root = arena.alloc(Vertex::new(0, 0, alphabet_len, None));

    let mut shared: HashMap<u32, VertexId> = HashMap::new();
    let mut pending = Vec::new();
    if !records.is_empty() {
        pending.push((root, 0));
    }

    while let Some((parent, block)) = pending.pop() {
        let mut position = block;
        loop {
            let record = *records.get(position).ok_or_else(|| {
                DawgError::MalformedBinary(format!(
                    "block at record {block} has no last edge before the end of the data"
                ))
            })?;
            let letter = record.letter();
            if letter as usize >= alphabet_len {
                return Err(DawgError::MalformedBinary(format!(
                    "record {position} uses letter {letter} outside the alphabet"
                )));
            }
            if arena[parent].get(letter).is_some() {
                return Err(DawgError::MalformedBinary(format!(
                    "block at record {block} repeats letter {letter}"
                )));
            }

            let child = match shared.get(&record.target_key()) {
                Some(&child) => child,
                None => {
                    let mut vertex = Vertex::new(arena.len() as u32, letter, alphabet_len, None);
                    vertex.is_word = record.is_word();
                    let child = arena.alloc(vertex);
                    shared.insert(record.target_key(), child);
                    let offset = record.offset();
                    if offset != 0 {
                        if offset >= records.len() {
                            return Err(DawgError::MalformedBinary(format!(
                                "record {position} points at {offset}, past the last record"
                            )));
                        }
                        pending.push((child, offset));
                    }
                    child
                }
            };
            arena[parent].insert(letter, child);

            if record.is_last_sibling() {
                break;
            }
            position += 1;
        }
    }

    check_acyclic(&arena, root)?;
    let dawg = renumber(&arena, root, alphabet);
    debug!(
        records = records.len(),
        vertices = dawg.vertex_count(),
        "decoded DAWG"
    );
    Ok(dawg)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unseen,
    Active,
    Done,
}

/// Rejects graphs in which a vertex can reach itself.
fn check_acyclic(arena: &VertexArena, root: VertexId) -> Result<()> {
    let mut marks = vec![Mark::Unseen; arena.len()];
    marks[root.index()] = Mark::Active;
    let mut stack = vec![(root, arena[root].children())];
    while let Some((id, children)) = stack.last_mut() {
        let id = *id;
        let next = children.next();
        match next {
            Some((_, child)) => match marks[child.index()] {
                Mark::Active => {
                    return Err(DawgError::MalformedBinary(
                        "edge offsets form a cycle".into(),
                    ))
                }
                Mark::Unseen => {
                    marks[child.index()] = Mark::Active;
                    stack.push((child, arena[child].children()));
                }
                Mark::Done => {}
            },
            None => {
                marks[id.index()] = Mark::Done;
                stack.pop();
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::DawgConfig;
    use crate::dawg::builder::build_dawg;
    use crate::dawg::enumerate::collect_words;

    fn dawg_of(words: &[&str]) -> Dawg {
        build_dawg(words, &DawgConfig::default()).unwrap()
    }

    fn record(is_word: bool, last: bool, letter: char, offset: u32) -> EdgeRecord {
        EdgeRecord::new(is_word, last, letter as u8 - b'a', offset)
    }

    #[test]
    fn record_fields_round_trip() {
        let r = EdgeRecord::new(true, false, 31, 0x00AB_CDEF);
        assert_eq!(r.bits(), 0x8000_0000 | (31 << 25) | 0x00AB_CDEF);
        assert!(r.is_word());
        assert!(!r.is_last_sibling());
        assert_eq!(r.letter(), 31);
        assert_eq!(r.offset(), 0x00AB_CDEF);
        // Bit 24 is never set.
        assert_eq!(r.bits() & 0x0100_0000, 0);
    }

    #[test]
    fn encodes_bad_cad() {
        // ids: 0 root, 1 b, 2 c, 3 shared a, 4 shared d
        let dawg = dawg_of(&["bad", "cad"]);
        let records = encode(&dawg).unwrap();
        assert_eq!(
            records,
            [
                record(false, false, 'b', 2),
                record(false, true, 'c', 3),
                record(false, true, 'a', 4),
                record(false, true, 'a', 4),
                record(true, true, 'd', 0),
            ]
        );
    }

    #[test]
    fn encodes_prefix_words() {
        // ids: 0 root, 1 c, 2 a, 3 t(word), 4 s(word)
        let dawg = dawg_of(&["cat", "cats"]);
        let records = encode(&dawg).unwrap();
        assert_eq!(
            records,
            [
                record(false, true, 'c', 1),
                record(false, true, 'a', 2),
                record(true, true, 't', 3),
                record(true, true, 's', 0),
            ]
        );
    }

    #[test]
    fn bytes_are_big_endian() {
        let dawg = dawg_of(&["a"]);
        let mut out = Vec::new();
        write_binary(&dawg, &mut out).unwrap();
        assert_eq!(out, [0xC0, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn empty_dawg_encodes_to_nothing() {
        let dawg = dawg_of(&[]);
        assert!(encode(&dawg).unwrap().is_empty());
        let decoded = decode(&[], dawg.alphabet()).unwrap();
        assert_eq!(decoded.vertex_count(), 1);
        assert!(collect_words(&decoded).is_empty());
        assert_eq!(render_embedded(&[]), "");
    }

    #[test]
    fn embedded_rendering() {
        let records: Vec<_> = (0..10).map(EdgeRecord::from_bits).collect();
        let text = render_embedded(&records);
        assert_eq!(
            text,
            "0x00000000, 0x00000001, 0x00000002, 0x00000003, \
             0x00000004, 0x00000005, 0x00000006, 0x00000007,\n\
             0x00000008, 0x00000009\n"
        );

        let dawg = dawg_of(&["a"]);
        let mut out = Vec::new();
        write_embedded(&dawg, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0xC0000000\n");
    }

    #[test]
    fn decode_preserves_words_and_sharing() {
        let words = [
            "bake", "baked", "baker", "cake", "caked", "fake", "lake", "make", "maker", "taken",
        ];
        let dawg = dawg_of(&words);
        let bytes = to_bytes(&encode(&dawg).unwrap());
        let decoded = decode(&bytes, dawg.alphabet()).unwrap();
        assert_eq!(collect_words(&decoded), words);
        assert_eq!(decoded.vertex_count(), dawg.vertex_count());
        assert_eq!(decoded.edge_count(), dawg.edge_count());
        assert_eq!(to_bytes(&encode(&decoded).unwrap()), bytes);
    }

    #[test]
    fn letter_overflow_is_reported() {
        let letters: String = (b'!'..=b'~')
            .filter(|b| !b.is_ascii_uppercase())
            .map(|b| b as char)
            .collect();
        let alphabet = Alphabet::new(&letters).unwrap();
        assert!(alphabet.len() > 32);
        let config = DawgConfig::new(alphabet);
        let low = letters.chars().nth(3).unwrap().to_string();
        let high = letters.chars().nth(40).unwrap().to_string();

        let fits = build_dawg([low.as_str()], &config).unwrap();
        assert!(encode(&fits).is_ok());

        let dawg = build_dawg([low.as_str(), high.as_str()], &config).unwrap();
        let mut out = Vec::new();
        let err = write_binary(&dawg, &mut out).unwrap_err();
        assert!(matches!(
            err,
            DawgError::FormatOverflow(Overflow::Letter { value: 40 })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn offset_overflow_is_reported_before_any_output() {
        // ids: 0 root, 1 c, 2 d, 3 a, 4 o, 5 t, 6 g, 7 s; blocks start at 0, 2, 3, 4, 5, 6
        let dawg = dawg_of(&["cat", "cats", "dog"]);
        assert!(encode_with_limit(&dawg, 6).is_ok());
        let err = encode_with_limit(&dawg, 5).unwrap_err();
        assert!(matches!(
            err,
            DawgError::FormatOverflow(Overflow::Offset { offset: 6 })
        ));
    }

    #[test]
    fn offsets_only_point_forward() {
        // "b" is shared by "a" and "dx", and "dx" comes later in letter order.
        let dawg = dawg_of(&["abc", "bake", "baked", "cake", "dxbc", "fake", "lake", "make"]);
        let records = encode(&dawg).unwrap();
        let blocks = block_offsets(&dawg);
        let mut position = 0;
        for vertex in dawg.vertices() {
            let source_block = blocks[vertex.id() as usize];
            for _ in 0..vertex.edge_count() {
                let offset = records[position].offset();
                assert!(
                    offset == 0 || offset >= source_block + vertex.edge_count(),
                    "record {position} of vertex {} points back to {offset}",
                    vertex.id()
                );
                position += 1;
            }
        }
        assert_eq!(position, records.len());
    }

    #[test]
    fn every_offset_is_within_bounds() {
        let dawg = dawg_of(&["alpha", "alphabet", "beta", "gamma", "gammas"]);
        let records = encode(&dawg).unwrap();
        for r in &records {
            assert!(r.offset() <= MAX_OFFSET);
            assert!(r.offset() < records.len());
        }
    }

    #[test]
    fn rejects_truncated_input() {
        let alphabet = Alphabet::default();
        assert!(matches!(
            decode(&[0xC0, 0x00, 0x00], &alphabet),
            Err(DawgError::MalformedBinary(_))
        ));
        // A single record without the last-sibling flag.
        let bytes = to_bytes(&[record(true, false, 'a', 0)]);
        assert!(matches!(
            decode(&bytes, &alphabet),
            Err(DawgError::MalformedBinary(_))
        ));
    }

    #[test]
    fn rejects_offset_past_end() {
        let bytes = to_bytes(&[record(false, true, 'a', 7)]);
        assert!(matches!(
            decode(&bytes, &Alphabet::default()),
            Err(DawgError::MalformedBinary(_))
        ));
    }

    #[test]
    fn rejects_letter_outside_alphabet() {
        let bytes = to_bytes(&[EdgeRecord::new(true, true, 5, 0)]);
        let alphabet = Alphabet::new("abc").unwrap();
        assert!(matches!(
            decode(&bytes, &alphabet),
            Err(DawgError::MalformedBinary(_))
        ));
    }

    #[test]
    fn rejects_repeated_letter() {
        let bytes = to_bytes(&[record(true, false, 'a', 0), record(false, true, 'a', 0)]);
        assert!(matches!(
            decode(&bytes, &Alphabet::default()),
            Err(DawgError::MalformedBinary(_))
        ));
    }

    #[test]
    fn rejects_cycles() {
        // Record 1 is the block of the vertex it describes.
        let bytes = to_bytes(&[record(false, true, 'a', 1), record(false, true, 'a', 1)]);
        assert!(matches!(
            decode(&bytes, &Alphabet::default()),
            Err(DawgError::MalformedBinary(_))
        ));
    }
}
