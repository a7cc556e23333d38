use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dawgc::dawg::codec;
use dawgc::dawg::enumerate::collect_words;
use dawgc::{build_dawg, DawgConfig};

/// Sorted, distinct words built from a small set of stems and endings, so
/// that the trie has plenty of shared suffixes to merge.
fn generate_words(count: usize) -> Vec<String> {
    let stems = [
        "b", "bl", "br", "c", "ch", "cl", "cr", "d", "dr", "f", "fl", "fr", "g", "gl", "gr", "h",
        "j", "k", "l", "m", "n", "p", "pl", "pr", "qu", "r", "s", "sh", "sl", "sp", "st", "t",
        "th", "tr", "v", "w", "wh", "z",
    ];
    let vowels = ["a", "e", "i", "o", "u", "ea", "oo", "ai"];
    let endings = ["", "d", "k", "ke", "ll", "n", "nd", "ng", "nt", "r", "s", "st", "t", "te"];
    let suffixes = ["", "s", "ed", "er", "ers", "ing", "ings", "y"];

    let mut words = Vec::with_capacity(count);
    'outer: for stem in stems {
        for vowel in vowels {
            for ending in endings {
                for suffix in suffixes {
                    if words.len() == count {
                        break 'outer;
                    }
                    words.push(format!("{stem}{vowel}{ending}{suffix}"));
                }
            }
        }
    }
    words.sort();
    words.dedup();
    words
}

fn bench_build(c: &mut Criterion) {
    let config = DawgConfig::default();
    for &size in &[1_000, 10_000, 30_000] {
        let words = generate_words(size);
        c.bench_function(&format!("build_{size}_words"), |b| {
            b.iter(|| black_box(build_dawg(black_box(&words), &config).unwrap()))
        });
    }
}

fn bench_codec(c: &mut Criterion) {
    let config = DawgConfig::default();
    let dawg = build_dawg(generate_words(30_000), &config).unwrap();
    let bytes = codec::to_bytes(&codec::encode(&dawg).unwrap());

    c.bench_function("encode_30000_words", |b| {
        b.iter(|| black_box(codec::encode(black_box(&dawg)).unwrap()))
    });
    c.bench_function("decode_30000_words", |b| {
        b.iter(|| black_box(codec::decode(black_box(&bytes), &config.alphabet).unwrap()))
    });
    c.bench_function("enumerate_30000_words", |b| {
        b.iter(|| black_box(collect_words(black_box(&dawg))))
    });
}

criterion_group!(benches, bench_build, bench_codec);
criterion_main!(benches);
