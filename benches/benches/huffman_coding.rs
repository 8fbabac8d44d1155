//! Benchmarks for Huffman tree building and bit packing
//!
//! Run with: cargo bench --bench huffman_coding

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wavhuff_bitstream::{deserialize, pack, serialize, unpack, CodeTable, FrequencyTable, HuffmanTree};

/// Skewed symbol stream over `alphabet` distinct values
fn skewed_symbols(len: usize, alphabet: i16) -> Vec<i16> {
    let mut state = 0x9e37_79b9u32;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            // Squaring a uniform value favours small symbols
            let u = (state % 1024) as i32;
            ((u * u) / (1024 * 1024 / alphabet as i32)) as i16
        })
        .collect()
}

fn bench_tree_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("Huffman Tree Building");

    for alphabet in [4i16, 64, 1024] {
        let symbols = skewed_symbols(100_000, alphabet);
        let freqs = FrequencyTable::from_symbols(&symbols);

        group.bench_with_input(BenchmarkId::new("frequencies", alphabet), &symbols, |b, s| {
            b.iter(|| FrequencyTable::from_symbols(black_box(s)))
        });
        group.bench_with_input(BenchmarkId::new("tree", alphabet), &freqs, |b, f| {
            b.iter(|| HuffmanTree::from_frequencies(black_box(f)))
        });
        group.bench_with_input(BenchmarkId::new("codes", alphabet), &freqs, |b, f| {
            let tree = HuffmanTree::from_frequencies(f);
            b.iter(|| CodeTable::from_tree(black_box(&tree)))
        });
    }

    group.finish();
}

fn bench_packing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Huffman Packing");

    for alphabet in [4i16, 64, 1024] {
        let symbols = skewed_symbols(100_000, alphabet);
        let tree = HuffmanTree::from_symbols(&symbols);
        let codes = CodeTable::from_tree(&tree);
        let payload = pack(&symbols, &codes).unwrap();

        group.throughput(Throughput::Elements(symbols.len() as u64));
        group.bench_with_input(BenchmarkId::new("pack", alphabet), &symbols, |b, s| {
            b.iter(|| pack(black_box(s), black_box(&codes)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("unpack", alphabet), &payload, |b, p| {
            b.iter(|| unpack(black_box(p), black_box(&tree), symbols.len()).unwrap())
        });
    }

    group.finish();
}

fn bench_tree_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("Huffman Tree Text");

    let tree = HuffmanTree::from_symbols(&skewed_symbols(100_000, 1024));
    let text = serialize(&tree).unwrap();

    group.bench_function("serialize_1024_symbols", |b| {
        b.iter(|| serialize(black_box(&tree)).unwrap())
    });
    group.bench_function("deserialize_1024_symbols", |b| {
        b.iter(|| deserialize::<i16>(black_box(&text)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_tree_building, bench_packing, bench_tree_text);
criterion_main!(benches);
