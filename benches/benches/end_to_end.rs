//! End-to-end encoding/decoding benchmarks
//!
//! Run with: cargo bench --bench end_to_end

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wavhuff_core::DType;
use wavhuff_decoder::WavHuffDecoder;
use wavhuff_encoder::{EncoderOptions, WavHuffEncoder};

/// Little-endian 16-bit PCM bytes of a noisy, offset sine
fn create_test_audio(frames: usize) -> Vec<u8> {
    let mut state = 0x2545_f491u32;
    let mut raw = Vec::with_capacity(frames * 2);
    for i in 0..frames {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let sample = 400 + ((i as f32 * 0.02).sin() * 300.0) as i16 + (state % 16) as i16;
        raw.extend_from_slice(&sample.to_le_bytes());
    }
    raw
}

fn bench_encode_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("Encode by Frame Count");

    for &frames in &[4_096usize, 65_536, 1_048_576] {
        let raw = create_test_audio(frames);
        group.throughput(Throughput::Bytes(raw.len() as u64));

        for dtype in [DType::I16, DType::Complex128] {
            let encoder = WavHuffEncoder::new(EncoderOptions::new().dtype(dtype));
            group.bench_with_input(BenchmarkId::new(dtype.as_str(), frames), &raw, |b, raw| {
                b.iter(|| encoder.encode_bytes(black_box(raw)).unwrap())
            });
        }
    }

    group.finish();
}

fn bench_decode_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("Decode by Frame Count");

    for &frames in &[4_096usize, 65_536, 1_048_576] {
        let raw = create_test_audio(frames);
        let stream = WavHuffEncoder::new(EncoderOptions::new().dtype(DType::I16))
            .encode_bytes(&raw)
            .unwrap();
        let decoder = WavHuffDecoder::default();

        group.throughput(Throughput::Bytes(raw.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(frames), &stream, |b, stream| {
            b.iter(|| decoder.decode_bytes(black_box(stream)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode_by_size, bench_decode_by_size);
criterion_main!(benches);
