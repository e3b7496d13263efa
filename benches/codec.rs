use std::io::Cursor;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use segy_rs::{
    BinaryHeader, SampleFormat, SegyContainer, Trace, decode_samples, encode_samples, f32_to_ibm,
    ibm_to_f32,
};

/// Generate seismic-like samples: a decaying wavelet with some ringing.
fn seismic_samples(n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| {
            let t = i as f32 * 0.004;
            (t * 180.0).sin() * (-t * 3.0).exp() * 1500.0 + (i as f32 * 1.7).sin() * 10.0
        })
        .collect()
}

fn encoded(samples: &[f32], format: SampleFormat) -> Vec<u8> {
    let mut out = Vec::new();
    encode_samples(samples, format, &mut out).unwrap();
    out
}

fn make_file(traces: usize, samples: usize, format: SampleFormat) -> Vec<u8> {
    let data = seismic_samples(samples);
    let mut segy = SegyContainer::create(
        Cursor::new(Vec::new()),
        BinaryHeader::new(samples as u16, format),
    )
    .unwrap();
    for i in 0..traces {
        segy.append_trace(&Trace::new(data.clone()).with_sequence(i as i32 + 1))
            .unwrap();
    }
    segy.close().unwrap().into_inner()
}

fn bench_ibm(c: &mut Criterion) {
    let values = seismic_samples(1000);
    let words: Vec<u32> = values.iter().filter_map(|&v| f32_to_ibm(v)).collect();

    let mut group = c.benchmark_group("ibm");

    group.throughput(Throughput::Elements(1000));

    group.bench_function("to_f32/1000", |b| {
        b.iter(|| {
            black_box(&words)
                .iter()
                .map(|&w| ibm_to_f32(w))
                .sum::<f32>()
        })
    });
    group.bench_function("from_f32/1000", |b| {
        b.iter(|| {
            black_box(&values)
                .iter()
                .filter_map(|&v| f32_to_ibm(v))
                .fold(0u32, u32::wrapping_add)
        })
    });

    group.finish();
}

fn bench_samples(c: &mut Criterion) {
    let samples = seismic_samples(1500);
    let ibm = encoded(&samples, SampleFormat::IbmFloat32);
    let ieee = encoded(&samples, SampleFormat::IeeeFloat32);
    let int16 = encoded(&samples, SampleFormat::Int16);

    let mut group = c.benchmark_group("samples");

    group.throughput(Throughput::Elements(1500));

    group.bench_function("decode/ibm32/1500samp", |b| {
        b.iter(|| decode_samples(black_box(&ibm), SampleFormat::IbmFloat32, 1500).unwrap())
    });
    group.bench_function("decode/ieee32/1500samp", |b| {
        b.iter(|| decode_samples(black_box(&ieee), SampleFormat::IeeeFloat32, 1500).unwrap())
    });
    group.bench_function("decode/int16/1500samp", |b| {
        b.iter(|| decode_samples(black_box(&int16), SampleFormat::Int16, 1500).unwrap())
    });
    group.bench_function("encode/ibm32/1500samp", |b| {
        b.iter(|| encoded(black_box(&samples), SampleFormat::IbmFloat32))
    });

    group.finish();
}

fn bench_container(c: &mut Criterion) {
    let bytes = make_file(100, 500, SampleFormat::IbmFloat32);
    let data = seismic_samples(500);

    let mut group = c.benchmark_group("container");

    group.throughput(Throughput::Elements(100));

    group.bench_function("read_all/100x500", |b| {
        b.iter(|| {
            let mut segy = SegyContainer::open(Cursor::new(black_box(bytes.as_slice()))).unwrap();
            segy.traces().map(|t| t.unwrap().data.len()).sum::<usize>()
        })
    });
    group.bench_function("random_access/100x500", |b| {
        let mut segy = SegyContainer::open(Cursor::new(bytes.as_slice())).unwrap();
        b.iter(|| {
            for i in (0..100u64).rev() {
                black_box(segy.read_trace_at(i).unwrap());
            }
        })
    });
    group.bench_function("append/100x500", |b| {
        b.iter(|| {
            let mut segy = SegyContainer::create(
                Cursor::new(Vec::with_capacity(bytes.len())),
                BinaryHeader::new(500, SampleFormat::IbmFloat32),
            )
            .unwrap();
            for _ in 0..100 {
                segy.append_trace(black_box(&Trace::new(data.clone()))).unwrap();
            }
            segy.close().unwrap().into_inner().len()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_ibm, bench_samples, bench_container);
criterion_main!(benches);
