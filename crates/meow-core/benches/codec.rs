use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{ImageBuffer, Rgba, RgbaImage};

use meow_core::{embed, extract, EmbedConfig, FeatureValue, MetadataPayload, Redundancy};

fn carrier(width: u32, height: u32) -> RgbaImage {
    ImageBuffer::from_fn(width, height, |x, y| {
        let v = x.wrapping_mul(29).wrapping_add(y.wrapping_mul(67));
        Rgba([
            (v % 255) as u8,
            (v.wrapping_mul(3) % 255) as u8,
            (v.wrapping_mul(7) % 255) as u8,
            255,
        ])
    })
}

fn payload() -> MetadataPayload {
    let mut payload = MetadataPayload::new("2026-08-06T12:00:00Z");
    payload
        .features
        .insert("dimensions".into(), FeatureValue::Vector(vec![512.0, 512.0]));
    payload
        .features
        .insert("edge_density".into(), FeatureValue::Scalar(0.42));
    payload
}

fn embedding(c: &mut Criterion) {
    let image = carrier(512, 512);
    let payload = payload();
    let config = EmbedConfig {
        redundancy: Redundancy::High,
        bits_per_channel: 2,
    };

    c.bench_function("embed 512x512 high redundancy", |b| {
        b.iter(|| embed(black_box(&image), black_box(&payload), &config).unwrap())
    });
}

fn extraction(c: &mut Criterion) {
    let stego = embed(&carrier(512, 512), &payload(), &EmbedConfig::default()).unwrap();

    c.bench_function("extract 512x512", |b| {
        b.iter(|| extract(black_box(&stego)))
    });
}

criterion_group!(benches, embedding, extraction);
criterion_main!(benches);
