//! Performance benchmarks for tempo and key analysis

use composer_dsp::config::ChromaConfig;
use composer_dsp::features::chroma::extract_pcd;
use composer_dsp::{analyze_audio, detect_onsets, AnalysisConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const SAMPLE_RATE: u32 = 22050;

/// 30 seconds of 800 Hz clicks at 120 BPM over a quiet A440 tone
fn synthetic_track() -> Vec<f32> {
    let click_len = SAMPLE_RATE as usize / 10;
    let period = SAMPLE_RATE as usize / 2;
    (0..SAMPLE_RATE as usize * 30)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let tone = (t * 440.0 * 2.0 * std::f32::consts::PI).sin() * 0.2;
            let click = if i % period < click_len {
                (t * 800.0 * 2.0 * std::f32::consts::PI).sin() * 0.8
            } else {
                0.0
            };
            tone + click
        })
        .collect()
}

fn bench_detect_onsets(c: &mut Criterion) {
    let samples = synthetic_track();
    c.bench_function("detect_onsets_30s", |b| {
        b.iter(|| {
            let _ = detect_onsets(black_box(&samples), black_box(SAMPLE_RATE), black_box(100.0));
        });
    });
}

fn bench_extract_pcd(c: &mut Criterion) {
    let samples = synthetic_track();
    let config = ChromaConfig::default();
    c.bench_function("extract_pcd_30s", |b| {
        b.iter(|| {
            let _ = extract_pcd(black_box(&samples), black_box(SAMPLE_RATE), black_box(&config));
        });
    });
}

fn bench_analyze_audio(c: &mut Criterion) {
    let samples = synthetic_track();
    let config = AnalysisConfig::default();
    c.bench_function("analyze_audio_30s", |b| {
        b.iter(|| {
            let _ = analyze_audio(black_box(&samples), black_box(SAMPLE_RATE), black_box(config.clone()));
        });
    });
}

criterion_group!(benches, bench_detect_onsets, bench_extract_pcd, bench_analyze_audio);
criterion_main!(benches);
