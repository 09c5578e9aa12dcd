#[macro_use]
extern crate criterion;
extern crate mandelzoom;
extern crate num_cpus;

use criterion::Criterion;
use mandelzoom::{encode_png, Config, FrameRenderer};

fn render_frames(c: &mut Criterion) {
    let renderer = FrameRenderer::from_config(&Config::default()).unwrap();
    c.bench_function("render frame 0", move |b| b.iter(|| renderer.render(0)));

    let renderer = FrameRenderer::from_config(&Config::default()).unwrap();
    let threads = num_cpus::get();
    c.bench_function("render frame 1000 threaded", move |b| {
        b.iter(|| renderer.render_threaded(1000, threads))
    });
}

fn encode_frames(c: &mut Criterion) {
    let frame = FrameRenderer::from_config(&Config::default()).unwrap().render(500);
    c.bench_function("encode frame", move |b| {
        b.iter(|| encode_png(frame.width(), frame.height(), frame.pixels()))
    });
}

criterion_group!(benches, render_frames, encode_frames);
criterion_main!(benches);
