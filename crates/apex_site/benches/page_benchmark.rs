//! Benchmark for the page's per-frame cost.
//!
//! TARGET: update + render of the whole page under 1ms, leaving the rest
//! of a 16.6ms frame to the host
//!
//! Run with: cargo bench --package apex_site --bench page_benchmark

use apex_site::{Page, PageEvent, SiteConfig};
use apex_ui::{FrameLoop, Viewport};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn mount(viewport: Viewport) -> (Page, FrameLoop) {
    let frames = FrameLoop::new();
    let config = SiteConfig::embedded().expect("embedded config parses");
    let page = Page::mount(config, viewport, &frames).expect("embedded config mounts");
    (page, frames)
}

fn bench_idle_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("idle");

    group.bench_function("frame_and_render_desktop", |b| {
        let (mut page, _frames) = mount(Viewport::DESKTOP);
        let mut now = 0.0;
        b.iter(|| {
            now += FRAME_MS;
            page.frame(black_box(now));
            black_box(page.render().len())
        });
    });

    group.bench_function("frame_and_render_phone", |b| {
        let (mut page, _frames) = mount(Viewport::PHONE);
        let mut now = 0.0;
        b.iter(|| {
            now += FRAME_MS;
            page.frame(black_box(now));
            black_box(page.render().len())
        });
    });

    group.finish();
}

fn bench_scrolling_frame(c: &mut Criterion) {
    c.bench_function("wheel_frame_and_render", |b| {
        let (mut page, _frames) = mount(Viewport::DESKTOP);
        let limit = page.scroll_limit();
        let mut now = 0.0;
        let mut direction = 1.0;
        b.iter(|| {
            if page.scroll_y() >= limit - 1.0 {
                direction = -1.0;
            } else if page.scroll_y() <= 1.0 {
                direction = 1.0;
            }
            page.handle_event(PageEvent::Wheel {
                delta_y: 120.0 * direction,
            });
            page.handle_event(PageEvent::PointerMove {
                x: 700.0,
                y: black_box(450.0),
            });
            now += FRAME_MS;
            page.frame(now);
            black_box(page.render().len())
        });
    });
}

fn bench_mount(c: &mut Criterion) {
    c.bench_function("mount_desktop", |b| {
        let frames = FrameLoop::new();
        b.iter(|| {
            let config = SiteConfig::embedded().expect("embedded config parses");
            let page = Page::mount(config, Viewport::DESKTOP, &frames).expect("mounts");
            black_box(page.document_height())
        });
    });
}

criterion_group!(
    benches,
    bench_idle_frame,
    bench_scrolling_frame,
    bench_mount
);
criterion_main!(benches);
