//! Benchmark for the per-frame motion primitives.
//!
//! TARGET: a full page of springs and tweens well under 1ms per frame
//!
//! Run with: cargo bench --package apex_ui --bench motion_benchmark

use apex_ui::scroll::{element_progress, page_progress, transform};
use apex_ui::{
    cn, Easing, InViewObserver, Motion, Rect, SmoothScroll, SmoothScrollOptions, Spring,
    SpringConfig, Transition, Viewport,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn bench_springs(c: &mut Criterion) {
    let mut group = c.benchmark_group("springs");
    group.throughput(Throughput::Elements(64));

    group.bench_function("cursor_spring_64_frame", |b| {
        let mut springs: Vec<Spring> = (0..64)
            .map(|_| Spring::new(0.0, SpringConfig::CURSOR))
            .collect();
        let mut target = 0.0_f32;
        b.iter(|| {
            target += 17.0;
            for spring in &mut springs {
                spring.set_target(target);
                spring.update(black_box(0.016));
            }
        });
    });

    group.finish();
}

fn bench_easing(c: &mut Criterion) {
    c.bench_function("cubic_bezier_apply", |b| {
        let mut t = 0.0_f32;
        b.iter(|| {
            t = (t + 0.013) % 1.0;
            black_box(Easing::EASE_OUT_CUBIC.apply(black_box(t)))
        });
    });

    c.bench_function("tween_reveal_card", |b| {
        b.iter(|| {
            let mut motion = Motion::new(
                0.0,
                Transition::tween(0.8, Easing::EASE_OUT_CUBIC).with_delay(0.3),
            );
            motion.set_target(1.0);
            for _ in 0..75 {
                motion.update(0.016);
            }
            black_box(motion.value())
        });
    });
}

fn bench_scroll(c: &mut Criterion) {
    c.bench_function("smooth_scroll_settle", |b| {
        b.iter(|| {
            let mut scroll = SmoothScroll::new(SmoothScrollOptions::default(), 5000.0);
            scroll.on_wheel(black_box(1200.0));
            let mut time = 0.0;
            while scroll.is_scrolling() {
                time += 16.0;
                scroll.raf(time);
            }
            black_box(scroll.scroll_y())
        });
    });

    c.bench_function("scroll_linked_transforms", |b| {
        let card = Rect::new(0.0, 1800.0, 296.0, 370.0);
        let mut observer = InViewObserver::new(true, 100.0);
        let mut y = 0.0_f32;
        b.iter(|| {
            y = (y + 37.0) % 5000.0;
            let progress = page_progress(y, 5900.0, 900.0);
            let parallax = transform(element_progress(card, y, 900.0), [0.0, 1.0], [-50.0, 50.0]);
            let change = observer.observe(card, y, Viewport::DESKTOP);
            black_box((progress, parallax, change))
        });
    });
}

fn bench_classes(c: &mut Criterion) {
    c.bench_function("cn_navbar_merge", |b| {
        let mut scrolled = false;
        b.iter(|| {
            scrolled = !scrolled;
            black_box(cn!(
                "fixed top-0 left-0 w-full z-50 transition-all duration-300 px-6 py-4",
                "bg-transparent",
                scrolled.then_some("bg-apex-black/80 backdrop-blur-md border-b border-white/10"),
            ))
        });
    });
}

criterion_group!(benches, bench_springs, bench_easing, bench_scroll, bench_classes);
criterion_main!(benches);
