//! Hot-path benchmarks: the calls a search makes per node.

use bottle_sort::{LevelMeta, LevelState};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn sample_level() -> LevelState {
    let layouts = [
        "RBYG", "GYBR", "PORC", "MCOP", "YRGB", "CMPO", "BGRY", "OPMC", "....", "....",
    ];
    LevelState::parse(&layouts, &[], LevelMeta::new(1)).unwrap()
}

fn bench_level(c: &mut Criterion) {
    let level = sample_level();

    c.bench_function("legal_moves", |b| b.iter(|| black_box(&level).legal_moves()));

    c.bench_function("is_win", |b| b.iter(|| black_box(&level).is_win()));

    c.bench_function("clone_and_apply", |b| {
        b.iter(|| {
            let mut next = black_box(&level).clone();
            next.try_apply_move(0, 8)
        })
    });
}

criterion_group!(benches, bench_level);
criterion_main!(benches);
