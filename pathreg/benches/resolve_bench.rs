use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pathreg::path::{normalize, resolver};
use pathreg::{OperationContext, PathDefinition, PathRegistry, RegistryOptions};

/// A registry holding `depth` entries, each relative to the previous one.
fn chain(depth: usize, cache_resolved: bool) -> PathRegistry {
    let registry = PathRegistry::with_options(RegistryOptions { cache_resolved });
    registry
        .add(PathDefinition::absolute("p0", "/srv/app"))
        .unwrap();
    for i in 1..depth {
        registry
            .add(PathDefinition::relative(
                format!("p{i}"),
                format!("d{i}"),
                format!("p{}", i - 1),
            ))
            .unwrap();
    }
    registry
}

fn bench_resolve_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_chain");

    for depth in [1, 8, 64] {
        let leaf = format!("p{}", depth - 1);
        for cache_resolved in [true, false] {
            let registry = chain(depth, cache_resolved);
            let label = if cache_resolved { "cached" } else { "uncached" };
            group.bench_with_input(BenchmarkId::new(label, depth), &leaf, |b, leaf| {
                b.iter(|| registry.resolve(black_box(leaf)));
            });
        }
    }

    group.finish();
}

fn bench_change_root(c: &mut Criterion) {
    let mut group = c.benchmark_group("change_root");

    // Each change invalidates the cached chain, so this measures a full
    // re-resolution after every commit.
    let registry = chain(32, true);
    let mut flip = false;
    group.bench_function("change_then_resolve", |b| {
        b.iter(|| {
            flip = !flip;
            let root = if flip { "/srv/a" } else { "/srv/b" };
            registry
                .change_path("p0", root, &mut OperationContext::new())
                .unwrap();
            registry.resolve(black_box("p31"))
        });
    });

    group.finish();
}

fn bench_path_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_operations");

    group.bench_function("normalize_with_dots", |b| {
        b.iter(|| normalize::normalize(black_box("/a/b/../c/./d")));
    });

    group.bench_function("resolve_relative", |b| {
        b.iter(|| resolver::resolve_relative(black_box("/srv/app"), black_box("/log/current")));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_resolve_chain,
    bench_change_root,
    bench_path_operations
);
criterion_main!(benches);
