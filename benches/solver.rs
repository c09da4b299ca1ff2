use criterion::{black_box, criterion_group, criterion_main, Criterion};

use hlp_solver::context::SolverContext;
use hlp_solver::dbin::map::DbinMap;
use hlp_solver::dbin::{self};
use hlp_solver::dist_check::Accuracy;
use hlp_solver::hlp;
use hlp_solver::request::Request;

fn criterion_benchmark(c: &mut Criterion) {
    let ctx = SolverContext::new();

    let exact = Request::parse(Some("0123456789ABCDEF")).unwrap();
    c.bench_function("hlp-solve-exact-identity", |b| {
        b.iter(|| {
            let mut chain = Vec::new();
            hlp::solve(black_box(&ctx), black_box(&exact), 8, Accuracy::Normal, &mut chain);
        })
    });

    let partial = Request::parse(Some("0000000000000001")).unwrap();
    c.bench_function("hlp-solve-partial-normal-accuracy", |b| {
        b.iter(|| {
            let mut chain = Vec::new();
            hlp::solve(black_box(&ctx), black_box(&partial), 10, Accuracy::Normal, &mut chain);
        })
    });

    c.bench_function("hlp-solve-partial-reduced-accuracy", |b| {
        b.iter(|| {
            let mut chain = Vec::new();
            hlp::solve(black_box(&ctx), black_box(&partial), 10, Accuracy::Reduced, &mut chain);
        })
    });

    let dbin_ctx = ctx.dbin_context(16);
    let dbin_goal = DbinMap::from_exact(0xFFFF);
    c.bench_function("dbin-solve-exact-all-ones", |b| {
        b.iter(|| {
            let mut chain = Vec::new();
            dbin::solve(black_box(dbin_ctx), black_box(dbin_goal), 12, &mut chain);
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
