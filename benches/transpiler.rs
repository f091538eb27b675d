mod common;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kori::compile;
use kori::transpiler::Transpiler;
use kori::transpiler::js::squish;

fn bench_transpiler(c: &mut Criterion) {
    for (label, source) in common::workloads() {
        let program = common::load_program(&label, &source);

        c.bench_function(&format!("transpiler_codegen_only_{label}"), |b| {
            let transpiler = Transpiler;
            b.iter(|| {
                let output = transpiler
                    .transpile(black_box(&program))
                    .expect("transpile");
                black_box(output);
            })
        });

        c.bench_function(&format!("transpiler_total_{label}"), |b| {
            b.iter(|| {
                let output = compile(black_box(&source)).expect("compile");
                black_box(squish(&output));
            })
        });
    }
}

criterion_group!(benches, bench_transpiler);
criterion_main!(benches);
