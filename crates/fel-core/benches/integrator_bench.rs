// -------------------------------------------------------------------------
// SCPN FEL Core -- Integrator Benchmark
// Full single runs (derive + load + leap-frog + reduction) in SASE and
// seeded modes across bunch/undulator grid resolutions.
// -------------------------------------------------------------------------

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fel_core::sase::run;
use fel_types::config::{FelConfig, FelMode, UndulatorK};
use std::hint::black_box;

/// Self-contained LCLS-like configuration at the given grid resolution,
/// so benchmarks do not depend on external JSON files.
fn make_config(s_steps: usize, z_steps: usize, mode: FelMode) -> FelConfig {
    FelConfig {
        npart: 512,
        s_steps,
        z_steps,
        energy_ev: 4313.34e6,
        e_spread: 1.0e-4,
        emit_n: 1.2e-6,
        current_peak_a: 3400.0,
        beta_m: 26.0,
        undu_period_m: 0.03,
        undu_k: UndulatorK::Uniform(3.5),
        undu_l_m: 0.4 * z_steps as f64,
        rad_wavelength_m: 1.5e-9,
        mode,
        seed_power_w: 1.0e4,
        const_seed: true,
    }
}

fn run_once(config: &FelConfig) {
    let history = run(config).expect("run should not error");
    black_box(history.power_z);
}

fn bench_full_runs(c: &mut Criterion) {
    let mut group = c.benchmark_group("fel_single_run");
    // Full runs; keep wall time reasonable.
    group.sample_size(10);

    for &(s, z) in &[(10usize, 25usize), (20, 50), (40, 100)] {
        let sase = make_config(s, z, FelMode::Sase);
        group.bench_with_input(
            BenchmarkId::new("Sase", format!("{}x{}", s, z)),
            &sase,
            |b, cfg| b.iter(|| run_once(cfg)),
        );

        let seeded = make_config(s, z, FelMode::Seeded);
        group.bench_with_input(
            BenchmarkId::new("Seeded", format!("{}x{}", s, z)),
            &seeded,
            |b, cfg| b.iter(|| run_once(cfg)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_full_runs);
criterion_main!(benches);
