// ─────────────────────────────────────────────────────────────────────
// SCPN FEL Core — Sase
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Single-run driver: validate, derive, integrate, reduce.
//!
//! Produces the consolidated [`FelHistory`] bundle consumed by plotting
//! and analysis layers. Ensemble averaging over repeated runs lives
//! above this function; each call owns its own RNG stream.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::SeedableRng;

use fel_diagnostics::reducer;
use fel_types::config::FelConfig;
use fel_types::error::FelResult;

use crate::bucket;
use crate::integrator;
use crate::lattice::{self, StepProfile};

/// RNG seed used when `const_seed` is set: re-seeded once per run, never
/// per slice, so slices draw from one continuing deterministic stream.
const REPRODUCIBLE_SEED: u64 = 22;

/// Consolidated diagnostics of one run.
#[derive(Debug, Clone)]
pub struct FelHistory {
    /// Step positions along the undulator [m].
    pub z_m: Array1<f64>,
    /// Power profile along the undulator [W].
    pub power_z: Array1<f64>,
    /// Slice positions along the bunch [µm].
    pub s_um: Array1<f64>,
    /// Power along the bunch per undulator step [W], shape (z_steps, s_steps).
    pub power_s: Array2<f64>,
    /// Pierce parameter, per step under taper.
    pub rho: StepProfile,
    /// Frequency-deviation axis, length s_steps + 1.
    pub detune: Array1<f64>,
    /// Complex field along the bunch at the final step.
    pub field: Array1<Complex64>,
    /// Complex field along the bunch at every step.
    pub field_s: Array2<Complex64>,
    /// Theoretical 1D gain length [m].
    pub gain_length_m: f64,
    /// Resonant wavelength [m].
    pub res_wavelength_m: f64,
    /// Output phase trajectories (npart, z_steps + 1), last slice.
    pub theta: Array2<f64>,
    /// Output energy trajectories (npart, z_steps + 1), last slice.
    pub gamma: Array2<f64>,
    /// Ensemble-mean energy per step.
    pub gamma_z: Array1<f64>,
    /// Bunching factor, shape (s_steps, z_steps).
    pub bunching: Array2<Complex64>,
    /// Slice-mean initial phase per slice.
    pub theta0_mean: Array1<f64>,
}

/// Run one 1D FEL simulation.
pub fn run(config: &FelConfig) -> FelResult<FelHistory> {
    let lattice = lattice::derive(config)?;

    let mut rng = if config.const_seed {
        StdRng::seed_from_u64(REPRODUCIBLE_SEED)
    } else {
        StdRng::from_entropy()
    };

    let npart = config.npart;
    let mode = config.mode;
    let gbar = lattice.gbar;
    let delg = config.e_spread;
    let ns = lattice.ns;

    let out = integrator::integrate(&lattice, npart, || {
        bucket::load_bucket(&mut rng, npart, gbar, delg, mode, ns)
    })?;

    let (power_z, power_s) = reducer::power_profiles(&out.field, lattice.sigma_x2);
    let gamma_z = reducer::mean_energy(&out.trajectories.gamma);

    // Quadratures to field units at the exit-step coefficients.
    let z = lattice.z_steps;
    let field_scale =
        (lattice.chi.at(z) / (lattice.density * lattice.kappa1.at(z)) * lattice.pbeam_w).sqrt();
    let field = reducer::exit_field(&out.field, field_scale);
    let field_s = reducer::field_history(&out.field, field_scale);

    Ok(FelHistory {
        z_m: reducer::undulator_axis(lattice.z_steps, lattice.delt),
        power_z,
        s_um: reducer::bunch_axis(lattice.s_steps, lattice.dels, lattice.coop_length),
        power_s,
        rho: lattice.rho.clone(),
        detune: reducer::detune_axis(lattice.s_steps, lattice.dels),
        field,
        field_s,
        gain_length_m: lattice.gain_length_m,
        res_wavelength_m: lattice.res_wavelength_m,
        theta: out.trajectories.theta,
        gamma: out.trajectories.gamma,
        gamma_z,
        bunching: out.bunching,
        theta0_mean: out.theta0_mean,
    })
}
