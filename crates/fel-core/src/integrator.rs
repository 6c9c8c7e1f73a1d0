// ─────────────────────────────────────────────────────────────────────
// SCPN FEL Core — Integrator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Coupled leap-frog integrator over the (slice, step) grid.
//!
//! Particle phase lives on half-integer step offsets relative to energy
//! (standard leap-frog staggering). Radiation emitted by slice `k` at
//! step `j` reaches slice `k + 1` at step `j + 1`: the slippage write
//! `[k+1, j+1] <- [k, j]` is the only cross-slice coupling, so slices
//! must be processed in increasing order and steps within a slice in
//! increasing order.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use fel_types::error::{FelError, FelResult};
use fel_types::state::{FieldGrid, ParticleTrajectories};

use crate::lattice::Lattice;

/// Raw integration history for one run.
#[derive(Debug, Clone)]
pub struct IntegratorOutput {
    /// Field quadratures, shape `(s_steps + 1, z_steps + 1)`.
    pub field: FieldGrid,
    /// Phase/energy trajectories of the last processed slice.
    pub trajectories: ParticleTrajectories,
    /// First-harmonic bunching factor ⟨e^{−iθ}⟩, shape `(s_steps, z_steps)`.
    pub bunching: Array2<Complex64>,
    /// Slice-mean initial phase, one entry per slice.
    pub theta0_mean: Array1<f64>,
}

/// Advance field and particles across the full (slice, step) grid.
///
/// `load` is invoked once per slice and must return phase/energy arrays
/// of length `npart`; a wrong-length return is a fatal contract
/// violation. The integrator performs no physics validation of its own:
/// the lattice is trusted as derived from a validated configuration.
pub fn integrate<F>(lattice: &Lattice, npart: usize, mut load: F) -> FelResult<IntegratorOutput>
where
    F: FnMut() -> FelResult<(Array1<f64>, Array1<f64>)>,
{
    let s_steps = lattice.s_steps;
    let z_steps = lattice.z_steps;
    let ku = lattice.ku;
    let delt = lattice.delt;
    let dels = lattice.dels;
    let density = lattice.density;
    let seed_amplitude = lattice.e02.sqrt();
    let inv_n = 1.0 / npart as f64;

    let mut field = FieldGrid::new(s_steps, z_steps);
    let mut traj = ParticleTrajectories::new(npart, z_steps);
    let mut bunching = Array2::<Complex64>::zeros((s_steps, z_steps));
    let mut theta0_mean = Array1::<f64>::zeros(s_steps);

    for k in 0..s_steps {
        // Every slice sees the same external seed at step 0; there is no
        // cross-slice seed inheritance.
        field.er[[k, 0]] = seed_amplitude;
        field.ei[[k, 0]] = 0.0;

        let (theta0, gamma0) = load()?;
        if theta0.len() != npart || gamma0.len() != npart {
            return Err(FelError::ShapeMismatch {
                expected: format!("bucket arrays of length {npart}"),
                got: format!("theta: {}, gamma: {}", theta0.len(), gamma0.len()),
            });
        }

        let mut theta0_sum = 0.0;
        for p in 0..npart {
            traj.theta[[p, 0]] = theta0[p];
            traj.gamma[[p, 0]] = gamma0[p];
            // Half backward step establishes the staggered grid.
            traj.theta_half[[p, 0]] = theta0[p] - ku * gamma0[p] * delt;
            theta0_sum += theta0[p];
        }
        theta0_mean[k] = theta0_sum * inv_n;

        for j in 0..z_steps {
            let kappa1 = lattice.kappa1.at(j);
            let chi = lattice.chi.at(j);

            // Full-step phase: average the stagger forward by half a step.
            let mut sum_sin = 0.0;
            let mut sum_cos = 0.0;
            for p in 0..npart {
                let theta = traj.theta_half[[p, j]] + ku * traj.gamma[[p, j]] * delt;
                traj.theta[[p, j + 1]] = theta;
                sum_sin += theta.sin();
                sum_cos += theta.cos();
            }
            let sin_avg = sum_sin * inv_n;
            let cos_avg = sum_cos * inv_n;

            // Predictor: field advanced half a slice-step, used only for
            // the energy kick, never stored in the grid.
            let er_half = field.er[[k, j]] + kappa1 * density * cos_avg * dels / 2.0;
            let ei_half = field.ei[[k, j]] - kappa1 * density * sin_avg * dels / 2.0;

            let mut sum_sin_half = 0.0;
            let mut sum_cos_half = 0.0;
            for p in 0..npart {
                let theta_next = traj.theta_half[[p, j]] + 2.0 * ku * traj.gamma[[p, j]] * delt;
                traj.theta_half[[p, j + 1]] = theta_next;
                traj.gamma[[p, j + 1]] = traj.gamma[[p, j]]
                    - 2.0 * chi * er_half * theta_next.cos() * delt
                    + 2.0 * chi * ei_half * theta_next.sin() * delt;
                sum_sin_half += theta_next.sin();
                sum_cos_half += theta_next.cos();
            }

            // Slippage: radiation emitted at (k, j) arrives at (k+1, j+1).
            field.er[[k + 1, j + 1]] =
                field.er[[k, j]] + kappa1 * density * sum_cos_half * inv_n * dels;
            field.ei[[k + 1, j + 1]] =
                field.ei[[k, j]] - kappa1 * density * sum_sin_half * inv_n * dels;

            let mut bunch_re = 0.0;
            let mut bunch_im = 0.0;
            for p in 0..npart {
                let theta = traj.theta[[p, j + 1]];
                bunch_re += theta.cos();
                bunch_im -= theta.sin();
            }
            bunching[[k, j]] = Complex64::new(bunch_re * inv_n, bunch_im * inv_n);
        }
    }

    Ok(IntegratorOutput {
        field,
        trajectories: traj,
        bunching,
        theta0_mean,
    })
}
