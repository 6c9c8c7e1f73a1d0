// ─────────────────────────────────────────────────────────────────────
// SCPN FEL Core — Reducer
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Pure transforms from the raw field grid and particle trajectories to
//! power profiles, complex field, average energy and axes.
//!
//! These functions never mutate their inputs and never feed back into
//! the dynamics; normalizations follow Kim-Huang-Lindberg scaled units.

use fel_types::state::FieldGrid;
use ndarray::{Array1, Array2};
use num_complex::Complex64;
use std::f64::consts::PI;

use fel_types::constants::{C_LIGHT, EPSILON_0};

/// Power normalization 4π ε₀ σx² c combining vacuum permittivity,
/// transverse beam area and light speed.
pub fn power_norm(sigma_x2: f64) -> f64 {
    4.0 * PI * EPSILON_0 * sigma_x2 * C_LIGHT
}

/// Radiation power along the undulator and along the bunch.
///
/// `power_s[j, k]` is the instantaneous power of slice `k` at step `j`,
/// read from the slipped row `k + 1`. `power_z[j]` is the squared field
/// amplitude summed over all slice rows and divided by `s_steps`: a
/// spatial average of power density along the bunch, not a total. That
/// normalization is load-bearing for all downstream power scales.
pub fn power_profiles(field: &FieldGrid, sigma_x2: f64) -> (Array1<f64>, Array2<f64>) {
    let norm = power_norm(sigma_x2);
    let s_steps = field.s_steps;
    let z_steps = field.z_steps;
    let mut power_s = Array2::zeros((z_steps, s_steps));
    let mut power_z = Array1::zeros(z_steps);
    for j in 0..z_steps {
        for k in 0..s_steps {
            power_s[[j, k]] = field.intensity(k + 1, j) * norm;
        }
        let mut total = 0.0;
        for k in 0..=s_steps {
            total += field.intensity(k, j);
        }
        power_z[j] = total * norm / s_steps as f64;
    }
    (power_z, power_s)
}

/// Ensemble-averaged particle energy at every undulator step.
///
/// `gamma` has shape `(npart, z_steps + 1)`; entry `j` of the result is
/// the particle mean of column `j + 1`.
pub fn mean_energy(gamma: &Array2<f64>) -> Array1<f64> {
    let npart = gamma.nrows();
    let z_steps = gamma.ncols() - 1;
    let mut avg = Array1::zeros(z_steps);
    for j in 0..z_steps {
        let mut sum = 0.0;
        for p in 0..npart {
            sum += gamma[[p, j + 1]];
        }
        avg[j] = sum / npart as f64;
    }
    avg
}

/// Complex field along the bunch at the final undulator step.
///
/// `scale` converts the dimensionless quadratures to field units:
/// √(χ/(n κ₁) · P_beam).
pub fn exit_field(field: &FieldGrid, scale: f64) -> Array1<Complex64> {
    let z = field.z_steps;
    Array1::from_iter(
        (0..=field.s_steps)
            .map(|k| Complex64::new(field.er[[k, z]], field.ei[[k, z]]) * scale),
    )
}

/// Complex field along the bunch at every undulator step.
pub fn field_history(field: &FieldGrid, scale: f64) -> Array2<Complex64> {
    Array2::from_shape_fn((field.s_steps + 1, field.z_steps + 1), |(k, j)| {
        Complex64::new(field.er[[k, j]], field.ei[[k, j]]) * scale
    })
}

/// Symmetric frequency-deviation axis of length `s_steps + 1`, centered
/// on zero and spaced by 2π/(dels · s_steps).
pub fn detune_axis(s_steps: usize, dels: f64) -> Array1<f64> {
    let spacing = 2.0 * PI / (dels * s_steps as f64);
    Array1::from_iter((0..=s_steps).map(|i| spacing * (i as f64 - s_steps as f64 / 2.0)))
}

/// Step positions along the undulator [m]: z[j] = (j + 1) · delt.
pub fn undulator_axis(z_steps: usize, delt: f64) -> Array1<f64> {
    Array1::from_iter((1..=z_steps).map(|j| j as f64 * delt))
}

/// Slice positions along the bunch [µm]: s[k] = (k + 1) · dels · L_coop · 1e6.
pub fn bunch_axis(s_steps: usize, dels: f64, coop_length: f64) -> Array1<f64> {
    Array1::from_iter((1..=s_steps).map(|k| k as f64 * dels * coop_length * 1.0e6))
}
