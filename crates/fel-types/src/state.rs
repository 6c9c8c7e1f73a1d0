// ─────────────────────────────────────────────────────────────────────
// SCPN FEL Core — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::Array2;

/// Slowly-varying radiation field envelope on the (slice, step) grid.
///
/// Both quadratures are real arrays of shape `(s_steps + 1, z_steps + 1)`:
/// one extra slice row and one extra step column hold the slippage
/// boundary values (radiation emitted at `[k, j]` lands at `[k+1, j+1]`).
/// Only the integrator writes this grid.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldGrid {
    pub s_steps: usize,
    pub z_steps: usize,
    /// In-phase quadrature Er.
    pub er: Array2<f64>,
    /// Quadrature Ei.
    pub ei: Array2<f64>,
}

impl FieldGrid {
    pub fn new(s_steps: usize, z_steps: usize) -> Self {
        FieldGrid {
            s_steps,
            z_steps,
            er: Array2::zeros((s_steps + 1, z_steps + 1)),
            ei: Array2::zeros((s_steps + 1, z_steps + 1)),
        }
    }

    /// Squared field amplitude Er² + Ei² at `[slice, step]`.
    pub fn intensity(&self, slice: usize, step: usize) -> f64 {
        let er = self.er[[slice, step]];
        let ei = self.ei[[slice, step]];
        er * er + ei * ei
    }
}

/// Macro-particle phase/energy trajectories over the step axis.
///
/// `theta` is the full-step phase [rad, unbounded], `gamma` the relative
/// energy deviation in units of mc², both of shape `(npart, z_steps + 1)`.
/// `theta_half` is the staggered leap-frog companion of `theta`, defined
/// at half-integer step offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleTrajectories {
    pub npart: usize,
    pub z_steps: usize,
    pub theta: Array2<f64>,
    pub theta_half: Array2<f64>,
    pub gamma: Array2<f64>,
}

impl ParticleTrajectories {
    pub fn new(npart: usize, z_steps: usize) -> Self {
        ParticleTrajectories {
            npart,
            z_steps,
            theta: Array2::zeros((npart, z_steps + 1)),
            theta_half: Array2::zeros((npart, z_steps + 1)),
            gamma: Array2::zeros((npart, z_steps + 1)),
        }
    }
}
