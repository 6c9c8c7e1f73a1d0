// ─────────────────────────────────────────────────────────────────────
// SCPN FEL Core — Lattice
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Physical parameter derivation: raw beam/undulator inputs to the
//! Kim-Huang-Lindberg coupling constants and scaled quantities consumed
//! by the integrator.
//!
//! Uniform and tapered undulators share one code path: every coefficient
//! that becomes step-dependent under taper is a [`StepProfile`], and the
//! integrator looks coefficients up per step through `StepProfile::at`.

use std::f64::consts::PI;

use fel_math::bessel::{j0, j1};
use fel_types::config::{FelConfig, UndulatorK};
use fel_types::constants::{ALFVEN_CURRENT_A, C_LIGHT, EPSILON_0, MC2_EV, Q_ELECTRON};
use fel_types::error::FelResult;

/// A per-step physical coefficient: one scalar for a uniform undulator,
/// one value per z step for a tapered one.
#[derive(Debug, Clone, PartialEq)]
pub enum StepProfile {
    Uniform(f64),
    Tapered(Vec<f64>),
}

impl StepProfile {
    /// Value at step `j`. Tapered profiles clamp at their last entry, so
    /// lookups at the boundary column `z_steps` stay in range.
    pub fn at(&self, j: usize) -> f64 {
        match self {
            StepProfile::Uniform(value) => *value,
            StepProfile::Tapered(values) => values[j.min(values.len() - 1)],
        }
    }

    /// Value at the undulator entrance.
    pub fn entry(&self) -> f64 {
        self.at(0)
    }
}

/// Undulator JJ coupling factor J0(ξ) − J1(ξ) with ξ = K²/(4 + 2K²).
pub fn undulator_jj(k: f64) -> f64 {
    let xi = k * k / (4.0 + 2.0 * k * k);
    j0(xi) - j1(xi)
}

/// Derived coefficients for one run.
///
/// κ₁ and χ are the field/particle coupling constants of the KHL
/// formalism; ρ is the Pierce parameter. All three are per-step under
/// taper. Step sizes satisfy `delt == dels` by construction.
#[derive(Debug, Clone)]
pub struct Lattice {
    pub s_steps: usize,
    pub z_steps: usize,
    /// Central beam energy in units of mc².
    pub gamma0: f64,
    /// rms transverse beam size squared [m²].
    pub sigma_x2: f64,
    /// Field coupling constant κ₁.
    pub kappa1: StepProfile,
    /// Particle energy coupling constant χ [1/eV].
    pub chi: StepProfile,
    /// Pierce parameter ρ.
    pub rho: StepProfile,
    /// Electron density [1/m³].
    pub density: f64,
    /// Undulator wavenumber k_u [1/m].
    pub ku: f64,
    /// Resonant wavelength [m].
    pub res_wavelength_m: f64,
    /// Electron beam power [W].
    pub pbeam_w: f64,
    /// Cooperation length scale for the bunch axis.
    pub coop_length: f64,
    /// Theoretical 1D gain length [m].
    pub gain_length_m: f64,
    /// Integration step along the undulator [m].
    pub delt: f64,
    /// Integration step along the bunch, equal to `delt`.
    pub dels: f64,
    /// Scaled input seed power E0².
    pub e02: f64,
    /// Scaled detuning (λ_r − λ_s)/λ_s.
    pub gbar: f64,
    /// Electrons per bunch slice.
    pub ns: f64,
}

/// Derive all run coefficients from a validated configuration.
///
/// Closed-form arithmetic only; out-of-domain inputs are a caller
/// contract violation and are rejected by `FelConfig::validate` here.
pub fn derive(config: &FelConfig) -> FelResult<Lattice> {
    config.validate()?;

    let gamma0 = config.energy_ev / MC2_EV;
    let sigma_x2 = config.emit_n * config.beta_m / gamma0;
    let density = config.current_peak_a / (Q_ELECTRON * C_LIGHT * 2.0 * PI * sigma_x2);
    let ku = 2.0 * PI / config.undu_period_m;
    let pbeam_w = config.energy_ev * config.current_peak_a;

    let kappa1_of = |k: f64| Q_ELECTRON * k * undulator_jj(k) / (4.0 * EPSILON_0 * gamma0);
    let chi_of = |k: f64| k * undulator_jj(k) / (2.0 * gamma0 * gamma0 * MC2_EV);
    let rho_of = |k: f64| {
        let drive = (config.current_peak_a / ALFVEN_CURRENT_A)
            * (config.undu_period_m * k * undulator_jj(k) / (2.0 * PI)).powi(2)
            / (2.0 * sigma_x2);
        (0.5 / gamma0) * drive.cbrt()
    };

    let (kappa1, chi, rho, k_entry) = match &config.undu_k {
        UndulatorK::Uniform(k) => (
            StepProfile::Uniform(kappa1_of(*k)),
            StepProfile::Uniform(chi_of(*k)),
            StepProfile::Uniform(rho_of(*k)),
            *k,
        ),
        UndulatorK::Tapered(profile) => (
            StepProfile::Tapered(profile.iter().map(|&k| kappa1_of(k)).collect()),
            StepProfile::Tapered(profile.iter().map(|&k| chi_of(k)).collect()),
            StepProfile::Tapered(profile.iter().map(|&k| rho_of(k)).collect()),
            profile[0],
        ),
    };

    let res_wavelength_m =
        config.undu_period_m * (1.0 + k_entry * k_entry / 2.0) / (2.0 * gamma0 * gamma0);
    let coop_length = match &config.undu_k {
        UndulatorK::Uniform(_) => res_wavelength_m / config.undu_period_m,
        UndulatorK::Tapered(_) => res_wavelength_m / (4.0 * PI * rho.entry()),
    };
    let gain_length_m = config.undu_period_m / (4.0 * 3.0_f64.sqrt() * PI * rho.entry());

    let delt = config.undu_l_m / config.z_steps as f64;
    let dels = delt;

    let e02 = density * kappa1.entry() * config.seed_power_w * 1.0e-9 / (pbeam_w * chi.entry());
    let gbar = (res_wavelength_m - config.rad_wavelength_m) / config.rad_wavelength_m;
    let ns = config.current_peak_a * config.undu_l_m
        / (config.undu_period_m * config.z_steps as f64)
        * res_wavelength_m
        / (C_LIGHT * Q_ELECTRON);

    Ok(Lattice {
        s_steps: config.s_steps,
        z_steps: config.z_steps,
        gamma0,
        sigma_x2,
        kappa1,
        chi,
        rho,
        density,
        ku,
        res_wavelength_m,
        pbeam_w,
        coop_length,
        gain_length_m,
        delt,
        dels,
        e02,
        gbar,
        ns,
    })
}

/// Per-step K profile for a constant relative taper rate along z.
///
/// `relative_slope_per_m` < 0 weakens the undulator with distance.
pub fn linear_taper(
    k0: f64,
    relative_slope_per_m: f64,
    undu_l_m: f64,
    z_steps: usize,
) -> Vec<f64> {
    let delt = undu_l_m / z_steps as f64;
    (0..z_steps)
        .map(|j| k0 * (1.0 + relative_slope_per_m * j as f64 * delt))
        .collect()
}
