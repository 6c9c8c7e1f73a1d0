// ─────────────────────────────────────────────────────────────────────
// SCPN FEL Core — Bucket
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Macro-particle bucket loader.
//!
//! Quiet (beamlet) loading: phases are laid out uniformly within each
//! beamlet to cancel discreteness noise, and each beamlet draws a single
//! Gaussian energy. In SASE mode a per-particle phase jitter scaled by
//! the Penman factor restores the physical level of shot noise.

use std::f64::consts::PI;

use ndarray::Array1;
use rand::Rng;
use rand_distr::StandardNormal;

use fel_types::config::FelMode;
use fel_types::error::{FelError, FelResult};

/// Particles per beamlet for seeded (single-frequency) loading.
const SEEDED_BEAMLET: usize = 128;

/// Particles per beamlet for SASE shot-noise loading.
const SASE_BEAMLET: usize = 4;

/// Beamlet size used by `mode`.
pub fn beamlet_size(mode: FelMode) -> usize {
    match mode {
        FelMode::Seeded => SEEDED_BEAMLET,
        FelMode::Sase => SASE_BEAMLET,
    }
}

/// Load initial phase/energy arrays for one bunch slice.
///
/// `gbar` is the scaled detuning, `delg` the rms Gaussian energy spread
/// and `ns` the number of electrons in the slice (used only for the SASE
/// shot-noise amplitude). The RNG is an explicit stream owned by the
/// caller, so successive slices draw from one continuing sequence.
pub fn load_bucket<R: Rng>(
    rng: &mut R,
    npart: usize,
    gbar: f64,
    delg: f64,
    mode: FelMode,
    ns: f64,
) -> FelResult<(Array1<f64>, Array1<f64>)> {
    let m = beamlet_size(mode);
    if npart == 0 || npart % m != 0 {
        return Err(FelError::PhysicsViolation(format!(
            "npart must be a positive multiple of the beamlet size {m}, got {npart}"
        )));
    }
    let nb = npart / m;

    let mut theta = Array1::zeros(npart);
    let mut gamma = Array1::zeros(npart);

    match mode {
        FelMode::Seeded => {
            for b in 0..nb {
                let g: f64 = gbar + delg * rng.sample::<f64, _>(StandardNormal);
                for p in 0..m {
                    theta[b * m + p] = 2.0 * PI * (p + 1) as f64 / m as f64;
                    gamma[b * m + p] = g;
                }
            }
        }
        FelMode::Sase => {
            if !ns.is_finite() || ns <= 0.0 {
                return Err(FelError::PhysicsViolation(format!(
                    "SASE loading needs a positive electron count per slice, got {ns}"
                )));
            }
            // Penman shot-noise amplitude.
            let eff_noise = (3.0 * m as f64 / (ns / nb as f64)).sqrt();
            for b in 0..nb {
                let g: f64 = gbar + delg * rng.sample::<f64, _>(StandardNormal);
                for p in 0..m {
                    theta[b * m + p] = 2.0 * PI * (p + 1) as f64 / m as f64
                        + 2.0 * rng.gen::<f64>() * eff_noise;
                    gamma[b * m + p] = g;
                }
            }
        }
    }

    Ok((theta, gamma))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rejects_npart_not_multiple_of_beamlet() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(load_bucket(&mut rng, 510, 0.0, 1e-4, FelMode::Sase, 1e6).is_err());
        assert!(load_bucket(&mut rng, 100, 0.0, 1e-4, FelMode::Seeded, 1e6).is_err());
        assert!(load_bucket(&mut rng, 0, 0.0, 1e-4, FelMode::Sase, 1e6).is_err());
    }

    #[test]
    fn test_sase_rejects_empty_slice() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(load_bucket(&mut rng, 512, 0.0, 1e-4, FelMode::Sase, 0.0).is_err());
        assert!(load_bucket(&mut rng, 512, 0.0, 1e-4, FelMode::Sase, f64::NAN).is_err());
    }

    #[test]
    fn test_array_lengths_match_npart() {
        let mut rng = StdRng::seed_from_u64(2);
        let (theta, gamma) = load_bucket(&mut rng, 512, 0.0, 1e-4, FelMode::Sase, 1e6).unwrap();
        assert_eq!(theta.len(), 512);
        assert_eq!(gamma.len(), 512);
    }

    #[test]
    fn test_seeded_loading_is_quiet() {
        // Uniformly spaced beamlet phases cancel the first harmonic almost
        // exactly; the residual bunching of a quiet load is tiny.
        let mut rng = StdRng::seed_from_u64(3);
        let (theta, _) = load_bucket(&mut rng, 1024, 0.0, 1e-4, FelMode::Seeded, 1e6).unwrap();
        let b: Complex64 = theta
            .iter()
            .map(|&t| Complex64::new(0.0, -t).exp())
            .sum::<Complex64>()
            / 1024.0;
        assert!(b.norm() < 1e-10, "quiet load bunching = {}", b.norm());
    }

    #[test]
    fn test_sase_loading_carries_shot_noise() {
        let mut rng = StdRng::seed_from_u64(4);
        let (theta, _) = load_bucket(&mut rng, 512, 0.0, 0.0, FelMode::Sase, 1.4e6).unwrap();
        let b: Complex64 = theta
            .iter()
            .map(|&t| Complex64::new(0.0, -t).exp())
            .sum::<Complex64>()
            / 512.0;
        assert!(b.norm() > 1e-6, "shot noise missing: |b| = {}", b.norm());
        assert!(b.norm() < 0.2, "shot noise too strong: |b| = {}", b.norm());
    }

    #[test]
    fn test_energy_spread_statistics() {
        let mut rng = StdRng::seed_from_u64(5);
        let delg = 1.0e-4;
        let (_, gamma) = load_bucket(&mut rng, 8192, 0.0, delg, FelMode::Sase, 1e6).unwrap();
        let mean = gamma.iter().sum::<f64>() / gamma.len() as f64;
        let var =
            gamma.iter().map(|&g| (g - mean) * (g - mean)).sum::<f64>() / gamma.len() as f64;
        assert!(mean.abs() < 5.0 * delg);
        let sigma = var.sqrt();
        assert!(
            (sigma - delg).abs() < 0.15 * delg,
            "sampled spread {sigma} vs requested {delg}"
        );
    }

    #[test]
    fn test_detuning_offsets_mean_energy() {
        let mut rng = StdRng::seed_from_u64(6);
        let gbar = 3.0e-3;
        let (_, gamma) = load_bucket(&mut rng, 512, gbar, 0.0, FelMode::Seeded, 1e6).unwrap();
        assert!(gamma.iter().all(|&g| (g - gbar).abs() < 1e-15));
    }
}
