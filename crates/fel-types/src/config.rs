// ─────────────────────────────────────────────────────────────────────
// SCPN FEL Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::error::{FelError, FelResult};

/// Operating mode of the amplifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FelMode {
    /// Self-amplified spontaneous emission: start-up from beam shot noise.
    Sase,
    /// Externally seeded single-frequency run.
    Seeded,
}

/// Undulator strength parameter K: a single value for a uniform undulator,
/// or one value per z step for a tapered one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UndulatorK {
    Uniform(f64),
    Tapered(Vec<f64>),
}

/// Top-level simulation configuration for one 1D FEL run.
///
/// All fields are immutable inputs; `validate()` is the single gate that
/// rejects non-physical values before any derivation or integration runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FelConfig {
    /// Macro-particles per bunch slice.
    pub npart: usize,
    /// Sample slices along the bunch.
    pub s_steps: usize,
    /// Integration steps along the undulator.
    pub z_steps: usize,
    /// Electron beam energy [eV].
    pub energy_ev: f64,
    /// Relative rms energy spread.
    pub e_spread: f64,
    /// Normalized transverse emittance [m rad].
    pub emit_n: f64,
    /// Peak current [A].
    pub current_peak_a: f64,
    /// Mean beta function [m].
    pub beta_m: f64,
    /// Undulator period [m].
    pub undu_period_m: f64,
    /// Undulator parameter K.
    pub undu_k: UndulatorK,
    /// Undulator length [m].
    pub undu_l_m: f64,
    /// Seed radiation wavelength [m].
    pub rad_wavelength_m: f64,
    /// Operating mode.
    pub mode: FelMode,
    /// Input seed power [W].
    pub seed_power_w: f64,
    /// Re-seed the particle loader RNG with a fixed value once per run.
    pub const_seed: bool,
}

fn require_positive(value: f64, name: &str) -> FelResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(FelError::ConfigError(format!(
            "{name} must be finite and > 0, got {value}"
        )));
    }
    Ok(())
}

fn require_non_negative(value: f64, name: &str) -> FelResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(FelError::ConfigError(format!(
            "{name} must be finite and >= 0, got {value}"
        )));
    }
    Ok(())
}

impl FelConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> FelResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Reject invalid configurations before integration begins.
    ///
    /// Counts must be >= 1, all reals finite, and strictly positive where
    /// the derivation divides by them. A tapered K profile must carry one
    /// value per undulator step.
    pub fn validate(&self) -> FelResult<()> {
        if self.npart == 0 {
            return Err(FelError::ConfigError("npart must be >= 1".to_string()));
        }
        if self.s_steps == 0 {
            return Err(FelError::ConfigError("s_steps must be >= 1".to_string()));
        }
        if self.z_steps == 0 {
            return Err(FelError::ConfigError("z_steps must be >= 1".to_string()));
        }
        require_positive(self.energy_ev, "energy_ev")?;
        require_non_negative(self.e_spread, "e_spread")?;
        require_positive(self.emit_n, "emit_n")?;
        require_positive(self.current_peak_a, "current_peak_a")?;
        require_positive(self.beta_m, "beta_m")?;
        require_positive(self.undu_period_m, "undu_period_m")?;
        require_positive(self.undu_l_m, "undu_l_m")?;
        require_positive(self.rad_wavelength_m, "rad_wavelength_m")?;
        require_non_negative(self.seed_power_w, "seed_power_w")?;
        match &self.undu_k {
            UndulatorK::Uniform(k) => require_positive(*k, "undu_k")?,
            UndulatorK::Tapered(profile) => {
                if profile.len() != self.z_steps {
                    return Err(FelError::ConfigError(format!(
                        "tapered undu_k must carry one value per z step: \
                         expected {}, got {}",
                        self.z_steps,
                        profile.len()
                    )));
                }
                for (j, k) in profile.iter().enumerate() {
                    if !k.is_finite() || *k <= 0.0 {
                        return Err(FelError::ConfigError(format!(
                            "undu_k[{j}] must be finite and > 0, got {k}"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lcls_like() -> FelConfig {
        FelConfig {
            npart: 512,
            s_steps: 20,
            z_steps: 50,
            energy_ev: 4313.34e6,
            e_spread: 0.0,
            emit_n: 1.2e-6,
            current_peak_a: 3400.0,
            beta_m: 26.0,
            undu_period_m: 0.03,
            undu_k: UndulatorK::Uniform(3.5),
            undu_l_m: 20.0,
            rad_wavelength_m: 1.5e-9,
            mode: FelMode::Sase,
            seed_power_w: 1.0e4,
            const_seed: true,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        lcls_like().validate().unwrap();
    }

    #[test]
    fn test_zero_counts_rejected() {
        for field in ["npart", "s_steps", "z_steps"] {
            let mut cfg = lcls_like();
            match field {
                "npart" => cfg.npart = 0,
                "s_steps" => cfg.s_steps = 0,
                _ => cfg.z_steps = 0,
            }
            let err = cfg.validate().unwrap_err();
            match err {
                FelError::ConfigError(msg) => assert!(msg.contains(field)),
                other => panic!("Unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_non_finite_parameters_rejected() {
        let mut cfg = lcls_like();
        cfg.energy_ev = f64::NAN;
        assert!(cfg.validate().is_err());

        let mut cfg = lcls_like();
        cfg.current_peak_a = f64::INFINITY;
        assert!(cfg.validate().is_err());

        let mut cfg = lcls_like();
        cfg.e_spread = -1.0e-4;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_negative_seed_power_rejected() {
        let mut cfg = lcls_like();
        cfg.seed_power_w = -1.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_taper_length_mismatch_rejected() {
        let mut cfg = lcls_like();
        cfg.undu_k = UndulatorK::Tapered(vec![3.5; cfg.z_steps - 1]);
        let err = cfg.validate().unwrap_err();
        match err {
            FelError::ConfigError(msg) => assert!(msg.contains("one value per z step")),
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_taper_with_bad_entry_rejected() {
        let mut cfg = lcls_like();
        let mut profile = vec![3.5; cfg.z_steps];
        profile[7] = -0.1;
        cfg.undu_k = UndulatorK::Tapered(profile);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_roundtrip_serialization() {
        let cfg = lcls_like();
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let cfg2: FelConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.npart, cfg2.npart);
        assert_eq!(cfg.mode, cfg2.mode);
        assert_eq!(cfg.undu_k, cfg2.undu_k);
        assert!((cfg.energy_ev - cfg2.energy_ev).abs() < 1e-6);
    }

    #[test]
    fn test_tapered_k_deserializes_from_array() {
        let json = r#"{
            "npart": 4096, "s_steps": 10, "z_steps": 3,
            "energy_ev": 4.3e9, "e_spread": 1e-4, "emit_n": 1.2e-6,
            "current_peak_a": 3400.0, "beta_m": 26.0,
            "undu_period_m": 0.03, "undu_k": [3.5, 3.49, 3.48],
            "undu_l_m": 30.0, "rad_wavelength_m": 1.5e-9,
            "mode": "sase", "seed_power_w": 1e4, "const_seed": true
        }"#;
        let cfg: FelConfig = serde_json::from_str(json).unwrap();
        match cfg.undu_k {
            UndulatorK::Tapered(ref profile) => assert_eq!(profile.len(), 3),
            ref other => panic!("Expected tapered profile, got {other:?}"),
        }
        cfg.validate().unwrap();
    }
}
