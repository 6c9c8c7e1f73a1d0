// ─────────────────────────────────────────────────────────────────────
// SCPN FEL Core — Bessel
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Bessel functions of the first kind, J0(x) and J1(x).
//!
//! Uses Abramowitz & Stegun polynomial approximations (Handbook of
//! Mathematical Functions, 9.4.1–9.4.6): a rational polynomial for
//! |x| <= 3 and an asymptotic modulus/phase expansion beyond.

/// Bessel function of the first kind J0(x).
///
/// Accuracy: |error| < 2e-7 over the real line.
pub fn j0(x: f64) -> f64 {
    let ax = x.abs();
    if ax <= 3.0 {
        // A&S 9.4.1
        let t = (ax / 3.0) * (ax / 3.0);
        1.0 + t * (-2.249_999_7
            + t * (1.265_620_8
                + t * (-0.316_386_6
                    + t * (0.044_447_9 + t * (-0.003_944_4 + t * 0.000_210_0)))))
    } else {
        // A&S 9.4.3
        let u = 3.0 / ax;
        let f0 = 0.797_884_56
            + u * (-0.000_000_77
                + u * (-0.005_527_40
                    + u * (-0.000_095_12
                        + u * (0.001_372_37
                            + u * (-0.000_728_05 + u * 0.000_144_76)))));
        let theta0 = ax - 0.785_398_16
            + u * (-0.041_663_97
                + u * (-0.000_039_54
                    + u * (0.002_625_73
                        + u * (-0.000_541_25
                            + u * (-0.000_293_33 + u * 0.000_135_58)))));
        f0 * theta0.cos() / ax.sqrt()
    }
}

/// Bessel function of the first kind J1(x).
///
/// Accuracy: |error| < 2e-7 over the real line.
pub fn j1(x: f64) -> f64 {
    let ax = x.abs();
    let value = if ax <= 3.0 {
        // A&S 9.4.4, expressed as J1(x)/x
        let t = (ax / 3.0) * (ax / 3.0);
        ax * (0.5
            + t * (-0.562_499_85
                + t * (0.210_935_73
                    + t * (-0.039_542_89
                        + t * (0.004_433_19
                            + t * (-0.000_317_61 + t * 0.000_011_09))))))
    } else {
        // A&S 9.4.6
        let u = 3.0 / ax;
        let f1 = 0.797_884_56
            + u * (0.000_001_56
                + u * (0.016_596_67
                    + u * (0.000_171_05
                        + u * (-0.002_495_11
                            + u * (0.001_136_53 + u * (-0.000_200_33))))));
        let theta1 = ax - 2.356_194_49
            + u * (0.124_996_12
                + u * (0.000_056_50
                    + u * (-0.006_378_79
                        + u * (0.000_743_48
                            + u * (0.000_798_24 + u * (-0.000_291_66))))));
        f1 * theta1.cos() / ax.sqrt()
    };
    if x < 0.0 {
        -value
    } else {
        value
    }
}
