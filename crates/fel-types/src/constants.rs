// ─────────────────────────────────────────────────────────────────────
// SCPN FEL Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Alfvén current [A], ~17 kA.
pub const ALFVEN_CURRENT_A: f64 = 17045.0;

/// Electron rest mass energy [eV].
pub const MC2_EV: f64 = 0.51099906e6;

/// Speed of light [m/s].
pub const C_LIGHT: f64 = 2.99792458e8;

/// Elementary charge [C].
pub const Q_ELECTRON: f64 = 1.60217733e-19;

/// Vacuum permittivity [F/m].
pub const EPSILON_0: f64 = 8.85418782e-12;
