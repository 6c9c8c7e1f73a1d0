//! Mathematical primitives for SCPN FEL Core.

pub mod bessel;
