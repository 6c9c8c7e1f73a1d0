//! One-dimensional SASE/seeded FEL core.
//!
//! Kim-Huang-Lindberg coupled particle/field formalism: parameter
//! derivation, quiet bucket loading, and the slice/step leap-frog
//! integrator with slippage coupling.

pub mod bucket;
pub mod integrator;
pub mod lattice;
pub mod sase;
