//! Post-hoc reduction of raw field/particle history into observables.

pub mod reducer;
