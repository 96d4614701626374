//! Game rules used by the CFR trainers.
//!
//! ## Available Games
//!
//! - [`rps`]: Rock-Paper-Scissors, the 3-action cyclic zero-sum game whose
//!   unique Nash equilibrium is the uniform strategy

pub mod rps;
