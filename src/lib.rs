//! Shamir's Secret Sharing over GF(p).
//!
//! A secret integer below a (caller-chosen) prime is split into `n` shares,
//! any `t` of which recover it by Lagrange interpolation.

pub mod bigint_serde;
pub mod error;
pub mod field;
pub mod generator;
pub mod params;
pub mod render;
pub mod sss;

pub use error::*;
pub use field::*;
pub use generator::*;
pub use params::*;
pub use render::*;
pub use sss::*;
