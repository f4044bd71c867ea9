//! The firework simulation: particles, rockets and the field that launches
//! and retires them.

pub mod field;
pub mod firework;
pub mod particle;

pub use field::FireworkField;
