//! Step definitions for recurring task BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
