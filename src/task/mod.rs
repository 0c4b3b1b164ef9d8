//! Task lifecycle management.
//!
//! Status changes are deliberately permissive: any status may be set from
//! any other. Completing a recurring task does not spawn its successor on
//! its own; callers ask for it through
//! [`services::TaskLifecycleService::create_next_recurring_task`]. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
