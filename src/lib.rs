//! Fleet tasks: task lifecycle for a fleet and inventory management app.
//!
//! This crate holds the structured core behind the task screens: status
//! changes, rescheduling, checklists, assignment, and recurring task
//! generation.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, checklists, assignment, and recurrence
//! - [`session`]: Explicitly passed current-user context

pub mod session;
pub mod task;
