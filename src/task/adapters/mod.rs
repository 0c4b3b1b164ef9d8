//! Persistence adapters for the task module.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryTaskRepository`]: Thread-safe in-memory storage used
//!   by tests and by hosts that keep the object graph in process.

pub mod memory;
