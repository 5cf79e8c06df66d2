//! # NexusPulse App
//!
//! Application layer - startup wiring and shared context.
//!
//! This crate contains:
//! - The application context (dependency injection)
//! - Telemetry initialization
//!
//! ## Architecture
//! - Depends on `common`, `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Hands the view layer one shared [`AppContext`]

#![forbid(unsafe_code)]

pub mod context;
pub mod telemetry;

pub use context::AppContext;
pub use telemetry::init_tracing;
