//! Shared identity-provider utilities for the NexusPulse client.
//!
//! This crate carries the provider-facing half of authentication: building
//! authorization and end-session URLs for the configured Keycloak realm,
//! interpreting redirect callbacks, and generating CSRF state tokens. It is
//! deliberately free of any NexusPulse-internal dependencies so the session
//! layer can mock it at the trait seams.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;
