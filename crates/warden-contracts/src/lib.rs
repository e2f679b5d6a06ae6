//! # warden-contracts
//!
//! Shared types and error contracts for the warden permission registry.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions and error types.

pub mod error;
pub mod introspect;
pub mod profile;
pub mod route;
