//! # remedy-contracts
//!
//! Shared types, error kinds, and report shapes for the Remedy
//! decision-support workspace.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate: only data definitions, input validation, and error types.

pub mod advisory;
pub mod consultation;
pub mod error;
pub mod patient;
pub mod risk;
pub mod symptom;
