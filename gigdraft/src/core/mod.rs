//! Deterministic, pure logic for the gig posting wizard.
//!
//! Core modules must be free of I/O side effects. Randomness enters only
//! through caller-supplied `Rng` values so tests stay deterministic.

pub mod controller;
pub mod draft;
pub mod finalize;
pub mod manifest;
pub mod modal;
pub mod types;
pub mod validators;
