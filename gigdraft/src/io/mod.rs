//! I/O helpers for wizard commands.

pub mod config;
pub mod draft_store;
pub mod onboarding;
pub mod submitter;
