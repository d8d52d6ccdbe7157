//! Gig posting wizard: draft accumulation, step validation and submission.
//!
//! The architecture keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (validators, draft merging, the
//!   step controller, finalization, modal state). No I/O.
//! - **[`io`]**: Side-effecting operations (config and draft files, the
//!   onboarding cache, asynchronous submission).
//!
//! [`session`] couples the two into a single wizard session driven by the CLI.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
