//! Stable exit codes for `gigdraft` CLI commands.

/// Command succeeded (draft complete, gig submitted).
pub const OK: i32 = 0;
/// Command failed due to invalid config, draft file or a rejected submission.
pub const INVALID: i32 = 1;
/// `gigdraft check` found at least one blocked step.
pub const INCOMPLETE: i32 = 2;
/// `gigdraft submit` was cancelled before the submission resolved.
pub const CANCELLED: i32 = 3;
