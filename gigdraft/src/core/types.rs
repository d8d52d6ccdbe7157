//! Shared deterministic types for the gig wizard core.
//!
//! These types define stable contracts between core components. They must not
//! depend on external state or I/O.

use serde::{Deserialize, Serialize};

/// Maximum number of skills a draft may carry.
pub const MAX_SKILLS: usize = 5;

/// Input-level cap on the gig title, counted in characters.
pub const TITLE_MAX_CHARS: usize = 80;

/// Placeholder budget shown before the user enters an amount.
///
/// This is display-only: an untouched budget is not a valid amount.
pub const BUDGET_PLACEHOLDER: u64 = 5000;

/// Category id that requires a user-supplied label.
pub const OTHER_CATEGORY: &str = "other";

/// Ordered wizard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    Category,
    Details,
    Budget,
    Attachments,
    Review,
    Submitted,
}

impl WizardStep {
    /// All steps in navigation order.
    pub const ALL: [WizardStep; 6] = [
        WizardStep::Category,
        WizardStep::Details,
        WizardStep::Budget,
        WizardStep::Attachments,
        WizardStep::Review,
        WizardStep::Submitted,
    ];

    /// Steps whose fields are entered by the user (everything before `Submitted`).
    pub const EDITABLE: [WizardStep; 5] = [
        WizardStep::Category,
        WizardStep::Details,
        WizardStep::Budget,
        WizardStep::Attachments,
        WizardStep::Review,
    ];

    pub fn following(self) -> Option<WizardStep> {
        match self {
            WizardStep::Category => Some(WizardStep::Details),
            WizardStep::Details => Some(WizardStep::Budget),
            WizardStep::Budget => Some(WizardStep::Attachments),
            WizardStep::Attachments => Some(WizardStep::Review),
            WizardStep::Review => Some(WizardStep::Submitted),
            WizardStep::Submitted => None,
        }
    }

    pub fn preceding(self) -> Option<WizardStep> {
        match self {
            WizardStep::Category => None,
            WizardStep::Details => Some(WizardStep::Category),
            WizardStep::Budget => Some(WizardStep::Details),
            WizardStep::Attachments => Some(WizardStep::Budget),
            WizardStep::Review => Some(WizardStep::Attachments),
            WizardStep::Submitted => Some(WizardStep::Review),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Category => "category",
            WizardStep::Details => "details",
            WizardStep::Budget => "budget",
            WizardStep::Attachments => "attachments",
            WizardStep::Review => "review",
            WizardStep::Submitted => "submitted",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How the poster intends to pay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    #[default]
    Fixed,
    Hourly,
    Milestone,
}

/// Reference to a file attached to a gig. Contents are never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}
