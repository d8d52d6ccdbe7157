//! Draft values accumulated across wizard steps.
//!
//! A [`GigDraft`] is never edited in place by the wizard. Each step hands a
//! [`StepOutput`] to [`advance`], which returns a new draft layered on top of
//! the previous one.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::types::{FileRef, MAX_SKILLS, PaymentType, TITLE_MAX_CHARS, WizardStep};

/// A gig being composed, possibly partially filled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GigDraft {
    pub category: Option<String>,
    pub custom_category_label: Option<String>,
    pub title: String,
    pub description: String,
    pub skills: BTreeSet<String>,
    pub payment_type: PaymentType,
    pub amount: Option<u64>,
    pub deadline: Option<NaiveDate>,
    pub attachments: Vec<FileRef>,
    pub agreed_to_terms: bool,
}

/// Fields entered on a single step. `None` means "not touched by this step".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepOutput {
    pub category: Option<String>,
    pub custom_category_label: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Replaces the skill set; entries past [`MAX_SKILLS`] are dropped.
    pub skills: Option<Vec<String>>,
    pub payment_type: Option<PaymentType>,
    pub amount: Option<u64>,
    pub deadline: Option<NaiveDate>,
    pub attachments: Option<Vec<FileRef>>,
    pub agreed_to_terms: Option<bool>,
}

impl GigDraft {
    /// Extract the fields owned by `step`, as that step's screen would emit them.
    ///
    /// `Submitted` owns no fields and yields an empty output.
    pub fn step_output(&self, step: WizardStep) -> StepOutput {
        match step {
            WizardStep::Category => StepOutput {
                category: self.category.clone(),
                custom_category_label: self.custom_category_label.clone(),
                ..StepOutput::default()
            },
            WizardStep::Details => StepOutput {
                title: Some(self.title.clone()),
                description: Some(self.description.clone()),
                skills: Some(self.skills.iter().cloned().collect()),
                ..StepOutput::default()
            },
            WizardStep::Budget => StepOutput {
                payment_type: Some(self.payment_type),
                amount: self.amount,
                deadline: self.deadline,
                ..StepOutput::default()
            },
            WizardStep::Attachments => StepOutput {
                attachments: Some(self.attachments.clone()),
                ..StepOutput::default()
            },
            WizardStep::Review => StepOutput {
                agreed_to_terms: Some(self.agreed_to_terms),
                ..StepOutput::default()
            },
            WizardStep::Submitted => StepOutput::default(),
        }
    }
}

/// Layer `output` on top of `draft`, carrying every untouched field forward.
pub fn advance(draft: &GigDraft, output: &StepOutput) -> GigDraft {
    let mut next = draft.clone();

    if let Some(category) = &output.category {
        next.category = Some(category.clone());
    }
    if let Some(label) = &output.custom_category_label {
        next.custom_category_label = Some(label.clone());
    }
    if let Some(title) = &output.title {
        next.title = cap_title(title);
    }
    if let Some(description) = &output.description {
        next.description = description.clone();
    }
    if let Some(skills) = &output.skills {
        next.skills = BTreeSet::new();
        for skill in skills {
            next.skills = insert_skill(next.skills, skill);
        }
    }
    if let Some(payment_type) = output.payment_type {
        next.payment_type = payment_type;
    }
    if let Some(amount) = output.amount {
        next.amount = Some(amount);
    }
    if let Some(deadline) = output.deadline {
        next.deadline = Some(deadline);
    }
    if let Some(attachments) = &output.attachments {
        next.attachments = attachments.clone();
    }
    if let Some(agreed) = output.agreed_to_terms {
        next.agreed_to_terms = agreed;
    }

    next
}

/// Toggle `skill`: remove it when present, add it when absent and under the cap.
///
/// Blank names and additions past [`MAX_SKILLS`] leave the draft unchanged.
pub fn toggle_skill(draft: &GigDraft, skill: &str) -> GigDraft {
    let mut next = draft.clone();
    let skill = skill.trim();
    if next.skills.contains(skill) {
        next.skills.remove(skill);
        return next;
    }
    next.skills = insert_skill(next.skills, skill);
    next
}

fn insert_skill(mut skills: BTreeSet<String>, skill: &str) -> BTreeSet<String> {
    let skill = skill.trim();
    if skill.is_empty() || skills.len() >= MAX_SKILLS {
        return skills;
    }
    skills.insert(skill.to_string());
    skills
}

fn cap_title(title: &str) -> String {
    title.chars().take(TITLE_MAX_CHARS).collect()
}
