//! Test-only helpers for building drafts, step outputs and scripted submitters.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use chrono::NaiveDate;

use crate::core::controller::StepController;
use crate::core::draft::{GigDraft, StepOutput};
use crate::core::finalize::{SubmittedGig, finalize_with_id};
use crate::core::manifest::ManifestId;
use crate::core::types::{FileRef, PaymentType, WizardStep};
use crate::core::validators::ValidationRules;
use crate::io::submitter::{SubmitError, Submitter};

/// Parse a `YYYY-MM-DD` date, panicking on malformed input.
pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid date")
}

/// A draft that satisfies every step under default rules.
pub fn complete_draft() -> GigDraft {
    GigDraft {
        category: Some("design".to_string()),
        custom_category_label: None,
        title: "Logo".to_string(),
        description: "Wordmark for a neighbourhood bakery".to_string(),
        skills: ["Branding", "Illustrator"]
            .into_iter()
            .map(str::to_string)
            .collect(),
        payment_type: PaymentType::Fixed,
        amount: Some(2500),
        deadline: Some(date("2026-03-01")),
        attachments: vec![FileRef {
            name: "brief.pdf".to_string(),
            uri: "file:///tmp/brief.pdf".to_string(),
            size_bytes: Some(1024),
            mime_type: Some("application/pdf".to_string()),
        }],
        agreed_to_terms: true,
    }
}

/// Empty draft with only the category fields set.
pub fn draft_with_category(category: &str, label: Option<&str>) -> GigDraft {
    GigDraft {
        category: Some(category.to_string()),
        custom_category_label: label.map(str::to_string),
        ..GigDraft::default()
    }
}

pub fn category_output(category: &str, label: Option<&str>) -> StepOutput {
    StepOutput {
        category: Some(category.to_string()),
        custom_category_label: label.map(str::to_string),
        ..StepOutput::default()
    }
}

pub fn details_output(title: &str) -> StepOutput {
    StepOutput {
        title: Some(title.to_string()),
        ..StepOutput::default()
    }
}

pub fn budget_output(amount: u64, deadline: &str) -> StepOutput {
    StepOutput {
        amount: Some(amount),
        deadline: Some(date(deadline)),
        ..StepOutput::default()
    }
}

pub fn terms_output(agreed: bool) -> StepOutput {
    StepOutput {
        agreed_to_terms: Some(agreed),
        ..StepOutput::default()
    }
}

/// Drive a fresh controller to the review step using `draft`'s fields.
///
/// Panics if any step before review blocks.
pub fn drive_to_review(draft: &GigDraft) -> StepController {
    let mut controller = StepController::default();
    while controller.current() < WizardStep::Review {
        let step = controller.current();
        assert!(
            controller.continue_with(&draft.step_output(step)).moved(),
            "step {step} blocked"
        );
    }
    controller.amend(&draft.step_output(WizardStep::Review));
    controller
}

/// Scripted response for a single `submit` call.
#[derive(Debug, Clone)]
pub enum ScriptedSubmit {
    Accept(ManifestId),
    Fail(String),
    /// Never resolves (for cancellation tests).
    Hang,
}

/// Submitter returning queued responses in order.
#[derive(Debug, Default)]
pub struct ScriptedSubmitter {
    queue: Mutex<VecDeque<ScriptedSubmit>>,
}

impl ScriptedSubmitter {
    pub fn new(responses: Vec<ScriptedSubmit>) -> Self {
        Self {
            queue: Mutex::new(responses.into()),
        }
    }

    /// Number of responses not yet consumed.
    pub fn remaining(&self) -> usize {
        self.queue.lock().expect("queue lock").len()
    }
}

impl Submitter for ScriptedSubmitter {
    fn submit(
        &self,
        draft: &GigDraft,
    ) -> impl Future<Output = Result<SubmittedGig, SubmitError>> + Send {
        let next = self.queue.lock().expect("queue lock").pop_front();
        let draft = draft.clone();
        async move {
            match next {
                Some(ScriptedSubmit::Accept(id)) => {
                    finalize_with_id(&draft, id, &ValidationRules::default())
                        .map_err(SubmitError::from)
                }
                Some(ScriptedSubmit::Fail(message)) => Err(SubmitError::Failed(message)),
                Some(ScriptedSubmit::Hang) => std::future::pending().await,
                None => Err(SubmitError::Failed("no scripted response".to_string())),
            }
        }
    }
}
