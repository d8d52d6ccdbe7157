//! Orchestration for one gig-posting wizard session.
//!
//! Couples the [`StepController`] with the modal slot and drives submission
//! through a [`Submitter`], updating both as the submission resolves.

use tokio::sync::oneshot;
use tracing::{info, instrument};

use crate::core::controller::{StepController, Transition};
use crate::core::draft::{GigDraft, StepOutput};
use crate::core::finalize::{FinalizeError, SubmittedGig};
use crate::core::manifest::ManifestId;
use crate::core::modal::{Modal, ModalState};
use crate::core::types::WizardStep;
use crate::core::validators::{ValidationRules, first_invalid_step};
use crate::io::submitter::{SubmitError, Submitter, submit_cancellable};

#[derive(Debug, Clone, Default)]
pub struct WizardSession {
    controller: StepController,
    modal: ModalState,
}

impl WizardSession {
    pub fn new(rules: ValidationRules) -> Self {
        Self {
            controller: StepController::new(rules),
            modal: ModalState::default(),
        }
    }

    pub fn controller(&self) -> &StepController {
        &self.controller
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn current(&self) -> WizardStep {
        self.controller.current()
    }

    pub fn draft(&self) -> &GigDraft {
        self.controller.draft()
    }

    pub fn submitted(&self) -> Option<&SubmittedGig> {
        self.controller.submitted()
    }

    pub fn continue_with(&mut self, output: &StepOutput) -> Transition {
        self.controller.continue_with(output)
    }

    pub fn amend(&mut self, output: &StepOutput) {
        self.controller.amend(output);
    }

    pub fn back(&mut self) -> Transition {
        self.controller.back()
    }

    pub fn edit(&mut self, step: WizardStep) -> Transition {
        self.controller.edit(step)
    }

    /// Walk a full draft through every step up to review.
    ///
    /// Stops at the first step whose fields do not satisfy its validator.
    pub fn replay(&mut self, draft: &GigDraft) -> Result<(), FinalizeError> {
        while self.controller.current() < WizardStep::Review {
            let step = self.controller.current();
            if !self.controller.continue_with(&draft.step_output(step)).moved() {
                return Err(FinalizeError::StepIncomplete(step));
            }
        }
        self.controller.amend(&draft.step_output(WizardStep::Review));
        Ok(())
    }

    /// Ask for confirmation before discarding the draft.
    pub fn request_cancel(&mut self) {
        if self.controller.submitted().is_none() {
            self.modal.show(Modal::DiscardDraft);
        }
    }

    /// Discard the draft if the discard confirmation is showing.
    pub fn confirm_discard(&mut self) -> bool {
        if self.modal.current() != Some(&Modal::DiscardDraft) {
            return false;
        }
        self.modal.dismiss();
        self.controller.cancel();
        true
    }

    pub fn dismiss_modal(&mut self) -> Option<Modal> {
        self.modal.dismiss()
    }

    /// Submit the committed draft from the review step.
    ///
    /// On success the controller becomes `Submitted` and the success modal
    /// shows the manifest id. A failure leaves the draft at review with the
    /// failure modal; cancellation leaves it at review with no modal.
    #[instrument(skip_all, fields(step = %self.controller.current()))]
    pub async fn submit<S: Submitter>(
        &mut self,
        submitter: &S,
        cancel: oneshot::Receiver<()>,
    ) -> Result<ManifestId, SubmitError> {
        self.controller.ensure_ready()?;
        if let Some(step) = first_invalid_step(self.controller.draft(), self.controller.rules()) {
            return Err(FinalizeError::StepIncomplete(step).into());
        }

        self.modal.show(Modal::Submitting);
        let result = submit_cancellable(submitter, self.controller.draft(), cancel).await;
        match result {
            Ok(submitted) => {
                let manifest_id = submitted.manifest_id().clone();
                self.controller.accept(submitted);
                self.modal.show(Modal::Success {
                    manifest_id: manifest_id.clone(),
                });
                info!(%manifest_id, "wizard complete");
                Ok(manifest_id)
            }
            Err(SubmitError::Cancelled) => {
                self.modal.dismiss();
                Err(SubmitError::Cancelled)
            }
            Err(err) => {
                self.modal.show(Modal::SubmitFailed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::draft_store::parse_draft;
    use crate::test_support::{ScriptedSubmit, ScriptedSubmitter, complete_draft};

    #[test]
    fn replay_stops_at_first_blocked_step() {
        let mut draft = complete_draft();
        draft.amount = None;
        let mut session = WizardSession::default();
        assert_eq!(
            session.replay(&draft),
            Err(FinalizeError::StepIncomplete(WizardStep::Budget))
        );
        assert_eq!(session.current(), WizardStep::Budget);
        assert_eq!(session.draft().title, draft.title);
    }

    #[test]
    fn replay_reproduces_loaded_draft_exactly() {
        let draft = parse_draft(
            r#"{
                "category": "design",
                "title": "Logo",
                "skills": ["Branding", "Figma", "Illustrator"],
                "amount": 2500,
                "deadline": "2026-03-01",
                "agreed_to_terms": true
            }"#,
        )
        .expect("parse");
        let mut session = WizardSession::default();
        session.replay(&draft).expect("replay");
        assert_eq!(session.draft(), &draft);
    }

    #[test]
    fn discard_requires_confirmation() {
        let mut session = WizardSession::default();
        session.replay(&complete_draft()).expect("replay");
        assert!(!session.confirm_discard());
        assert_eq!(session.current(), WizardStep::Review);

        session.request_cancel();
        assert_eq!(session.modal().current(), Some(&Modal::DiscardDraft));
        assert!(session.confirm_discard());
        assert_eq!(session.current(), WizardStep::Category);
        assert_eq!(session.draft(), &GigDraft::default());
        assert!(!session.modal().is_visible());
    }

    #[tokio::test]
    async fn submit_outside_review_is_rejected_without_modal() {
        let mut session = WizardSession::default();
        let submitter = ScriptedSubmitter::new(vec![]);
        let (_tx, rx) = oneshot::channel();
        let err = session.submit(&submitter, rx).await.expect_err("rejected");
        assert_eq!(
            err,
            SubmitError::Rejected(FinalizeError::NotAtReview(WizardStep::Category))
        );
        assert!(!session.modal().is_visible());
        assert_eq!(submitter.remaining(), 0);
    }

    #[tokio::test]
    async fn failed_submission_shows_failure_and_stays_at_review() {
        let mut session = WizardSession::default();
        session.replay(&complete_draft()).expect("replay");
        let submitter = ScriptedSubmitter::new(vec![ScriptedSubmit::Fail("timeout".to_string())]);
        let (_tx, rx) = oneshot::channel();

        let err = session.submit(&submitter, rx).await.expect_err("failed");

        assert_eq!(err, SubmitError::Failed("timeout".to_string()));
        assert_eq!(session.current(), WizardStep::Review);
        assert_eq!(
            session.modal().current(),
            Some(&Modal::SubmitFailed {
                message: "submission failed: timeout".to_string()
            })
        );
    }

    #[tokio::test]
    async fn cancelled_submission_clears_modal() {
        let mut session = WizardSession::default();
        session.replay(&complete_draft()).expect("replay");
        let submitter = ScriptedSubmitter::new(vec![ScriptedSubmit::Hang]);
        let (tx, rx) = oneshot::channel();
        tx.send(()).expect("cancel");

        let err = session.submit(&submitter, rx).await.expect_err("cancelled");

        assert_eq!(err, SubmitError::Cancelled);
        assert_eq!(session.current(), WizardStep::Review);
        assert!(!session.modal().is_visible());
        assert!(session.submitted().is_none());
    }
}
