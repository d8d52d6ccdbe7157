//! Step controller: ordered, guarded navigation over wizard steps.

use rand::Rng;
use tracing::debug;

use crate::core::draft::{GigDraft, StepOutput, advance};
use crate::core::finalize::{FinalizeError, SubmittedGig, finalize_with_id};
use crate::core::manifest::ManifestId;
use crate::core::types::WizardStep;
use crate::core::validators::{ValidationRules, is_step_valid_with};

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: WizardStep, to: WizardStep },
    /// The request was a no-op (blocked, or nowhere to go).
    Stayed { at: WizardStep },
}

impl Transition {
    pub fn moved(&self) -> bool {
        matches!(self, Transition::Moved { .. })
    }
}

/// Linear wizard over [`WizardStep`] with a committed draft.
///
/// Forward moves require the current step to be valid. Backward moves keep
/// every entered field. `Submitted` is terminal.
#[derive(Debug, Clone)]
pub struct StepController {
    step: WizardStep,
    draft: GigDraft,
    rules: ValidationRules,
    submitted: Option<SubmittedGig>,
}

impl Default for StepController {
    fn default() -> Self {
        Self::new(ValidationRules::default())
    }
}

impl StepController {
    pub fn new(rules: ValidationRules) -> Self {
        Self {
            step: WizardStep::Category,
            draft: GigDraft::default(),
            rules,
            submitted: None,
        }
    }

    pub fn current(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &GigDraft {
        &self.draft
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    pub fn submitted(&self) -> Option<&SubmittedGig> {
        self.submitted.as_ref()
    }

    pub fn can_advance(&self) -> bool {
        self.step != WizardStep::Review && is_step_valid_with(self.step, &self.draft, &self.rules)
    }

    /// Move to the following step if the current one is valid.
    ///
    /// Review only leaves through [`StepController::finalize`].
    pub fn next(&mut self) -> Transition {
        if !self.can_advance() {
            debug!(step = %self.step, "next blocked");
            return self.stay();
        }
        match self.step.following() {
            Some(to) => self.move_to(to),
            None => self.stay(),
        }
    }

    /// Merge `output` and move forward, committing only if the step is then valid.
    pub fn continue_with(&mut self, output: &StepOutput) -> Transition {
        if self.step == WizardStep::Submitted {
            return self.stay();
        }
        let candidate = advance(&self.draft, output);
        if !is_step_valid_with(self.step, &candidate, &self.rules) {
            debug!(step = %self.step, "continue blocked");
            return self.stay();
        }
        self.draft = candidate;
        self.next()
    }

    /// Merge `output` into the committed draft without moving.
    ///
    /// Used for review-screen toggles such as accepting the terms.
    pub fn amend(&mut self, output: &StepOutput) {
        if self.step == WizardStep::Submitted {
            return;
        }
        self.draft = advance(&self.draft, output);
    }

    /// Step back one step, keeping every field. No-op at `Category` and at
    /// `Submitted`, which is terminal.
    pub fn back(&mut self) -> Transition {
        if self.step == WizardStep::Submitted {
            return self.stay();
        }
        match self.step.preceding() {
            Some(to) => self.move_to(to),
            None => self.stay(),
        }
    }

    /// Jump back to an earlier step (the review screen's edit affordance).
    pub fn edit(&mut self, step: WizardStep) -> Transition {
        if self.step == WizardStep::Submitted || step >= self.step {
            return self.stay();
        }
        self.move_to(step)
    }

    /// Discard the draft and restart at the first step.
    pub fn cancel(&mut self) {
        if self.step == WizardStep::Submitted {
            return;
        }
        debug!(step = %self.step, "draft discarded");
        self.draft = GigDraft::default();
        self.step = WizardStep::Category;
    }

    /// Finalize the committed draft with a freshly drawn manifest id.
    pub fn finalize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&SubmittedGig, FinalizeError> {
        self.ensure_ready()?;
        let submitted = finalize_with_id(&self.draft, ManifestId::generate(rng), &self.rules)?;
        Ok(self.accept(submitted))
    }

    /// Check that the controller may be finalized right now.
    pub fn ensure_ready(&self) -> Result<(), FinalizeError> {
        if let Some(done) = &self.submitted {
            return Err(FinalizeError::AlreadySubmitted(done.manifest_id().clone()));
        }
        if self.step != WizardStep::Review {
            return Err(FinalizeError::NotAtReview(self.step));
        }
        Ok(())
    }

    /// Record a submission produced elsewhere (e.g. an async submitter).
    pub(crate) fn accept(&mut self, submitted: SubmittedGig) -> &SubmittedGig {
        self.step = WizardStep::Submitted;
        self.submitted.insert(submitted)
    }

    fn move_to(&mut self, to: WizardStep) -> Transition {
        let from = self.step;
        self.step = to;
        debug!(%from, %to, "step changed");
        Transition::Moved { from, to }
    }

    fn stay(&self) -> Transition {
        Transition::Stayed { at: self.step }
    }
}
