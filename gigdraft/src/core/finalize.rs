//! Conversion of a complete draft into a terminal submitted gig.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::draft::GigDraft;
use crate::core::manifest::ManifestId;
use crate::core::types::WizardStep;
use crate::core::validators::{ValidationRules, first_invalid_step};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinalizeError {
    /// A step up to and including review is not satisfied by the draft.
    #[error("cannot submit: {0} step is incomplete")]
    StepIncomplete(WizardStep),
    /// Finalization was requested away from the review step.
    #[error("cannot submit from the {0} step (expected review)")]
    NotAtReview(WizardStep),
    #[error("gig already submitted as {0}")]
    AlreadySubmitted(ManifestId),
}

/// Terminal, immutable record of a submitted gig.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedGig {
    manifest_id: ManifestId,
    gig: GigDraft,
}

impl SubmittedGig {
    pub fn manifest_id(&self) -> &ManifestId {
        &self.manifest_id
    }

    /// Frozen copy of the draft as it was at submission.
    pub fn gig(&self) -> &GigDraft {
        &self.gig
    }
}

/// Finalize `draft` under default rules with a freshly drawn manifest id.
pub fn finalize<R: Rng + ?Sized>(
    draft: &GigDraft,
    rng: &mut R,
) -> Result<SubmittedGig, FinalizeError> {
    finalize_with_id(draft, ManifestId::generate(rng), &ValidationRules::default())
}

/// Finalize `draft` with a caller-supplied manifest id.
///
/// Rejects the draft unless every editable step, review included, is valid.
pub fn finalize_with_id(
    draft: &GigDraft,
    manifest_id: ManifestId,
    rules: &ValidationRules,
) -> Result<SubmittedGig, FinalizeError> {
    if let Some(step) = first_invalid_step(draft, rules) {
        return Err(FinalizeError::StepIncomplete(step));
    }
    Ok(SubmittedGig {
        manifest_id,
        gig: draft.clone(),
    })
}
