//! Submission abstraction for finalized drafts.
//!
//! The [`Submitter`] trait is the seam a real backend attaches to. The shipped
//! [`SimulatedSubmitter`] waits a fixed delay and finalizes locally. Tests use
//! scripted submitters that resolve immediately or never.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, info, instrument, warn};

use crate::core::draft::GigDraft;
use crate::core::finalize::{FinalizeError, SubmittedGig, finalize_with_id};
use crate::core::manifest::ManifestId;
use crate::core::validators::ValidationRules;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Rejected(#[from] FinalizeError),
    #[error("submission cancelled")]
    Cancelled,
    #[error("submission failed: {0}")]
    Failed(String),
}

/// Abstraction over gig submission backends.
pub trait Submitter {
    /// Submit `draft`, resolving to the terminal record or an error.
    fn submit(
        &self,
        draft: &GigDraft,
    ) -> impl Future<Output = Result<SubmittedGig, SubmitError>> + Send;
}

/// Submitter that simulates network latency, then finalizes locally.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
    rules: ValidationRules,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration, rules: ValidationRules) -> Self {
        Self { delay, rules }
    }
}

impl Submitter for SimulatedSubmitter {
    fn submit(
        &self,
        draft: &GigDraft,
    ) -> impl Future<Output = Result<SubmittedGig, SubmitError>> + Send {
        let draft = draft.clone();
        let delay = self.delay;
        let rules = self.rules;
        async move {
            debug!(delay_ms = delay.as_millis() as u64, "simulating submission");
            tokio::time::sleep(delay).await;
            let manifest_id = ManifestId::generate(&mut rand::thread_rng());
            finalize_with_id(&draft, manifest_id, &rules).map_err(SubmitError::from)
        }
    }
}

/// Race a submission against `cancel`.
///
/// A sent cancel signal wins; a dropped sender never cancels.
#[instrument(skip_all)]
pub async fn submit_cancellable<S: Submitter>(
    submitter: &S,
    draft: &GigDraft,
    cancel: oneshot::Receiver<()>,
) -> Result<SubmittedGig, SubmitError> {
    let submission = submitter.submit(draft);
    tokio::pin!(submission);
    tokio::select! {
        result = &mut submission => {
            match &result {
                Ok(gig) => info!(manifest_id = %gig.manifest_id(), "gig submitted"),
                Err(err) => warn!(error = %err, "submission failed"),
            }
            result
        }
        Ok(()) = cancel => {
            info!("submission cancelled");
            Err(SubmitError::Cancelled)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedSubmit, ScriptedSubmitter, complete_draft};

    #[tokio::test(start_paused = true)]
    async fn simulated_submitter_finalizes_after_delay() {
        let submitter = SimulatedSubmitter::new(Duration::from_secs(2), ValidationRules::default());
        let started = tokio::time::Instant::now();
        let gig = submitter.submit(&complete_draft()).await.expect("submit");
        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(gig.gig(), &complete_draft());
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_submitter_rejects_incomplete_draft() {
        let submitter = SimulatedSubmitter::new(Duration::ZERO, ValidationRules::default());
        let mut draft = complete_draft();
        draft.agreed_to_terms = false;
        let err = submitter.submit(&draft).await.expect_err("rejected");
        assert!(matches!(err, SubmitError::Rejected(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_signal_wins_over_pending_submission() {
        let submitter = ScriptedSubmitter::new(vec![ScriptedSubmit::Hang]);
        let (tx, rx) = oneshot::channel();
        tx.send(()).expect("send cancel");
        let err = submit_cancellable(&submitter, &complete_draft(), rx)
            .await
            .expect_err("cancelled");
        assert_eq!(err, SubmitError::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_cancel_sender_does_not_cancel() {
        let submitter = SimulatedSubmitter::new(Duration::from_millis(500), ValidationRules::default());
        let (tx, rx) = oneshot::channel::<()>();
        drop(tx);
        let gig = submit_cancellable(&submitter, &complete_draft(), rx)
            .await
            .expect("submitted");
        assert!(gig.manifest_id().as_str().starts_with("KY-"));
    }

    #[tokio::test]
    async fn backend_failure_is_reported() {
        let submitter = ScriptedSubmitter::new(vec![ScriptedSubmit::Fail("offline".to_string())]);
        let (_tx, rx) = oneshot::channel();
        let err = submit_cancellable(&submitter, &complete_draft(), rx)
            .await
            .expect_err("failed");
        assert_eq!(err, SubmitError::Failed("offline".to_string()));
    }
}
