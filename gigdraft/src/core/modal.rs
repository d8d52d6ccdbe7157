//! Single-slot modal state for the wizard.
//!
//! At most one modal is visible. Showing a modal replaces whatever was shown.

use crate::core::manifest::ManifestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Submission in flight.
    Submitting,
    Success { manifest_id: ManifestId },
    SubmitFailed { message: String },
    /// Confirmation before discarding the draft.
    DiscardDraft,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    current: Option<Modal>,
}

impl ModalState {
    /// Show `modal`, returning the one it replaced.
    pub fn show(&mut self, modal: Modal) -> Option<Modal> {
        self.current.replace(modal)
    }

    pub fn dismiss(&mut self) -> Option<Modal> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&Modal> {
        self.current.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_replaces_previous_modal() {
        let mut state = ModalState::default();
        assert_eq!(state.show(Modal::Submitting), None);
        let replaced = state.show(Modal::SubmitFailed {
            message: "offline".to_string(),
        });
        assert_eq!(replaced, Some(Modal::Submitting));
        assert!(matches!(state.current(), Some(Modal::SubmitFailed { .. })));
    }

    #[test]
    fn dismiss_clears_state() {
        let mut state = ModalState::default();
        state.show(Modal::DiscardDraft);
        assert_eq!(state.dismiss(), Some(Modal::DiscardDraft));
        assert!(!state.is_visible());
        assert_eq!(state.dismiss(), None);
    }
}
