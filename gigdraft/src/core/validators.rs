//! Per-step field validators and structural draft invariants.

use crate::core::draft::GigDraft;
use crate::core::types::{MAX_SKILLS, OTHER_CATEGORY, TITLE_MAX_CHARS, WizardStep};

/// Tunable validation rules. Defaults match the mobile wizard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationRules {
    /// Require a non-blank description on the details step.
    pub require_description: bool,
}

/// True if `draft` satisfies the fields required by `step` under default rules.
pub fn is_step_valid(step: WizardStep, draft: &GigDraft) -> bool {
    is_step_valid_with(step, draft, &ValidationRules::default())
}

/// True if `draft` satisfies the fields required by `step`.
///
/// `Submitted` is terminal and never valid for forward navigation.
pub fn is_step_valid_with(step: WizardStep, draft: &GigDraft, rules: &ValidationRules) -> bool {
    match step {
        WizardStep::Category => category_valid(draft),
        WizardStep::Details => {
            !is_blank(&draft.title) && (!rules.require_description || !is_blank(&draft.description))
        }
        WizardStep::Budget => draft.amount.is_some_and(|amount| amount > 0),
        WizardStep::Attachments => true,
        WizardStep::Review => draft.agreed_to_terms,
        WizardStep::Submitted => false,
    }
}

/// First editable step (in order) that `draft` does not satisfy, if any.
pub fn first_invalid_step(draft: &GigDraft, rules: &ValidationRules) -> Option<WizardStep> {
    WizardStep::EDITABLE
        .into_iter()
        .find(|step| !is_step_valid_with(*step, draft, rules))
}

fn category_valid(draft: &GigDraft) -> bool {
    match draft.category.as_deref() {
        None => false,
        Some(category) if is_blank(category) => false,
        Some(OTHER_CATEGORY) => draft
            .custom_category_label
            .as_deref()
            .is_some_and(|label| !is_blank(label)),
        Some(_) => true,
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Check structural invariants that hold for every draft regardless of step:
/// - At most [`MAX_SKILLS`] skills, none blank or padded with whitespace
/// - Title within [`TITLE_MAX_CHARS`] characters
/// - `amount`, when set, is positive
///
/// Returns stable error messages (empty on success).
pub fn validate_invariants(draft: &GigDraft) -> Vec<String> {
    let mut errors = Vec::new();

    if draft.skills.len() > MAX_SKILLS {
        errors.push(format!(
            "skills: {} entries exceeds max {}",
            draft.skills.len(),
            MAX_SKILLS
        ));
    }
    if draft.skills.iter().any(|skill| is_blank(skill)) {
        errors.push("skills: entries must be non-blank".to_string());
    }
    let padded: Vec<&str> = draft
        .skills
        .iter()
        .filter(|skill| !is_blank(skill) && skill.trim() != skill.as_str())
        .map(String::as_str)
        .collect();
    if !padded.is_empty() {
        errors.push(format!(
            "skills: entries must not have surrounding whitespace: {:?}",
            padded
        ));
    }

    let title_chars = draft.title.chars().count();
    if title_chars > TITLE_MAX_CHARS {
        errors.push(format!(
            "title: {} characters exceeds max {}",
            title_chars, TITLE_MAX_CHARS
        ));
    }

    if draft.amount == Some(0) {
        errors.push("amount: must be > 0 when set".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{complete_draft, draft_with_category};

    #[test]
    fn category_invalid_when_unset() {
        assert!(!is_step_valid(WizardStep::Category, &GigDraft::default()));
    }

    #[test]
    fn category_valid_for_any_value_but_other() {
        for category in ["design", "writing", "Other", "x"] {
            let draft = draft_with_category(category, None);
            assert!(is_step_valid(WizardStep::Category, &draft), "{category}");
        }
    }

    #[test]
    fn blank_category_counts_as_unset() {
        for category in ["", "   "] {
            let draft = draft_with_category(category, None);
            assert!(!is_step_valid(WizardStep::Category, &draft), "{category:?}");
        }
    }

    #[test]
    fn other_category_requires_label() {
        let draft = draft_with_category(OTHER_CATEGORY, None);
        assert!(!is_step_valid(WizardStep::Category, &draft));

        let draft = draft_with_category(OTHER_CATEGORY, Some("  "));
        assert!(!is_step_valid(WizardStep::Category, &draft));

        let draft = draft_with_category(OTHER_CATEGORY, Some("Pet sitting"));
        assert!(is_step_valid(WizardStep::Category, &draft));
    }

    #[test]
    fn details_requires_title_and_optionally_description() {
        let mut draft = GigDraft {
            title: "Logo".to_string(),
            ..GigDraft::default()
        };
        assert!(is_step_valid(WizardStep::Details, &draft));

        let strict = ValidationRules {
            require_description: true,
        };
        assert!(!is_step_valid_with(WizardStep::Details, &draft, &strict));
        draft.description = "A clean wordmark".to_string();
        assert!(is_step_valid_with(WizardStep::Details, &draft, &strict));

        draft.title = "   ".to_string();
        assert!(!is_step_valid(WizardStep::Details, &draft));
    }

    #[test]
    fn budget_requires_positive_amount() {
        let mut draft = GigDraft::default();
        assert!(!is_step_valid(WizardStep::Budget, &draft));
        draft.amount = Some(0);
        assert!(!is_step_valid(WizardStep::Budget, &draft));
        draft.amount = Some(1);
        assert!(is_step_valid(WizardStep::Budget, &draft));
    }

    #[test]
    fn review_requires_terms() {
        let mut draft = complete_draft();
        draft.agreed_to_terms = false;
        assert!(!is_step_valid(WizardStep::Review, &draft));
        assert_eq!(
            first_invalid_step(&draft, &ValidationRules::default()),
            Some(WizardStep::Review)
        );
    }

    #[test]
    fn submitted_is_never_valid() {
        assert!(!is_step_valid(WizardStep::Submitted, &complete_draft()));
    }

    #[test]
    fn complete_draft_has_no_invalid_step() {
        assert_eq!(
            first_invalid_step(&complete_draft(), &ValidationRules::default()),
            None
        );
    }

    #[test]
    fn validate_invariants_reports_errors() {
        let mut draft = complete_draft();
        draft.skills = (0..7).map(|i| format!("s{i}")).collect();
        draft.skills.insert(" ".to_string());
        draft.title = "t".repeat(TITLE_MAX_CHARS + 1);
        draft.amount = Some(0);

        let errors = validate_invariants(&draft);
        assert!(errors.iter().any(|err| err.contains("exceeds max 5")));
        assert!(errors.iter().any(|err| err.contains("non-blank")));
        assert!(errors.iter().any(|err| err.starts_with("title:")));
        assert!(errors.iter().any(|err| err.starts_with("amount:")));
    }

    #[test]
    fn validate_invariants_rejects_padded_skills() {
        let mut draft = complete_draft();
        draft.skills = ["Figma", " Figma", "Branding "]
            .into_iter()
            .map(str::to_string)
            .collect();

        let errors = validate_invariants(&draft);
        assert_eq!(
            errors,
            vec![
                "skills: entries must not have surrounding whitespace: [\" Figma\", \"Branding \"]"
                    .to_string()
            ]
        );
    }

    #[test]
    fn validate_invariants_accepts_complete_draft() {
        assert!(validate_invariants(&complete_draft()).is_empty());
    }
}
