//! Declarative field rules for the form draft.
//!
//! Rules are evaluated independently per field - all violations are reported
//! together, never short-circuited across fields. An empty error map means
//! the draft is valid.

use std::collections::BTreeMap;
use std::fmt;

use crate::form::FormDraft;

/// Minimum title length (characters, after trimming)
pub const TITLE_MIN: usize = 3;
/// Maximum title length (characters, after trimming)
pub const TITLE_MAX: usize = 100;
/// Lowest user identifier the remote store knows
pub const USER_ID_MIN: i64 = 1;
/// Highest user identifier the remote store knows
pub const USER_ID_MAX: i64 = 10;

/// A validatable field of the form draft
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// The todo title
    Title,
    /// The owning user identifier
    UserId,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => write!(f, "title"),
            Self::UserId => write!(f, "userId"),
        }
    }
}

/// Field-keyed validation messages, ordered for stable display
pub type FieldErrors = BTreeMap<Field, String>;

/// Validate a draft against the field rules
///
/// Pure function; calling it twice on the same unmodified draft yields
/// identical error sets. The `completed` flag has no rule.
#[must_use]
pub fn validate(draft: &FormDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if let Some(message) = title_error(&draft.title) {
        errors.insert(Field::Title, message);
    }
    if let Some(message) = user_id_error(&draft.user_id) {
        errors.insert(Field::UserId, message);
    }

    errors
}

fn title_error(title: &str) -> Option<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Some("Title is required".to_string());
    }

    let length = trimmed.chars().count();
    if length < TITLE_MIN {
        return Some(format!("Title must be at least {TITLE_MIN} characters"));
    }
    if length > TITLE_MAX {
        return Some(format!("Title must be at most {TITLE_MAX} characters"));
    }

    None
}

fn user_id_error(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some("User ID is required".to_string());
    }

    let Ok(value) = trimmed.parse::<i64>() else {
        return Some("User ID must be a number".to_string());
    };

    if !(USER_ID_MIN..=USER_ID_MAX).contains(&value) {
        return Some(format!(
            "User ID must be between {USER_ID_MIN} and {USER_ID_MAX}"
        ));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn draft(title: &str, user_id: &str) -> FormDraft {
        FormDraft {
            todo_id: None,
            title: title.to_string(),
            user_id: user_id.to_string(),
            completed: false,
        }
    }

    #[test]
    fn valid_draft_has_no_errors() {
        assert!(validate(&draft("Buy milk", "1")).is_empty());
    }

    #[test]
    fn short_title_reports_exact_message() {
        let errors = validate(&draft("ab", "1"));
        assert_eq!(
            errors.get(&Field::Title).map(String::as_str),
            Some("Title must be at least 3 characters")
        );
        assert!(!errors.contains_key(&Field::UserId));
    }

    #[test]
    fn blank_title_is_required_not_too_short() {
        let errors = validate(&draft("   ", "1"));
        assert_eq!(
            errors.get(&Field::Title).map(String::as_str),
            Some("Title is required")
        );
    }

    #[test]
    fn all_violations_reported_together() {
        let errors = validate(&draft("", "eleven"));
        assert_eq!(errors.len(), 2);
        assert!(errors.contains_key(&Field::Title));
        assert!(errors.contains_key(&Field::UserId));
    }

    #[test]
    fn non_numeric_user_id_is_rejected() {
        let errors = validate(&draft("Buy milk", "abc"));
        assert_eq!(
            errors.get(&Field::UserId).map(String::as_str),
            Some("User ID must be a number")
        );
    }

    #[test]
    fn user_id_bounds_are_inclusive() {
        assert!(validate(&draft("Buy milk", "1")).is_empty());
        assert!(validate(&draft("Buy milk", "10")).is_empty());
        assert!(validate(&draft("Buy milk", "0")).contains_key(&Field::UserId));
        assert!(validate(&draft("Buy milk", "11")).contains_key(&Field::UserId));
    }

    proptest! {
        #[test]
        fn title_error_iff_length_out_of_bounds(len in 0usize..=150) {
            let d = draft(&"a".repeat(len), "1");
            let errors = validate(&d);
            let out_of_bounds = len < TITLE_MIN || len > TITLE_MAX;
            prop_assert_eq!(errors.contains_key(&Field::Title), out_of_bounds);
        }

        #[test]
        fn user_id_error_iff_outside_range(value in -1000i64..=1000) {
            let d = draft("Buy milk", &value.to_string());
            let errors = validate(&d);
            let outside = !(USER_ID_MIN..=USER_ID_MAX).contains(&value);
            prop_assert_eq!(errors.contains_key(&Field::UserId), outside);
        }

        #[test]
        fn validation_is_idempotent(title in ".{0,120}", user_id in ".{0,8}") {
            let d = draft(&title, &user_id);
            prop_assert_eq!(validate(&d), validate(&d));
        }
    }
}
