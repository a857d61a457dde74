//! Conditional field-presence rules shared by every validator.
use super::{ErrorKey, Errors, JsonPath};

/// Which cell of the balance-sheet/note presence matrix a period falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceOutcome {
    /// Neither side has data.
    Empty,
    /// The balance sheet has a figure the note does not explain.
    MissingNote,
    /// The note has data with no balance-sheet figure behind it.
    UnexpectedNote,
    /// Both sides present; field-level checks apply.
    BothPresent,
}

impl PresenceOutcome {
    pub fn classify(has_sheet_value: bool, has_note_data: bool) -> Self {
        match (has_sheet_value, has_note_data) {
            (false, false) => Self::Empty,
            (true, false) => Self::MissingNote,
            (false, true) => Self::UnexpectedNote,
            (true, true) => Self::BothPresent,
        }
    }
}

/// Applies the presence matrix for one period, pushing
/// `mandatory_element_missing` or `unexpected_data` at `path`.
pub fn check_presence(
    has_sheet_value: bool,
    has_note_data: bool,
    path: &JsonPath,
    errors: &mut Errors,
) -> PresenceOutcome {
    let outcome = PresenceOutcome::classify(has_sheet_value, has_note_data);
    match outcome {
        PresenceOutcome::MissingNote => errors.push(ErrorKey::MandatoryElementMissing, path.clone()),
        PresenceOutcome::UnexpectedNote => errors.push(ErrorKey::UnexpectedData, path.clone()),
        PresenceOutcome::Empty | PresenceOutcome::BothPresent => {}
    }
    outcome
}

/// Pushes `key` at `base.<field>` for every populated field.
pub fn reject_populated(fields: &[&'static str], base: &JsonPath, key: ErrorKey, errors: &mut Errors) {
    for field in fields {
        errors.push(key, base.field(field));
    }
}

/// Pushes `mandatory_element_missing` at `path` unless `present`.
pub fn require(present: bool, path: &JsonPath, errors: &mut Errors) -> bool {
    if !present {
        errors.push(ErrorKey::MandatoryElementMissing, path.clone());
    }
    present
}

/// Pushes `key` at `path` if `present`.
pub fn forbid(present: bool, key: ErrorKey, path: &JsonPath, errors: &mut Errors) {
    if present {
        errors.push(key, path.clone());
    }
}

/// Returns `true` for text that is present and not blank.
pub fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Requires non-blank text at `path` (`value_required`) and bounds its
/// length.
pub fn require_text(value: Option<&str>, max_len: usize, path: &JsonPath, errors: &mut Errors) {
    if has_text(value) {
        check_text_length(value, max_len, path, errors);
    } else {
        errors.push(ErrorKey::ValueRequired, path.clone());
    }
}

/// Pushes `max_length_exceeded` when `value` is longer than `max_len`
/// characters.
pub fn check_text_length(value: Option<&str>, max_len: usize, path: &JsonPath, errors: &mut Errors) {
    if value.is_some_and(|v| v.chars().count() > max_len) {
        errors.push(ErrorKey::MaxLengthExceeded, path.clone());
    }
}

/// Names of the fields whose value is present.
pub fn populated(fields: &[(&'static str, bool)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, present)| *present)
        .map(|(name, _)| *name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> JsonPath {
        JsonPath::root("stocks").field("current_period")
    }

    #[test]
    fn presence_matrix_is_exact() {
        let cases = [
            (false, false, PresenceOutcome::Empty, None),
            (
                true,
                false,
                PresenceOutcome::MissingNote,
                Some(ErrorKey::MandatoryElementMissing),
            ),
            (
                false,
                true,
                PresenceOutcome::UnexpectedNote,
                Some(ErrorKey::UnexpectedData),
            ),
            (true, true, PresenceOutcome::BothPresent, None),
        ];
        for (sheet, note, outcome, key) in cases {
            let mut errors = Errors::new();
            assert_eq!(check_presence(sheet, note, &path(), &mut errors), outcome);
            match key {
                None => assert!(errors.is_empty()),
                Some(key) => {
                    assert_eq!(errors.len(), 1);
                    assert!(errors.contains(key, "$.stocks.current_period"));
                }
            }
        }
    }

    #[test]
    fn reject_populated_reports_each_field() {
        let mut errors = Errors::new();
        let base = JsonPath::root("stocks").field("previous_period");
        let fields = populated(&[("stocks", true), ("payments_on_account", false), ("total", true)]);
        reject_populated(&fields, &base, ErrorKey::InconsistentData, &mut errors);
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(ErrorKey::InconsistentData, "$.stocks.previous_period.stocks"));
        assert!(errors.contains(ErrorKey::InconsistentData, "$.stocks.previous_period.total"));
    }

    #[test]
    fn require_text_rejects_blank() {
        let mut errors = Errors::new();
        let p = JsonPath::root("approval").field("name");
        require_text(Some("   "), 10, &p, &mut errors);
        require_text(None, 10, &p, &mut errors);
        assert_eq!(errors.by_key(ErrorKey::ValueRequired).count(), 2);
    }

    #[test]
    fn text_length_counts_characters() {
        let mut errors = Errors::new();
        let p = JsonPath::root("secretary").field("name");
        check_text_length(Some("ééé"), 3, &p, &mut errors);
        assert!(errors.is_empty());
        check_text_length(Some("éééé"), 3, &p, &mut errors);
        assert!(errors.contains(ErrorKey::MaxLengthExceeded, "$.secretary.name"));
    }

    #[test]
    fn require_and_forbid() {
        let mut errors = Errors::new();
        let p = JsonPath::root("loan").field("breakdown");
        assert!(require(true, &p, &mut errors));
        assert!(!require(false, &p, &mut errors));
        forbid(false, ErrorKey::UnexpectedData, &p, &mut errors);
        forbid(true, ErrorKey::UnexpectedData, &p, &mut errors);
        assert_eq!(errors.len(), 2);
    }
}
