//! Per-field validation and input normalization.
//!
//! Validation is a pure function of the field's current content; the only
//! memory is the visual marker left on the page. An empty trimmed value is
//! always neutral (no marker), anything else is exactly one of valid/invalid.

use crate::core::{FieldId, FieldState};
use crate::surface::PageSurface;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref REGISTER_NO_RE: Regex = Regex::new(r"^[A-Z0-9]{12}$").unwrap();
}

/// Canonicalize a raw register number: uppercase, then drop everything
/// outside `[A-Z0-9]`. Idempotent.
pub fn normalize_register_no(raw: &str) -> String {
    raw.to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .collect()
}

/// Predicate for a single field, applied to its trimmed content.
pub fn field_is_valid(field: FieldId, value: &str) -> bool {
    let value = value.trim();
    match field {
        FieldId::RegisterNo => REGISTER_NO_RE.is_match(value),
        FieldId::Name => value.chars().count() >= 2,
        FieldId::Department => !value.is_empty(),
        // Defensive default for fields without a dedicated rule.
        _ => !value.is_empty(),
    }
}

/// Validate one field and update its visual marker.
pub fn validate_field(surface: &dyn PageSurface, field: FieldId) -> bool {
    let raw = surface.field_value(field);
    let trimmed = raw.trim();
    let is_valid = field_is_valid(field, trimmed);

    if trimmed.is_empty() {
        surface.set_field_state(field, FieldState::Neutral);
    } else if is_valid {
        surface.set_field_state(field, FieldState::Valid);
    } else {
        surface.set_field_state(field, FieldState::Invalid);
    }

    is_valid
}

/// Gate for submission: all three required fields must pass.
///
/// Deliberately re-validates every required field rather than short-circuiting
/// so each one gets its marker refreshed.
pub fn validate_form(surface: &dyn PageSurface) -> bool {
    let register_valid = validate_field(surface, FieldId::RegisterNo);
    let name_valid = validate_field(surface, FieldId::Name);
    let department_valid = validate_field(surface, FieldId::Department);

    register_valid && name_valid && department_valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;

    #[test]
    fn test_normalize_strips_and_uppercases() {
        assert_eq!(normalize_register_no("ab12-cd34 ef56"), "AB12CD34EF56");
        assert_eq!(normalize_register_no("  73 11 20 10 41 03  "), "731120104103");
        assert_eq!(normalize_register_no("!@#$%"), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["ab12cd34ef56", "A-B_1 2", "ΔΣab12", "", "already12345"] {
            let once = normalize_register_no(raw);
            assert_eq!(normalize_register_no(&once), once);
            assert!(once.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_register_no_rule() {
        assert!(field_is_valid(FieldId::RegisterNo, "AB12CD34EF56"));
        assert!(field_is_valid(FieldId::RegisterNo, "731120104103"));
        assert!(!field_is_valid(FieldId::RegisterNo, "SHORT"));
        assert!(!field_is_valid(FieldId::RegisterNo, "AB12CD34EF567")); // 13 chars
        assert!(!field_is_valid(FieldId::RegisterNo, "ab12cd34ef56")); // lowercase
        assert!(!field_is_valid(FieldId::RegisterNo, ""));
    }

    #[test]
    fn test_name_rule() {
        assert!(field_is_valid(FieldId::Name, "Jo"));
        assert!(field_is_valid(FieldId::Name, "  Jo  "));
        assert!(!field_is_valid(FieldId::Name, "J"));
        assert!(!field_is_valid(FieldId::Name, "   "));
    }

    #[test]
    fn test_department_and_default_rules() {
        assert!(field_is_valid(FieldId::Department, "CS"));
        assert!(!field_is_valid(FieldId::Department, ""));
        assert!(field_is_valid(FieldId::SystemNo, "7"));
        assert!(!field_is_valid(FieldId::SystemNo, "  "));
    }

    #[test]
    fn test_empty_value_clears_marker() {
        let surface = MemorySurface::new();

        surface.set_field_value(FieldId::Name, "J");
        validate_field(&surface, FieldId::Name);
        assert_eq!(surface.field_state(FieldId::Name), FieldState::Invalid);

        surface.set_field_value(FieldId::Name, "   ");
        validate_field(&surface, FieldId::Name);
        assert_eq!(surface.field_state(FieldId::Name), FieldState::Neutral);
    }

    #[test]
    fn test_marker_follows_predicate() {
        let surface = MemorySurface::new();

        surface.set_field_value(FieldId::RegisterNo, "AB12CD34EF56");
        validate_field(&surface, FieldId::RegisterNo);
        assert_eq!(surface.field_state(FieldId::RegisterNo), FieldState::Valid);

        surface.set_field_value(FieldId::RegisterNo, "NOPE");
        validate_field(&surface, FieldId::RegisterNo);
        assert_eq!(surface.field_state(FieldId::RegisterNo), FieldState::Invalid);
    }

    #[test]
    fn test_validate_form_requires_all_three() {
        let surface = MemorySurface::new();
        surface.set_field_value(FieldId::RegisterNo, "AB12CD34EF56");
        surface.set_field_value(FieldId::Name, "Jo");
        surface.set_field_value(FieldId::Department, "CS");
        assert!(validate_form(&surface));

        surface.set_field_value(FieldId::RegisterNo, "SHORT");
        assert!(!validate_form(&surface));
        // and the failing field got its marker refreshed
        assert_eq!(surface.field_state(FieldId::RegisterNo), FieldState::Invalid);
        assert_eq!(surface.field_state(FieldId::Name), FieldState::Valid);
    }
}
