//! Field rules of a [`UserState`] and their translation into [`ValidationFieldError`]s.
//!
//! The rules themselves are declared on [`UserState`] with the `validator` derive; this
//! module runs them and reports every failing field in a stable order, with a JSON
//! pointer to the offending property of the wire format.

use validator::{Validate, ValidationError as ConstraintError, ValidationErrors};

use super::entity::UserState;
use crate::error::resource::{ValidationErrorKind, ValidationFieldError, Violation};

pub const MIN_NAME_LENGTH: u64 = 3;

/// Rejects values that are empty or contain only whitespace.
pub fn not_blank(value: &str) -> Result<(), ConstraintError> {
    if value.trim().is_empty() {
        return Err(ConstraintError::new("not_blank"));
    }
    Ok(())
}

/// Checks every field rule, returning all violations found.
pub fn validate_user(state: &UserState) -> Result<(), Vec<ValidationFieldError>> {
    state
        .validate()
        .map_err(|errors| field_errors(state, &errors))
}

fn field_errors(state: &UserState, errors: &ValidationErrors) -> Vec<ValidationFieldError> {
    let by_field = errors.field_errors();
    let fields = [
        ("first_name", "/firstName", &state.first_name),
        ("last_name", "/lastName", &state.last_name),
        ("email", "/email", &state.email),
    ];

    fields
        .into_iter()
        .filter_map(|(name, path, value)| {
            let constraints = by_field.get(name)?;
            let mut violations: Vec<Violation> = constraints.iter().map(violation).collect();
            violations.sort_by(|a, b| a.kind.cmp(&b.kind));
            Some(ValidationFieldError::new(
                path.into(),
                value.clone(),
                violations,
            ))
        })
        .collect()
}

fn violation(err: &ConstraintError) -> Violation {
    let kind = match err.code.as_ref() {
        "not_blank" => ValidationErrorKind::Required,
        "length" => ValidationErrorKind::MinLength(
            err.params
                .get("min")
                .and_then(|min| min.as_u64())
                .unwrap_or(MIN_NAME_LENGTH),
        ),
        "email" => ValidationErrorKind::Pattern("email".into()),
        _ => ValidationErrorKind::Invalid,
    };
    let message = match &err.message {
        Some(message) => message.to_string(),
        None => err.code.to_string(),
    };

    Violation { kind, message }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn state(first_name: &str, last_name: &str, email: &str) -> UserState {
        UserState::new(first_name.into(), last_name.into(), email.into())
    }

    fn messages(fields: &[ValidationFieldError], path: &str) -> Vec<String> {
        fields
            .iter()
            .filter(|field| field.path == path)
            .flat_map(|field| field.violations.iter().map(|v| v.message.clone()))
            .collect()
    }

    #[test]
    fn accept_valid_user() {
        assert_eq!(validate_user(&state("abc", "Doe", "a@b.com")), Ok(()));
    }

    #[test]
    fn reject_name_shorter_than_three_chars() {
        let fields = validate_user(&state("ab", "Doe", "a@b.com")).unwrap_err();

        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].path, "/firstName");
        assert_eq!(fields[0].value, "ab");
        assert_eq!(
            fields[0].violations,
            vec![Violation {
                kind: ValidationErrorKind::MinLength(3),
                message: "First name must have at least 3 characters".into(),
            }]
        );
    }

    #[test]
    fn count_chars_not_bytes() {
        assert_eq!(validate_user(&state("Žoë", "Ćić", "zoe@mail.hr")), Ok(()));
    }

    #[test]
    fn blank_name_violates_both_rules() {
        let fields = validate_user(&state("  ", "Doe", "a@b.com")).unwrap_err();

        assert_eq!(
            messages(&fields, "/firstName"),
            [
                "First name must not be blank",
                "First name must have at least 3 characters",
            ]
        );
        let kinds: Vec<_> = fields[0].violations.iter().map(|v| v.kind.clone()).collect();
        assert_eq!(
            kinds,
            [ValidationErrorKind::Required, ValidationErrorKind::MinLength(3)]
        );
    }

    #[test]
    fn whitespace_padded_name_is_not_blank() {
        let fields = validate_user(&state(" abc ", " x", "a@b.com")).unwrap_err();

        assert_eq!(messages(&fields, "/firstName"), Vec::<String>::new());
        assert_eq!(
            messages(&fields, "/lastName"),
            vec!["Last name must have at least 3 characters".to_string()]
        );
    }

    #[test]
    fn reject_malformed_email() {
        for email in ["not-an-email", "", "a@", "@b.com", "a b@c.com"] {
            let fields = validate_user(&state("John", "Doe", email)).unwrap_err();
            assert_eq!(
                messages(&fields, "/email"),
                vec!["Email should be valid".to_string()],
                "{email:?} should be rejected"
            );
            assert_eq!(
                fields[0].violations[0].kind,
                ValidationErrorKind::Pattern("email".into())
            );
        }
    }

    #[test]
    fn report_fields_in_wire_order() {
        let fields = validate_user(&state("", "", "nope")).unwrap_err();
        let paths: Vec<&str> = fields.iter().map(|f| f.path.as_str()).collect();

        assert_eq!(paths, ["/firstName", "/lastName", "/email"]);
    }
}
