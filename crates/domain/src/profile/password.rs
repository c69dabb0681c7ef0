use thiserror::Error;

pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("all password fields are required")]
    MissingFields,

    #[error("the new password must be at least 6 characters")]
    TooShort,

    #[error("the new passwords do not match")]
    ConfirmationMismatch,

    #[error("the new password must differ from the current one")]
    SameAsCurrent,
}

/// Validate a password-change form before anything is sent. Checks run in
/// the order the form reports them: missing fields, length, confirmation,
/// reuse.
pub fn validate_change(current: &str, new: &str, confirm: &str) -> Result<(), PasswordError> {
    if current.is_empty() || new.is_empty() || confirm.is_empty() {
        return Err(PasswordError::MissingFields);
    }
    if new.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    if new != confirm {
        return Err(PasswordError::ConfirmationMismatch);
    }
    if current == new {
        return Err(PasswordError::SameAsCurrent);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_change_passes() {
        assert!(validate_change("oldpass", "newpass1", "newpass1").is_ok());
    }

    #[test]
    fn empty_fields_rejected_first() {
        assert_eq!(validate_change("", "newpass1", "newpass1"), Err(PasswordError::MissingFields));
        assert_eq!(validate_change("old", "", ""), Err(PasswordError::MissingFields));
    }

    #[test]
    fn short_password_rejected() {
        assert_eq!(validate_change("old", "abc", "abc"), Err(PasswordError::TooShort));
        assert!(validate_change("old", "abcdef", "abcdef").is_ok());
    }

    #[test]
    fn mismatch_rejected() {
        assert_eq!(
            validate_change("old", "abcdef", "abcdeg"),
            Err(PasswordError::ConfirmationMismatch)
        );
    }

    #[test]
    fn reuse_rejected() {
        assert_eq!(
            validate_change("abcdef", "abcdef", "abcdef"),
            Err(PasswordError::SameAsCurrent)
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // Six multi-byte characters pass the length gate.
        assert!(validate_change("old", "密码密码密码", "密码密码密码").is_ok());
    }
}
