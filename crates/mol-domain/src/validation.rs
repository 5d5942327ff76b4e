//! Input validation rules shared by the account flows.

/// Symbols allowed in a password besides ASCII letters and digits.
pub const PASSWORD_SYMBOLS: &str = "@$!%*#?&";

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least 8 characters long.")]
    TooShort,
    #[error("Password must be at most 128 characters long.")]
    TooLong,
    #[error(
        "Password must be at least 8 characters long and contain at least one letter and one number."
    )]
    MissingLetterOrDigit,
    #[error("Password may only contain letters, digits and the symbols @$!%*#?&.")]
    DisallowedCharacter,
}

/// Password policy: 8..=128 characters, at least one ASCII letter and one digit,
/// nothing outside letters, digits and [`PASSWORD_SYMBOLS`].
pub fn check_password_policy(password: &str) -> Result<(), PasswordPolicyError> {
    let len = password.chars().count();
    if len < PASSWORD_MIN_LEN {
        return Err(PasswordPolicyError::TooShort);
    }
    if len > PASSWORD_MAX_LEN {
        return Err(PasswordPolicyError::TooLong);
    }
    if password
        .chars()
        .any(|c| !c.is_ascii_alphanumeric() && !PASSWORD_SYMBOLS.contains(c))
    {
        return Err(PasswordPolicyError::DisallowedCharacter);
    }
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        return Err(PasswordPolicyError::MissingLetterOrDigit);
    }
    Ok(())
}

/// Lowercase and trim an email address (newsletter addresses are stored this way).
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
