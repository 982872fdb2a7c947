use crate::error::{Error, Result};

use super::entity::{Login, SignUp};

const MIN_PASSWORD_LEN: usize = 6;
const MIN_NAME_LEN: usize = 2;

/// Validator for sign-up and login forms
pub struct CredentialsValidator;

impl CredentialsValidator {
    /// Rules:
    /// - full name has at least 2 characters
    /// - email is well formed
    /// - password has at least 6 characters
    /// - confirmation, when given, matches the password
    pub fn validate_sign_up(form: &SignUp) -> Result<()> {
        if form.full_name.trim().chars().count() < MIN_NAME_LEN {
            return Err(Error::validation(
                "full_name",
                format!("must be at least {} characters", MIN_NAME_LEN),
            ));
        }
        Self::validate_email(&form.email)?;
        if form.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::validation(
                "password",
                format!("must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }
        if let Some(confirm) = &form.confirm_password {
            if confirm != &form.password {
                return Err(Error::validation("confirm_password", "passwords do not match"));
            }
        }
        Ok(())
    }

    pub fn validate_login(form: &Login) -> Result<()> {
        Self::validate_email(&form.email)?;
        if form.password.is_empty() {
            return Err(Error::validation("password", "is required"));
        }
        Ok(())
    }

    /// A single `@` with non-empty local part and a dotted domain
    pub fn validate_email(email: &str) -> Result<()> {
        let invalid = || Error::validation("email", "must be a valid email address");

        let email = email.trim();
        if email.chars().any(char::is_whitespace) {
            return Err(invalid());
        }
        let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.contains('@') {
            return Err(invalid());
        }
        let dotted = domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'));
        if !dotted {
            return Err(invalid());
        }
        Ok(())
    }
}
