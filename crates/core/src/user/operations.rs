use super::error::UserError;
use super::types::NewUser;

const MAX_AGE: u32 = 150;

/// Parses a user ID, which must be a non-empty run of ASCII digits.
pub fn parse_user_id(raw: &str) -> Result<i64, UserError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UserError::InvalidId(raw.to_string()));
    }
    raw.parse()
        .map_err(|_| UserError::InvalidId(raw.to_string()))
}

/// Checks for the `local@domain.tld` shape. Deliverability is not checked.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}

/// Validates a user before creation.
pub fn validate_new_user(user: &NewUser) -> Result<(), UserError> {
    if !is_valid_email(&user.email) {
        return Err(UserError::InvalidEmail(user.email.clone()));
    }
    validate_profile(user)
}

/// Validates the mutable fields of a user. Email is not checked because
/// updates never change it.
pub fn validate_profile(user: &NewUser) -> Result<(), UserError> {
    let name_len = user.name.trim().chars().count();
    if !(2..=100).contains(&name_len) {
        return Err(UserError::InvalidNameLength);
    }
    if user.address.trim().is_empty() {
        return Err(UserError::EmptyAddress);
    }
    if user.age > MAX_AGE {
        return Err(UserError::InvalidAge(user.age));
    }
    Ok(())
}
