//! Client-side credential rules, enforced before any call to the backend.

pub const USERNAME_MIN_LEN: usize = 3;
pub const PASSWORD_MIN_LEN: usize = 8;

/// Drop every character that is not an ASCII letter, digit or underscore.
pub fn sanitize_username(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err("Password must be at least 8 characters");
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return Err("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        return Err("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one number");
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), &'static str> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err("Please enter a valid email address"),
    }
}

/// Signup rules. `username` must already be sanitized. First failure wins.
pub fn validate_signup(username: &str, email: &str, password: &str) -> Result<(), &'static str> {
    if username.chars().count() < USERNAME_MIN_LEN {
        return Err("Username must be at least 3 characters");
    }
    validate_email(email)?;
    validate_password(password)
}

pub fn validate_login(email: &str, password: &str) -> Result<(), &'static str> {
    if email.trim().is_empty() || password.is_empty() {
        return Err("Please enter your email and password.");
    }
    Ok(())
}
