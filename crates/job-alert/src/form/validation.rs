use std::sync::OnceLock;

use regex::Regex;

use super::outcome::SubmitError;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"))
}

/// Loose shape check: something, `@`, something, `.`, something, with no whitespace or
/// extra `@` in any part.
pub fn is_valid_email(candidate: &str) -> bool {
    email_pattern().is_match(candidate)
}

/// Trims rows and drops blank ones, preserving order.
pub(crate) fn non_blank(rows: &[String]) -> Vec<String> {
    rows.iter()
        .map(|row| row.trim())
        .filter(|row| !row.is_empty())
        .map(str::to_string)
        .collect()
}

/// Receiver addresses the form may submit. Fails on an empty set or on the first address
/// that does not look like an email.
pub fn receiver_emails(rows: &[String]) -> Result<Vec<String>, SubmitError> {
    let emails = non_blank(rows);
    if emails.is_empty() {
        return Err(SubmitError::MissingReceiver);
    }

    if let Some(invalid) = emails.iter().find(|email| !is_valid_email(email)) {
        return Err(SubmitError::InvalidEmail(invalid.clone()));
    }

    Ok(emails)
}
