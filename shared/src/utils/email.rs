//! Email address utilities

/// Mask an email address for display in logs (e.g., `a***@example.com`)
///
/// Only the first character of the local part and the domain stay visible.
/// Identities are opaque strings, so input without an `@` is masked as a
/// whole.
pub fn mask_email(email: &str) -> String {
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", mask_segment(local), domain),
        None => mask_segment(email),
    }
}

fn mask_segment(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if chars.next().is_some() => format!("{}***", first),
        Some(_) => "*".to_string(),
        None => String::new(),
    }
}
