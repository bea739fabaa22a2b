/// Pure phone number helpers (platform-agnostic)

/// Normalize a phone number to international format with a leading '+'.
///
/// Already-prefixed numbers are returned unchanged, so normalization is
/// idempotent.
pub fn normalize_phone(phone: &str) -> String {
    let trimmed = phone.trim();
    if trimmed.starts_with('+') {
        trimmed.to_string()
    } else {
        format!("+{}", trimmed)
    }
}
