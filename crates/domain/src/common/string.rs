//! String normalization for user-entered text.

/// Returns `true` when the text is empty or only whitespace.
///
/// # Examples
///
/// ```
/// use storyloom_domain::common::is_blank;
///
/// assert!(is_blank(""));
/// assert!(is_blank("  \n\t"));
/// assert!(!is_blank(" go left "));
/// ```
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Trims the text and returns `None` if nothing is left.
///
/// # Examples
///
/// ```
/// use storyloom_domain::common::trimmed_non_empty;
///
/// assert_eq!(trimmed_non_empty("  Go right "), Some("Go right".to_string()));
/// assert_eq!(trimmed_non_empty("   "), None);
/// ```
pub fn trimmed_non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
