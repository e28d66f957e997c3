/// Trim a user-supplied class or student name.
///
/// Returns `None` when nothing is left after trimming; such names never
/// become keys in the roster.
pub fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_trims() {
        assert_eq!(normalize_name("  Math "), Some("Math".to_string()));
        assert_eq!(normalize_name("Alice"), Some("Alice".to_string()));
    }

    #[test]
    fn test_normalize_name_rejects_blank() {
        assert_eq!(normalize_name(""), None);
        assert_eq!(normalize_name("   \t"), None);
    }
}
