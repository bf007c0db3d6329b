use subtle::ConstantTimeEq;

/// Constant-time string comparison.
/// Use this for comparing passwords and session tokens.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Whether a redirect target is a path on this site.
///
/// Rejects absolute and protocol-relative URLs so `?next=` cannot bounce a
/// signed-in admin to another host.
pub fn is_local_path(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//") && !target.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("correct-horse", "correct-horse"));
        assert!(!constant_time_compare("correct-horse", "correct-hors3"));
        assert!(!constant_time_compare("correct-horse", "correct-hors"));
        assert!(!constant_time_compare("", "token"));
    }

    #[test]
    fn test_is_local_path() {
        assert!(is_local_path("/admin"));
        assert!(is_local_path("/admin?tab=partners"));
        assert!(!is_local_path("https://evil.example"));
        assert!(!is_local_path("//evil.example"));
        assert!(!is_local_path("/\\evil.example"));
        assert!(!is_local_path("admin"));
    }
}
