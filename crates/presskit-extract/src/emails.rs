//! Email-shaped token extraction from raw page text.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("Email regex is hardcoded and valid")
});

/// All email-shaped tokens in `text`, in first-seen order.
///
/// Tokens are de-duplicated case-insensitively; the first spelling is kept.
/// Nothing is validated here, see [`crate::TrustFilter`].
pub fn extract_emails(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    EMAIL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|token| seen.insert(token.to_lowercase()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_html() {
        let html = r#"
            <p>Press: <a href="mailto:Press@IndieGame.dev">Press@IndieGame.dev</a></p>
            <p>Support: support+games@indiegame.dev.</p>
            <img src="https://cdn.example.com/logo@2x.png">
        "#;

        let emails = extract_emails(html);
        assert_eq!(
            emails,
            vec![
                "Press@IndieGame.dev".to_string(),
                "support+games@indiegame.dev".to_string(),
                "logo@2x.png".to_string(),
            ]
        );
    }

    #[test]
    fn test_short_tld_rejected() {
        assert!(extract_emails("user@host.x").is_empty());
        assert!(extract_emails("no addresses here").is_empty());
    }

    #[test]
    fn test_dedup_is_case_insensitive() {
        let emails = extract_emails("a@b.io A@B.IO a@b.io");
        assert_eq!(emails, vec!["a@b.io".to_string()]);
    }
}
