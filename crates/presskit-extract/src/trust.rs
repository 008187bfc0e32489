//! Trust filtering of extracted email tokens.
//!
//! Websites embed plenty of addresses that have nothing to do with the
//! developer: tracking pixels, template placeholders, widget vendors. An
//! address is kept only when its domain is the website's own host or a large
//! public mail provider.

use std::collections::BTreeSet;
use url::Url;

/// Public mail providers whose addresses are accepted for any website.
pub const PUBLIC_MAIL_PROVIDERS: &[&str] = &[
    "gmail.com",
    "googlemail.com",
    "outlook.com",
    "hotmail.com",
    "live.com",
    "yahoo.com",
    "icloud.com",
    "me.com",
    "protonmail.com",
    "proton.me",
    "gmx.de",
    "gmx.net",
    "mail.ru",
    "yandex.ru",
    "qq.com",
    "163.com",
];

/// Email filter bound to one website.
#[derive(Debug, Clone)]
pub struct TrustFilter {
    site_host: Option<String>,
}

impl TrustFilter {
    /// Build a filter for the website at `website_url`.
    ///
    /// An unparseable URL leaves only the public-provider rule in effect.
    pub fn for_website(website_url: &str) -> Self {
        let site_host = Url::parse(website_url)
            .ok()
            .and_then(|url| url.host_str().map(normalize_host));
        Self { site_host }
    }

    /// The normalized host emails are compared against.
    pub fn site_host(&self) -> Option<&str> {
        self.site_host.as_deref()
    }

    /// Whether `email` is plausibly the developer's.
    pub fn accepts(&self, email: &str) -> bool {
        let Some((_, domain)) = email.rsplit_once('@') else {
            return false;
        };
        let domain = domain.to_lowercase();

        self.site_host.as_deref() == Some(domain.as_str())
            || PUBLIC_MAIL_PROVIDERS.contains(&domain.as_str())
    }

    /// Keep accepted tokens, lowercased and de-duplicated.
    pub fn filter<I, S>(&self, tokens: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .filter(|token| self.accepts(token.as_ref()))
            .map(|token| token.as_ref().to_lowercase())
            .collect()
    }
}

/// Lowercase a host and drop a leading `www.`.
pub fn normalize_host(host: &str) -> String {
    let host = host.to_lowercase();
    match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_domain_and_public_provider_kept() {
        let filter = TrustFilter::for_website("https://indiegame.dev/");
        let kept = filter.filter([
            "press@indiegame.dev",
            "webmaster@unrelated-cdn.net",
            "hello@gmail.com",
        ]);

        assert_eq!(
            kept,
            BTreeSet::from(["hello@gmail.com".to_string(), "press@indiegame.dev".to_string()])
        );
    }

    #[test]
    fn test_www_prefix_on_site_is_ignored() {
        let filter = TrustFilter::for_website("https://www.IndieGame.dev/home");
        assert_eq!(filter.site_host(), Some("indiegame.dev"));
        assert!(filter.accepts("Press@IndieGame.DEV"));
    }

    #[test]
    fn test_subdomains_and_lookalikes_rejected() {
        let filter = TrustFilter::for_website("https://indiegame.dev");
        assert!(!filter.accepts("noreply@mail.indiegame.dev"));
        assert!(!filter.accepts("x@indiegame.dev.evil.com"));
        assert!(!filter.accepts("not-an-email"));
        assert!(!filter.accepts("logo@2x.png"));
    }

    #[test]
    fn test_invalid_website_keeps_public_providers_only() {
        let filter = TrustFilter::for_website("not a url");
        assert!(filter.site_host().is_none());
        assert!(filter.accepts("dev@proton.me"));
        assert!(!filter.accepts("dev@indiegame.dev"));
    }

    #[test]
    fn test_filter_dedups_case() {
        let filter = TrustFilter::for_website("https://indiegame.dev");
        let kept = filter.filter(["PRESS@indiegame.dev", "press@INDIEGAME.dev"]);
        assert_eq!(kept.len(), 1);
    }
}
