//! Outbound link classification for storefront detail pages.
//!
//! The storefront routes external links through a redirect wrapper
//! (`https://steamcommunity.com/linkfilter/?u=<percent-encoded destination>`).
//! Classification looks through the wrapper to the real destination.
//!
//! Heuristics are deliberately plain substring checks: an anchor labelled
//! "website" pointing off the storefront host is the developer website, and an
//! anchor labelled "discord" or pointing at `discord.gg` is the Discord
//! invite. The first match per category wins, so a page listing a publisher
//! site before the developer's yields the publisher's.

use crate::html::{anchors, resolve};
use url::Url;

/// Wrapper query parameters that carry the real destination.
const REDIRECT_PARAMS: &[&str] = &["url", "u"];

/// Category of an outbound link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Website,
    Discord,
}

/// The links picked from one page, already unwrapped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedLinks {
    pub website: Option<String>,
    pub discord: Option<String>,
}

/// Return the destination of a redirect-wrapper URL, or `href` unchanged.
///
/// A wrapper is any absolute URL whose query has a `url` or `u` parameter
/// holding an absolute http(s) URL; the parameter is percent-decoded.
pub fn unwrap_redirect(href: &str) -> String {
    let Ok(url) = Url::parse(href) else {
        return href.to_string();
    };

    url.query_pairs()
        .filter(|(key, _)| REDIRECT_PARAMS.contains(&key.as_ref()))
        .map(|(_, value)| value.into_owned())
        .find(|value| value.starts_with("http://") || value.starts_with("https://"))
        .unwrap_or_else(|| href.to_string())
}

/// Classify one anchor by its visible text and (absolute) href.
///
/// `store_host` is the host of the page the anchor was found on; website
/// candidates pointing back at it are ignored. Discord is checked first.
pub fn classify_anchor(text: &str, href: &str, store_host: &str) -> Option<LinkKind> {
    let text = text.to_lowercase();
    let destination = unwrap_redirect(href);

    if text.contains("discord") || href.contains("discord.gg") || destination.contains("discord.gg")
    {
        return Some(LinkKind::Discord);
    }

    if text.contains("website") {
        let host = Url::parse(&destination)
            .ok()
            .and_then(|url| url.host_str().map(str::to_lowercase))?;
        if !host.eq_ignore_ascii_case(store_host) {
            return Some(LinkKind::Website);
        }
    }

    None
}

/// Pick the website and Discord links from a detail page.
pub fn classify_links(html: &str, page_url: &str) -> ClassifiedLinks {
    let base = Url::parse(page_url).ok();
    let store_host = base
        .as_ref()
        .and_then(Url::host_str)
        .unwrap_or_default()
        .to_lowercase();

    let mut links = ClassifiedLinks::default();
    for anchor in anchors(html) {
        let Some(resolved) = resolve(base.as_ref(), &anchor.href) else {
            continue;
        };
        let resolved = String::from(resolved);

        let slot = match classify_anchor(&anchor.text, &resolved, &store_host) {
            Some(LinkKind::Website) => &mut links.website,
            Some(LinkKind::Discord) => &mut links.discord,
            None => continue,
        };
        if slot.is_none() {
            *slot = Some(unwrap_redirect(&resolved));
        }

        if links.website.is_some() && links.discord.is_some() {
            break;
        }
    }

    tracing::debug!(
        page_url,
        website = ?links.website,
        discord = ?links.discord,
        "classified outbound links"
    );
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORE_HOST: &str = "store.steampowered.com";

    #[test]
    fn test_unwrap_linkfilter() {
        let wrapped = "https://steamcommunity.com/linkfilter/?u=https%3A%2F%2Findiegame.dev%2Fpress%3Flang%3Den";
        assert_eq!(unwrap_redirect(wrapped), "https://indiegame.dev/press?lang=en");

        let wrapped = "https://steamcommunity.com/linkfilter/?url=https://indiegame.dev/";
        assert_eq!(unwrap_redirect(wrapped), "https://indiegame.dev/");
    }

    #[test]
    fn test_unwrap_among_other_params() {
        let wrapped =
            "https://steamcommunity.com/linkfilter/?snr=1_5&u=https%3A%2F%2Findiegame.dev%2F%3Fa%3D1%26b%3D2&x";
        assert_eq!(unwrap_redirect(wrapped), "https://indiegame.dev/?a=1&b=2");

        // The first param is not a URL, the second is
        let wrapped = "https://example.com/out?url=nope&u=https%3A%2F%2Fgame.dev%2F";
        assert_eq!(unwrap_redirect(wrapped), "https://game.dev/");
    }

    #[test]
    fn test_unwrap_leaves_plain_urls_alone() {
        assert_eq!(
            unwrap_redirect("https://indiegame.dev/?u=42"),
            "https://indiegame.dev/?u=42"
        );
        assert_eq!(unwrap_redirect("not a url"), "not a url");
    }

    #[test]
    fn test_classify_website() {
        let href = "https://steamcommunity.com/linkfilter/?u=https%3A%2F%2Findiegame.dev";
        assert_eq!(
            classify_anchor("Visit the Website", href, STORE_HOST),
            Some(LinkKind::Website)
        );
    }

    #[test]
    fn test_website_on_store_host_is_ignored() {
        let href = "https://store.steampowered.com/developer/indiegame";
        assert_eq!(classify_anchor("Developer website", href, STORE_HOST), None);
    }

    #[test]
    fn test_classify_discord_by_text_or_href() {
        assert_eq!(
            classify_anchor("Join our Discord", "https://example.com/invite", STORE_HOST),
            Some(LinkKind::Discord)
        );
        let wrapped = "https://steamcommunity.com/linkfilter/?u=https%3A%2F%2Fdiscord.gg%2Fabc";
        assert_eq!(
            classify_anchor("", wrapped, STORE_HOST),
            Some(LinkKind::Discord)
        );
        assert_eq!(
            classify_anchor("Discord website", "https://discord.gg/abc", STORE_HOST),
            Some(LinkKind::Discord)
        );
    }

    #[test]
    fn test_unrelated_anchor() {
        assert_eq!(
            classify_anchor("Read reviews", "https://store.steampowered.com/reviews", STORE_HOST),
            None
        );
    }

    #[test]
    fn test_classify_links_first_match_wins() {
        let html = r#"
            <div class="dev_row">
              <a href="https://steamcommunity.com/linkfilter/?u=https%3A%2F%2Fpublisher.example%2F">Visit the website</a>
              <a href="https://steamcommunity.com/linkfilter/?u=https%3A%2F%2Findiegame.dev%2F">Developer website</a>
              <a href="https://steamcommunity.com/linkfilter/?u=https%3A%2F%2Fdiscord.gg%2Ffirst">Discord</a>
              <a href="https://discord.gg/second">Discord</a>
            </div>
        "#;

        let links = classify_links(html, "https://store.steampowered.com/app/100/");
        assert_eq!(links.website.as_deref(), Some("https://publisher.example/"));
        assert_eq!(links.discord.as_deref(), Some("https://discord.gg/first"));
    }

    #[test]
    fn test_classify_links_resolves_relative_hrefs() {
        let html = r#"<a href="/app/100/reviews">Website reviews</a>"#;
        let links = classify_links(html, "https://store.steampowered.com/app/100/");
        assert_eq!(links, ClassifiedLinks::default());
    }
}
