use crate::error::{FetchError, Result};
use presskit_core::FetchConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Fixed identification headers.
///
/// [`RequestProfile::header_map`] is sent with every request. The age-gate
/// cookie answers the storefront's consent wall and is only ever attached to
/// storefront requests (see [`RequestProfile::age_gate_header`]).
#[derive(Debug, Clone)]
pub struct RequestProfile {
    pub user_agent: String,
    pub accept_language: String,
    pub age_gate_cookie: String,
}

impl RequestProfile {
    pub fn from_config(config: &FetchConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            accept_language: config.accept_language.clone(),
            age_gate_cookie: config.age_gate_cookie.clone(),
        }
    }

    pub fn header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value("User-Agent", &self.user_agent)?);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
        headers.insert(
            ACCEPT_LANGUAGE,
            header_value("Accept-Language", &self.accept_language)?,
        );
        Ok(headers)
    }

    /// The `Cookie` value for storefront requests, `None` when unset.
    pub fn age_gate_header(&self) -> Result<Option<HeaderValue>> {
        if self.age_gate_cookie.is_empty() {
            return Ok(None);
        }
        header_value("Cookie", &self.age_gate_cookie).map(Some)
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| FetchError::Client(format!("invalid {name} header: {e}")))
}
