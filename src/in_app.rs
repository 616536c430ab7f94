//! Detection of the TikTok in-app browser.
//!
//! TikTok's WebView refuses to open App Store links. Inside it we tag the URL
//! with `from=tiktok` and ask the user to reopen the page in a real browser;
//! once the tagged URL is opened elsewhere we forward straight to the store.

use crate::config::{APP_STORE_URL, IN_APP_QUERY_KEY, IN_APP_QUERY_VALUE};
use once_cell::sync::Lazy;
use regex::Regex;

static IN_APP_USER_AGENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)musical_ly|BytedanceWebview|TikTok").unwrap());

/// True when the user agent belongs to TikTok's in-app browser.
pub fn is_in_app_browser(user_agent: &str) -> bool {
    IN_APP_USER_AGENT.is_match(user_agent)
}

/// The string to match against: the user agent, or `navigator.vendor` when the
/// user agent is unavailable or empty.
pub fn browser_identity(user_agent: Option<String>, vendor: Option<String>) -> String {
    user_agent
        .filter(|ua| !ua.is_empty())
        .or(vendor)
        .unwrap_or_default()
}

/// What the page should do about the current browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserAction {
    /// Inside the in-app browser: show the "open in browser" toast, tagging the
    /// URL first when `tag_url` is set.
    ShowToast { tag_url: bool },
    /// Reopened from the in-app browser: go to the App Store.
    RedirectToStore(&'static str),
    Nothing,
}

/// Decide based on the user agent and the `from` query parameter.
pub fn decide(user_agent: &str, from_param: Option<&str>) -> BrowserAction {
    let tagged = from_param == Some(IN_APP_QUERY_VALUE);
    if is_in_app_browser(user_agent) {
        BrowserAction::ShowToast { tag_url: !tagged }
    } else if tagged {
        BrowserAction::RedirectToStore(APP_STORE_URL)
    } else {
        BrowserAction::Nothing
    }
}

/// The query pair appended to the URL inside the in-app browser.
pub fn tag() -> (&'static str, &'static str) {
    (IN_APP_QUERY_KEY, IN_APP_QUERY_VALUE)
}
