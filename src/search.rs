//! Search URL construction and the hand-off to the system browser.

use anyhow::Context;

use crate::error::{Error, Result};

/// `base_url?q=<query>` with the query form-urlencoded.
///
/// # Errors
/// - [`Error::EmptyQuery`] when `query` is blank.
/// - [`Error::InvalidSearchUrl`] when `base_url` does not parse.
pub fn search_url(base_url: &str, query: &str) -> Result<String> {
    let query = query.trim();
    if query.is_empty() {
        return Err(Error::EmptyQuery);
    }
    let url = url::Url::parse_with_params(base_url, &[("q", query)]).map_err(|source| {
        Error::InvalidSearchUrl {
            base_url: base_url.to_string(),
            source,
        }
    })?;
    Ok(url.into())
}

/// Hand `url` to the OS without waiting for the browser.
///
/// # Errors
/// Returns an error if no opener could be launched.
pub fn open_in_browser(url: &str) -> anyhow::Result<()> {
    tracing::debug!("opening {url}");
    open::that_detached(url).with_context(|| format!("failed to open browser for {url}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SEARCH_URL;

    #[test]
    fn encodes_operators_quotes_and_spaces() {
        let url = search_url(DEFAULT_SEARCH_URL, "intitle:\"index of\" -public").unwrap();
        assert_eq!(
            url,
            "https://www.google.com/search?q=intitle%3A%22index+of%22+-public"
        );
    }

    #[test]
    fn encodes_or_group_parentheses() {
        let url = search_url(DEFAULT_SEARCH_URL, "(a OR b)").unwrap();
        assert_eq!(url, "https://www.google.com/search?q=%28a+OR+b%29");
    }

    #[test]
    fn empty_query_is_rejected() {
        assert!(matches!(
            search_url(DEFAULT_SEARCH_URL, "   "),
            Err(Error::EmptyQuery)
        ));
    }

    #[test]
    fn custom_base_url_is_respected() {
        let url = search_url("https://search.example/find", "site:a.com").unwrap();
        assert_eq!(url, "https://search.example/find?q=site%3Aa.com");
    }

    #[test]
    fn bad_base_url_is_reported() {
        assert!(matches!(
            search_url("not a url", "x"),
            Err(Error::InvalidSearchUrl { .. })
        ));
    }
}
