//! Thin wrapper around `reqwest` for the activity API.
//!
//! Every request carries the API key in an `x-api-key` header. Profile and
//! company URLs are joined with commas into a single path segment, so
//! characters such as `/` inside them are percent-encoded by [`Url`].

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Url};

use pulse_core::DEFAULT_API_BASE_URL;

use crate::error::ClientError;

/// Client for the activity API.
///
/// Use [`NimbleClient::new`] for production or [`NimbleClient::with_base_url`]
/// to point at a mock server in tests.
pub struct NimbleClient {
    client: Client,
    base_url: Url,
}

impl NimbleClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidApiKey`] if the key cannot be sent as a
    /// header, or [`ClientError::Http`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_API_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// As [`NimbleClient::new`], plus [`ClientError::InvalidBaseUrl`] if
    /// `base_url` does not parse or cannot carry a path.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ClientError> {
        let mut key = HeaderValue::from_str(api_key).map_err(|_| ClientError::InvalidApiKey)?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        let parsed = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            ClientError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            }
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Fetches recent posts for one or more profiles.
    ///
    /// Calls `GET {base}/profile/{urls}/activity?type=posts` and returns the
    /// decoded body, expected to look like `{"activity": [...]}`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NoUrls`] if every URL is blank; no request is sent.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::UnexpectedStatus`] on a non-2xx response.
    /// - [`ClientError::Deserialize`] if the body is not JSON.
    pub async fn get_profile_activity(
        &self,
        urls: &[String],
    ) -> Result<serde_json::Value, ClientError> {
        let joined = join_urls(urls).ok_or(ClientError::NoUrls)?;
        let mut url = self.endpoint(&["profile", &joined, "activity"]);
        url.query_pairs_mut().append_pair("type", "posts");
        self.request_json(url).await
    }

    /// Fetches company page data for one or more company URLs.
    ///
    /// # Errors
    ///
    /// Same as [`NimbleClient::get_profile_activity`].
    pub async fn get_company_data(
        &self,
        urls: &[String],
    ) -> Result<serde_json::Value, ClientError> {
        let joined = join_urls(urls).ok_or(ClientError::NoUrls)?;
        let url = self.endpoint(&["company", &joined]);
        self.request_json(url).await
    }

    /// Appends `segments` to the base path, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base URLs are rejected at construction.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn request_json(&self, url: Url) -> Result<serde_json::Value, ClientError> {
        tracing::debug!(url = %url, "requesting activity API");
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %url, "activity API returned error status");
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

/// Trims each URL, drops blanks, and joins the rest with commas.
fn join_urls(urls: &[String]) -> Option<String> {
    let cleaned: Vec<&str> = urls
        .iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> NimbleClient {
        NimbleClient::with_base_url("test-key", 30, "pulse-test/0.1", base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn join_urls_trims_and_drops_blanks() {
        let urls = vec![
            "  https://www.linkedin.com/in/a ".to_string(),
            String::new(),
            "   ".to_string(),
            "https://www.linkedin.com/in/b".to_string(),
        ];
        assert_eq!(
            join_urls(&urls).as_deref(),
            Some("https://www.linkedin.com/in/a,https://www.linkedin.com/in/b")
        );
    }

    #[test]
    fn join_urls_all_blank_is_none() {
        assert!(join_urls(&[String::new(), " ".to_string()]).is_none());
        assert!(join_urls(&[]).is_none());
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let client = test_client("https://social.webit.live/linkedin/v1/");
        let url = client.endpoint(&["profile", "janedoe", "activity"]);
        assert_eq!(
            url.as_str(),
            "https://social.webit.live/linkedin/v1/profile/janedoe/activity"
        );
    }

    #[test]
    fn endpoint_encodes_slashes_inside_a_segment() {
        let client = test_client("https://social.webit.live/linkedin/v1");
        let url = client.endpoint(&["company", "https://www.linkedin.com/company/acme"]);
        assert!(
            url.path().starts_with("/linkedin/v1/company/https:%2F%2Fwww.linkedin.com%2Fcompany%2Facme"),
            "unexpected path: {}",
            url.path()
        );
    }

    #[test]
    fn new_points_at_shared_default_base_url() {
        let client = NimbleClient::new("k", 30, "ua").expect("client construction should not fail");
        let url = client.endpoint(&["company", "acme"]);
        assert_eq!(url.as_str(), format!("{DEFAULT_API_BASE_URL}/company/acme"));
    }

    #[test]
    fn endpoint_on_bare_host() {
        let client = test_client("http://127.0.0.1:8080");
        let url = client.endpoint(&["company", "acme"]);
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/company/acme");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = NimbleClient::with_base_url("k", 30, "ua", "not a url")
            .err()
            .expect("expected an error");
        assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn non_hierarchical_base_url_is_rejected() {
        let err = NimbleClient::with_base_url("k", 30, "ua", "mailto:ops@example.com")
            .err()
            .expect("expected an error");
        assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn api_key_with_newline_is_rejected() {
        let err = NimbleClient::with_base_url("bad\nkey", 30, "ua", DEFAULT_API_BASE_URL)
            .err()
            .expect("expected an error");
        assert!(matches!(err, ClientError::InvalidApiKey));
    }
}
