use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;
use serde_json::Value;

use super::{CardResolver, Lang, ResolveError};

const CARD_TIMEOUT: Duration = Duration::from_secs(15);
const SETS_TIMEOUT: Duration = Duration::from_secs(20);
const SET_TIMEOUT: Duration = Duration::from_secs(25);

const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Client for the TCGdex REST API (`{base}/{lang}/cards/...`).
#[derive(Clone)]
pub struct TcgdexClient {
    client: Client,
    base_url: String,
}

impl TcgdexClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(
        &self,
        lang: Lang,
        path: &str,
        query: &[(&str, &str)],
        timeout: Duration,
        context: impl FnOnce() -> String,
    ) -> Result<Value, ResolveError> {
        let url = format!("{}/{}/{}", self.base_url, lang, path);
        tracing::debug!(%url, "TCGdex request");

        let result = async {
            self.client
                .get(&url)
                .query(query)
                .timeout(timeout)
                .send()
                .await?
                .error_for_status()?
                .json::<Value>()
                .await
        }
        .await;

        result.map_err(|source| {
            let context = context();
            tracing::warn!(%url, error = %source, "{}", context);
            ResolveError::Upstream { context, source }
        })
    }
}

#[async_trait]
impl CardResolver for TcgdexClient {
    async fn card(&self, card_id: &str, lang: Lang) -> Result<Value, ResolveError> {
        let path = format!("cards/{}", urlencode(card_id));
        self.get_json(lang, &path, &[], CARD_TIMEOUT, || {
            format!("Failed to fetch card {}", card_id)
        })
        .await
    }

    async fn search_cards(&self, name: &str, lang: Lang) -> Result<Value, ResolveError> {
        self.get_json(lang, "cards", &[("name", name)], CARD_TIMEOUT, || {
            "Failed to search TCGdex".to_string()
        })
        .await
    }

    async fn sets(&self, lang: Lang) -> Result<Value, ResolveError> {
        self.get_json(lang, "sets", &[], SETS_TIMEOUT, || {
            "Failed to list sets".to_string()
        })
        .await
    }

    async fn set(&self, set_id: &str, lang: Lang) -> Result<Value, ResolveError> {
        let path = format!("sets/{}", urlencode(set_id));
        self.get_json(lang, &path, &[], SET_TIMEOUT, || {
            format!("Failed to fetch set {}", set_id)
        })
        .await
    }
}

/// Percent-encode a single path segment.
fn urlencode(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_trimmed() {
        let client = TcgdexClient::new("https://api.tcgdex.net/v2/");
        assert_eq!(client.base_url(), "https://api.tcgdex.net/v2");
    }

    #[test]
    fn path_segments_are_escaped() {
        assert_eq!(urlencode("swsh3-136"), "swsh3-136");
        assert_eq!(urlencode("a/b c"), "a%2Fb%20c");
    }

    #[tokio::test]
    async fn unreachable_upstream_is_reported() {
        let client = TcgdexClient::new("http://127.0.0.1:9");
        let err = client.card("base1-4", Lang::default()).await.unwrap_err();
        assert!(err.to_string().starts_with("Failed to fetch card base1-4"));
    }
}
