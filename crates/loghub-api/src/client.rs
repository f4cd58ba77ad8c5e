use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};

use loghub_types::{LogEvent, LogFilters, PageResponse};

use crate::config::ApiConfig;
use crate::error::FetchError;

/// Header carrying the static API credential.
pub const HEADER_API_KEY: &str = "x-api-key";

/// Client for the LogHub query API.
///
/// Holds the base URL and credential explicitly; clone it into whatever task
/// issues requests instead of reaching for process-wide state. Clones share
/// the underlying connection pool.
#[derive(Clone)]
pub struct LogApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl LogApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| FetchError::Config(format!("invalid API URL '{}': {e}", config.base_url)))?;

        let mut headers = HeaderMap::new();
        if !config.api_key.is_empty() {
            let value = HeaderValue::from_str(&config.api_key).map_err(|_| {
                FetchError::Config("API key contains characters not valid in a header".to_string())
            })?;
            headers.insert(HEADER_API_KEY, value);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    /// The base URL this client was constructed with, for display.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The exact URL a list query will hit: the non-empty filter fields plus
    /// `page` and `size`, which are always included.
    pub fn list_url(&self, filters: &LogFilters, page: u64, size: u64) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in filters.to_query_params() {
                pairs.append_pair(key, &value);
            }
            pairs.append_pair("page", &page.to_string());
            pairs.append_pair("size", &size.to_string());
        }
        url
    }

    /// Fetch one page of log events matching the filters. No retry, no
    /// partial results: any transport, status, or decode failure is an error.
    pub async fn fetch_logs(
        &self,
        filters: &LogFilters,
        page: u64,
        size: u64,
    ) -> Result<PageResponse<LogEvent>, FetchError> {
        let url = self.list_url(filters, page, size);
        tracing::debug!(%url, "querying log page");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        response
            .json::<PageResponse<LogEvent>>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Fetch a single log event by identifier from `{base}/{id}`.
    pub async fn fetch_log_by_id(&self, id: &str) -> Result<LogEvent, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::Config("API URL cannot carry path segments".to_string()))?
            .push(id);
        tracing::debug!(%url, "querying log event");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        response
            .json::<LogEvent>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loghub_types::LogLevel;
    use std::collections::HashMap;

    fn client() -> LogApiClient {
        LogApiClient::new(&ApiConfig::default()).unwrap()
    }

    fn query_map(url: &Url) -> HashMap<String, String> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn list_url_always_includes_page_and_size() {
        let url = client().list_url(&LogFilters::default(), 0, 20);
        let query = query_map(&url);
        assert_eq!(query.len(), 2);
        assert_eq!(query["page"], "0");
        assert_eq!(query["size"], "20");
    }

    #[test]
    fn list_url_includes_only_set_filters() {
        let filters = LogFilters {
            application: "billing".to_string(),
            level: Some(LogLevel::Error),
            ..Default::default()
        };

        let url = client().list_url(&filters, 1, 20);
        let query = query_map(&url);
        assert_eq!(query.len(), 4);
        assert_eq!(query["application"], "billing");
        assert_eq!(query["level"], "ERROR");
        assert_eq!(query["page"], "1");
        assert_eq!(query["size"], "20");
        assert!(!query.contains_key("environment"));
        assert!(!query.contains_key("from"));
        assert!(!query.contains_key("to"));
    }

    #[test]
    fn list_url_targets_the_configured_base() {
        let config = ApiConfig {
            base_url: "https://logs.example.com/api/logs".to_string(),
            ..Default::default()
        };
        let client = LogApiClient::new(&config).unwrap();
        let url = client.list_url(&LogFilters::default(), 0, 20);
        assert_eq!(url.host_str(), Some("logs.example.com"));
        assert_eq!(url.path(), "/api/logs");
    }

    #[test]
    fn rejects_unparsable_base_url() {
        let config = ApiConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            LogApiClient::new(&config),
            Err(FetchError::Config(_))
        ));
    }
}
