//! reqwest-backed [`SearchApi`].

use async_trait::async_trait;
use insight_config::ApiConfig;
use insight_contracts::{
    ApiError, AutocompleteResponse, SearchApi, SearchRequest, SearchResponse, StatisticsResponse,
    TaxonomyResponse, ValidationErrorBody,
};
use insight_model::{CategoryCount, Locale, ParamValue, TaxonomyKind, TaxonomyNode};
use reqwest::{Client, StatusCode, header};
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP client for the platform search endpoints.
#[derive(Debug, Clone)]
pub struct HttpSearchApi {
    client: Client,
    config: ApiConfig,
}

impl HttpSearchApi {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        locale: Locale,
    ) -> Result<T, ApiError> {
        let url = self.config.endpoint(path);
        debug!(%url, params = query.len(), "GET");

        let response = self
            .client
            .get(url)
            .query(query)
            .header(header::ACCEPT, "application/json")
            .header(header::ACCEPT_LANGUAGE, locale.as_param())
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        match status {
            status if status.is_success() => {
                serde_json::from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))
            }
            StatusCode::UNPROCESSABLE_ENTITY => {
                let parsed = serde_json::from_slice::<ValidationErrorBody>(&body);
                Err(ApiError::Validation(parsed.unwrap_or_else(|_| {
                    ValidationErrorBody {
                        message: String::from_utf8_lossy(&body).trim().to_string(),
                        ..ValidationErrorBody::default()
                    }
                })))
            }
            status => {
                let text = String::from_utf8_lossy(&body).trim().to_string();
                let message = if text.is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    text
                };
                Err(ApiError::Status {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

#[async_trait]
impl SearchApi for HttpSearchApi {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError> {
        self.get(
            &self.config.paths.search,
            &request.search_query(),
            self.config.locale,
        )
        .await
    }

    async fn statistics(&self, request: &SearchRequest) -> Result<Vec<CategoryCount>, ApiError> {
        let response: StatisticsResponse = self
            .get(
                &self.config.paths.statistics,
                &request.statistics_query(),
                self.config.locale,
            )
            .await?;
        Ok(response.data)
    }

    async fn autocomplete(&self, keyword: &str) -> Result<Vec<String>, ApiError> {
        let response: AutocompleteResponse = self
            .get(
                &self.config.paths.autocomplete,
                &[("keyword", keyword.to_string())],
                self.config.locale,
            )
            .await?;
        Ok(response.data.search_keywords)
    }

    async fn fetch_taxonomy(
        &self,
        kind: TaxonomyKind,
        locale: Locale,
    ) -> Result<Vec<TaxonomyNode>, ApiError> {
        let response: TaxonomyResponse = self
            .get(self.config.paths.taxonomy(kind), &[], locale)
            .await?;
        Ok(response.data)
    }
}
