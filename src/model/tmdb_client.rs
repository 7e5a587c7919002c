//! TMDB API client: the narrow trait the rest of the app depends on, plus
//! the reqwest-backed implementation that talks to the real API.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::movie::{Genre, GenreList, MovieDetails, MovieSummary, PageEnvelope};
use super::types::{MovieCategory, SortOption};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Upper bound on pages a single bulk fetch may request
pub const MAX_BULK_PAGES: u32 = 20;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors surfaced by the API client
#[derive(Debug, Error)]
pub enum TmdbError {
    /// Network-level failure (DNS, connect, TLS, aborted transfer)
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The bounded request timeout elapsed; retry by re-triggering the action
    #[error("request timed out, try again")]
    Timeout,

    /// Non-2xx response; message comes from the API payload when present
    #[error("API error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// 2xx response whose body did not match the expected shape
    #[error("malformed response: {0}")]
    Decode(#[source] reqwest::Error),
}

pub type ApiResult<T> = Result<T, TmdbError>;

/// The listing/search/detail operations the store consumes. Object-safe so
/// tests can substitute a scripted implementation.
#[async_trait]
pub trait MovieApi: Send + Sync {
    async fn movies_by_category(
        &self,
        category: MovieCategory,
        page: u32,
        language: &str,
    ) -> ApiResult<PageEnvelope>;

    async fn discover_movies(
        &self,
        page: u32,
        language: &str,
        sort_by: SortOption,
    ) -> ApiResult<PageEnvelope>;

    async fn search_movies(&self, query: &str, page: u32, language: &str)
        -> ApiResult<PageEnvelope>;

    async fn full_movie_details(&self, id: u64, language: &str) -> ApiResult<MovieDetails>;

    async fn movie_genres(&self, language: &str) -> ApiResult<Vec<Genre>>;

    /// Fetch the first `total_pages` pages of a category concurrently and
    /// concatenate the results. No dedup; one failed page fails the whole
    /// call.
    async fn multiple_pages(
        &self,
        category: MovieCategory,
        total_pages: u32,
        language: &str,
    ) -> ApiResult<Vec<MovieSummary>> {
        let pages_to_fetch = total_pages.min(MAX_BULK_PAGES);
        let requests = (1..=pages_to_fetch)
            .map(|page| self.movies_by_category(category, page, language));

        let envelopes = futures::future::try_join_all(requests).await?;
        Ok(envelopes.into_iter().flat_map(|e| e.results).collect())
    }
}

/// reqwest-backed TMDB client with bearer auth and a bounded timeout
#[derive(Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl TmdbClient {
    pub fn new(base_url: String, api_token: String) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(TmdbError::Transport)?;

        Ok(Self {
            http,
            base_url,
            api_token,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(path, "API request");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_token)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TmdbError::Timeout
                } else {
                    TmdbError::Transport(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("status_message")
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| "Unknown error".to_string());

            tracing::error!(path, status = status.as_u16(), %message, "API request failed");
            return Err(TmdbError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<T>().await.map_err(TmdbError::Decode)
    }

    fn with_language<'a>(
        mut query: Vec<(&'a str, String)>,
        language: &str,
    ) -> Vec<(&'a str, String)> {
        if !language.is_empty() {
            query.push(("language", language.to_string()));
        }
        query
    }
}

#[async_trait]
impl MovieApi for TmdbClient {
    async fn movies_by_category(
        &self,
        category: MovieCategory,
        page: u32,
        language: &str,
    ) -> ApiResult<PageEnvelope> {
        let query = Self::with_language(vec![("page", page.to_string())], language);
        self.get_json(&format!("/movie/{}", category.path_segment()), &query)
            .await
    }

    async fn discover_movies(
        &self,
        page: u32,
        language: &str,
        sort_by: SortOption,
    ) -> ApiResult<PageEnvelope> {
        let query = Self::with_language(
            vec![
                ("page", page.to_string()),
                ("sort_by", sort_by.as_param().to_string()),
                ("include_adult", "false".to_string()),
            ],
            language,
        );
        self.get_json("/discover/movie", &query).await
    }

    async fn search_movies(
        &self,
        query: &str,
        page: u32,
        language: &str,
    ) -> ApiResult<PageEnvelope> {
        let params = Self::with_language(
            vec![
                ("query", query.to_string()),
                ("page", page.to_string()),
            ],
            language,
        );
        self.get_json("/search/movie", &params).await
    }

    async fn full_movie_details(&self, id: u64, language: &str) -> ApiResult<MovieDetails> {
        let query = Self::with_language(
            vec![("append_to_response", "credits".to_string())],
            language,
        );
        self.get_json(&format!("/movie/{id}"), &query).await
    }

    async fn movie_genres(&self, language: &str) -> ApiResult<Vec<Genre>> {
        let query = Self::with_language(Vec::new(), language);
        let list: GenreList = self.get_json("/genre/movie/list", &query).await?;
        Ok(list.genres)
    }
}
