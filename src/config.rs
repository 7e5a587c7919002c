//! Runtime configuration from environment variables

use anyhow::{Context, Result};

use crate::model::DEFAULT_BASE_URL;

/// Connection settings for the TMDB API
#[derive(Clone, Debug)]
pub struct Config {
    /// v4 read access token, sent as a bearer credential
    pub api_token: String,
    pub base_url: String,
}

impl Config {
    /// `TMDB_API_KEY` is required. `TMDB_API_BASE_URL` overrides the API
    /// host, which is mainly useful for pointing at a local stub.
    pub fn from_env() -> Result<Self> {
        let api_token = std::env::var("TMDB_API_KEY").context(
            "TMDB_API_KEY is not set; create a read access token at \
             https://www.themoviedb.org/settings/api",
        )?;
        let base_url =
            std::env::var("TMDB_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self { api_token, base_url })
    }
}
