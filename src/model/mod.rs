//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the
//! application. It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (categories, sort options, UI state)
//! - `movie`: Movie data types as returned by the TMDB API
//! - `browse`: Browse/search state with pagination and dedup rules
//! - `cache`: Bounded in-memory cache of category listing pages
//! - `tmdb_client`: TMDB API client trait and reqwest implementation
//! - `app_model`: Main application model with state management methods

mod app_model;
mod browse;
mod cache;
pub mod movie;
mod tmdb_client;
mod types;

// Re-export all public types for convenient access
pub use types::{
    ActiveSection, BrowseEntry, MovieCategory, SortOption, UiState, LANGUAGES,
};

pub use movie::{
    CastMember, CrewMember, Genre, MovieCredits, MovieDetails, MovieSummary, PageEnvelope,
};

pub use browse::{BrowseMode, BrowseState, DetailState};

pub use cache::PageCache;

pub use tmdb_client::{ApiResult, MovieApi, TmdbClient, TmdbError, DEFAULT_BASE_URL, MAX_BULK_PAGES};

pub use app_model::{AppModel, ListingIssue};
