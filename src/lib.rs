//! TMDB-RS: a terminal movie browser for The Movie Database.
//!
//! Fetches paginated listings, search results, and details from the TMDB
//! API, caches category pages in memory, and renders the state with ratatui.
//! The crate follows a model / view / controller split:
//!
//! - [`model`]: state (browse/search/pagination, detail, cache) and the
//!   TMDB client behind the [`model::MovieApi`] trait
//! - [`controller`]: the operations that mutate state (listing fetches,
//!   search, infinite scroll, detail) and key-event handling
//! - [`view`]: ratatui rendering
//! - [`config`] and [`logging`]: environment configuration and file-based
//!   tracing setup

pub mod config;
pub mod controller;
pub mod logging;
pub mod model;
pub mod view;
