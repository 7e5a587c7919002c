//! Listing, search, pagination, and detail operations
//!
//! These are the only mutation paths into the browse state. Each operation
//! obtains a generation token from the model before touching the network and
//! presents it on completion, so responses that outlive their browsing
//! context are dropped instead of merged.

use crate::model::{BrowseMode, ListingIssue, MovieCategory, SortOption};

use super::AppController;

impl AppController {
    /// Switch to (or continue paging) a category listing
    pub async fn fetch_category(
        &self,
        category: MovieCategory,
        page: u32,
        language: &str,
        reset: bool,
    ) {
        tracing::debug!(
            category = category.path_segment(),
            page,
            reset,
            "Fetching category listing"
        );
        let issue = {
            let model = self.model.lock().await;
            model
                .begin_listing_fetch(BrowseMode::Category(category), page, language, reset)
                .await
        };
        self.run_listing_fetch(issue).await;
    }

    /// Switch to (or continue paging) the discover listing
    pub async fn fetch_all(&self, page: u32, language: &str, sort_by: SortOption, reset: bool) {
        tracing::debug!(page, sort_by = sort_by.as_param(), reset, "Fetching discover listing");
        let issue = {
            let model = self.model.lock().await;
            model
                .begin_listing_fetch(BrowseMode::AllMovies { sort_by }, page, language, reset)
                .await
        };
        self.run_listing_fetch(issue).await;
    }

    /// Free-text search. An empty (trimmed) query is a mode revert: it
    /// re-runs whichever listing was active before search began and leaves
    /// the search lifecycle fields alone.
    pub async fn search(&self, query: &str, page: u32, reset: bool) {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            let (prior, language) = {
                let model = self.model.lock().await;
                (model.prior_browse_mode().await, model.selected_language().await)
            };
            tracing::debug!(mode = ?prior, "Empty query, reverting to prior listing");
            match prior {
                BrowseMode::Category(category) => {
                    self.fetch_category(category, 1, language, true).await;
                }
                BrowseMode::AllMovies { sort_by } => {
                    self.fetch_all(1, language, sort_by, true).await;
                }
                // prior_mode never holds a search; fall back to the default listing
                BrowseMode::Search { .. } => {
                    self.fetch_category(MovieCategory::Popular, 1, language, true)
                        .await;
                }
            }
            return;
        }

        tracing::debug!(query = trimmed, page, "Searching movies");
        let issue = {
            let model = self.model.lock().await;
            let language = model.selected_language().await;
            model
                .begin_listing_fetch(
                    BrowseMode::Search {
                        query: trimmed.to_string(),
                    },
                    page,
                    language,
                    reset,
                )
                .await
        };
        self.run_listing_fetch(issue).await;
    }

    /// Request the page after the current one for whatever mode is active.
    /// No-op when the last page is already loaded or a listing fetch is
    /// outstanding; the check and the in-flight mark happen atomically in
    /// the model.
    pub async fn load_next_page(&self) {
        let issue = {
            let model = self.model.lock().await;
            model.try_begin_next_page().await
        };
        let Some(issue) = issue else {
            return;
        };
        tracing::debug!(page = issue.page, mode = ?issue.mode, "Loading next page");
        self.run_listing_fetch(issue).await;
    }

    /// Fetch full details (including credits) for one movie. Independent of
    /// the listing state.
    pub async fn fetch_detail(&self, id: u64) {
        let (api, language) = {
            let model = self.model.lock().await;
            (model.get_api(), model.selected_language().await)
        };
        let Some(api) = api else {
            return;
        };

        {
            let model = self.model.lock().await;
            model.begin_detail_fetch().await;
        }

        match api.full_movie_details(id, language).await {
            Ok(details) => {
                tracing::info!(movie_id = id, title = %details.title, "Loaded movie details");
                let model = self.model.lock().await;
                model.complete_detail_fetch(details).await;
            }
            Err(e) => {
                tracing::error!(movie_id = id, error = %e, "Failed to load movie details");
                let model = self.model.lock().await;
                model.fail_detail_fetch(Self::format_error(&e)).await;
            }
        }
    }

    /// Prefetch several pages of a category at once and replace the list
    /// with the concatenation. One failed page aborts the whole operation.
    pub async fn fetch_bulk(&self, category: MovieCategory, pages: u32, language: &str) {
        tracing::debug!(category = category.path_segment(), pages, "Bulk prefetch");
        let (api, issue) = {
            let model = self.model.lock().await;
            let issue = model
                .begin_listing_fetch(BrowseMode::Category(category), 1, language, true)
                .await;
            (model.get_api(), issue)
        };
        let Some(api) = api else {
            return;
        };

        match api.multiple_pages(category, pages, language).await {
            Ok(movies) => {
                tracing::info!(count = movies.len(), "Bulk prefetch complete");
                let model = self.model.lock().await;
                if model.complete_bulk_fetch(issue.token, movies).await {
                    model.reset_list_selection().await;
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Bulk prefetch failed");
                let message = Self::format_error(&e);
                let model = self.model.lock().await;
                if model
                    .fail_listing_fetch(issue.token, message.clone())
                    .await
                {
                    model.set_error(message).await;
                }
            }
        }
    }

    /// Load the genre table used to render genre names. Failure is logged
    /// and ignored; listings work without it.
    pub async fn load_genres(&self) {
        let (api, language) = {
            let model = self.model.lock().await;
            (model.get_api(), model.selected_language().await)
        };
        let Some(api) = api else {
            return;
        };

        match api.movie_genres(language).await {
            Ok(genres) => {
                tracing::debug!(count = genres.len(), "Loaded genre table");
                let model = self.model.lock().await;
                model.set_genres(genres).await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not load genre table");
            }
        }
    }

    /// Shared tail of every listing operation: consult the page cache for
    /// category pages, hit the endpoint the mode calls for otherwise, then
    /// merge or record the failure under the issue's generation token.
    async fn run_listing_fetch(&self, issue: ListingIssue) {
        let (api, cache) = {
            let model = self.model.lock().await;
            (model.get_api(), model.page_cache())
        };
        let Some(api) = api else {
            return;
        };

        if let BrowseMode::Category(category) = &issue.mode {
            let category = *category;
            if let Some(envelope) = cache.get(category, &issue.language, issue.page).await {
                tracing::debug!(
                    category = category.path_segment(),
                    page = issue.page,
                    "Serving listing page from cache"
                );
                let model = self.model.lock().await;
                if model
                    .complete_listing_fetch(issue.token, issue.reset, envelope)
                    .await
                    && issue.reset
                {
                    model.reset_list_selection().await;
                }
                return;
            }
        }

        let result = match &issue.mode {
            BrowseMode::Category(category) => {
                api.movies_by_category(*category, issue.page, &issue.language)
                    .await
            }
            BrowseMode::AllMovies { sort_by } => {
                api.discover_movies(issue.page, &issue.language, *sort_by).await
            }
            BrowseMode::Search { query } => {
                api.search_movies(query, issue.page, &issue.language).await
            }
        };

        match result {
            Ok(envelope) => {
                tracing::info!(
                    mode = ?issue.mode,
                    page = envelope.page,
                    results = envelope.results.len(),
                    total_pages = envelope.total_pages,
                    "Listing fetch complete"
                );
                if let BrowseMode::Category(category) = &issue.mode {
                    cache
                        .insert(*category, &issue.language, issue.page, envelope.clone())
                        .await;
                }
                let model = self.model.lock().await;
                if model
                    .complete_listing_fetch(issue.token, issue.reset, envelope)
                    .await
                    && issue.reset
                {
                    model.reset_list_selection().await;
                }
            }
            Err(e) => {
                tracing::error!(mode = ?issue.mode, page = issue.page, error = %e, "Listing fetch failed");
                let message = Self::format_error(&e);
                let model = self.model.lock().await;
                if model
                    .fail_listing_fetch(issue.token, message.clone())
                    .await
                {
                    model.set_error(message).await;
                }
            }
        }
    }
}
