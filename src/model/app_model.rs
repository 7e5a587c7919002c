//! Main application model with state management

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{Mutex, RwLock};

use super::browse::{BrowseMode, BrowseState, DetailState};
use super::cache::PageCache;
use super::movie::{Genre, MovieDetails, MovieSummary, PageEnvelope};
use super::tmdb_client::MovieApi;
use super::types::{ActiveSection, BrowseEntry, UiState, LANGUAGES};

/// A listing fetch the model has admitted: the mode and page to request and
/// the generation token the completion must present
#[derive(Clone, Debug)]
pub struct ListingIssue {
    pub mode: BrowseMode,
    pub page: u32,
    pub language: String,
    pub reset: bool,
    pub token: u64,
}

/// Main application model containing all state
pub struct AppModel {
    pub api: Option<Arc<dyn MovieApi>>,
    browse: Arc<Mutex<BrowseState>>,
    detail: Arc<Mutex<DetailState>>,
    pub ui_state: Arc<Mutex<UiState>>,
    genres: Arc<RwLock<HashMap<u64, String>>>,
    page_cache: PageCache,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    const PAGINATION_THRESHOLD: usize = 10;

    pub fn new() -> Self {
        Self {
            api: None,
            browse: Arc::new(Mutex::new(BrowseState::default())),
            detail: Arc::new(Mutex::new(DetailState::default())),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            genres: Arc::new(RwLock::new(HashMap::new())),
            page_cache: PageCache::new(),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_api(&mut self, api: Arc<dyn MovieApi>) {
        self.api = Some(api);
    }

    pub fn get_api(&self) -> Option<Arc<dyn MovieApi>> {
        self.api.clone()
    }

    pub fn page_cache(&self) -> PageCache {
        self.page_cache.clone()
    }

    // ========================================================================
    // Browse state
    // ========================================================================

    pub async fn get_browse_state(&self) -> BrowseState {
        self.browse.lock().await.clone()
    }

    /// Admit a listing fetch for an explicit mode (category switch, search
    /// submit, language change) and hand back its generation token.
    pub async fn begin_listing_fetch(
        &self,
        mode: BrowseMode,
        page: u32,
        language: &str,
        reset: bool,
    ) -> ListingIssue {
        let mut browse = self.browse.lock().await;
        let show_spinner = reset || page == 1;
        let token = browse.begin_fetch(mode.clone(), language, reset, show_spinner);
        ListingIssue {
            mode,
            page,
            language: language.to_string(),
            reset,
            token,
        }
    }

    /// Admit a next-page fetch, or None when there is nothing to load or a
    /// listing fetch is already outstanding. Guard check and flag set happen
    /// under the same lock, so two racing callers cannot both be admitted.
    pub async fn try_begin_next_page(&self) -> Option<ListingIssue> {
        let mut browse = self.browse.lock().await;
        if !browse.can_load_next() {
            return None;
        }

        let mode = browse.mode.clone();
        let language = browse.language.clone();
        let page = browse.current_page + 1;
        let token = browse.begin_fetch(mode.clone(), &language, false, false);
        Some(ListingIssue {
            mode,
            page,
            language,
            reset: false,
            token,
        })
    }

    pub async fn complete_listing_fetch(
        &self,
        token: u64,
        reset: bool,
        envelope: PageEnvelope,
    ) -> bool {
        self.browse.lock().await.complete_fetch(token, reset, envelope)
    }

    pub async fn fail_listing_fetch(&self, token: u64, message: String) -> bool {
        self.browse.lock().await.fail_fetch(token, message)
    }

    /// The mode that was active before search began, for empty-query revert
    pub async fn prior_browse_mode(&self) -> BrowseMode {
        self.browse.lock().await.prior_mode.clone()
    }

    pub async fn complete_bulk_fetch(&self, token: u64, movies: Vec<MovieSummary>) -> bool {
        self.browse.lock().await.complete_bulk(token, movies)
    }

    /// True when the selection is close enough to the end of the list that
    /// the next page should be requested
    pub async fn should_load_more(&self) -> bool {
        let browse = self.browse.lock().await;
        if !browse.can_load_next() {
            return false;
        }
        let ui = self.ui_state.lock().await;
        ui.list_selected + Self::PAGINATION_THRESHOLD >= browse.items.len()
    }

    // ========================================================================
    // Detail state
    // ========================================================================

    pub async fn get_detail_state(&self) -> DetailState {
        self.detail.lock().await.clone()
    }

    pub async fn begin_detail_fetch(&self) {
        self.detail.lock().await.begin();
    }

    pub async fn complete_detail_fetch(&self, details: MovieDetails) {
        self.detail.lock().await.complete(details);
    }

    pub async fn fail_detail_fetch(&self, message: String) {
        self.detail.lock().await.fail(message);
    }

    // ========================================================================
    // Genres
    // ========================================================================

    pub async fn set_genres(&self, genres: Vec<Genre>) {
        let mut table = self.genres.write().await;
        *table = genres.into_iter().map(|g| (g.id, g.name)).collect();
    }

    pub async fn genre_names(&self, ids: &[u64]) -> Vec<String> {
        let table = self.genres.read().await;
        ids.iter().filter_map(|id| table.get(id).cloned()).collect()
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn cycle_section_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn cycle_section_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.prev();
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        let mut state = self.ui_state.lock().await;
        state.active_section = section;
    }

    pub async fn update_search_query(&self, query: String) {
        let mut state = self.ui_state.lock().await;
        state.search_query = query;
    }

    pub async fn append_to_search(&self, c: char) {
        let mut state = self.ui_state.lock().await;
        state.search_query.push(c);
    }

    pub async fn backspace_search(&self) {
        let mut state = self.ui_state.lock().await;
        state.search_query.pop();
    }

    pub async fn browse_move_up(&self) {
        let mut state = self.ui_state.lock().await;
        if state.browse_selected > 0 {
            state.browse_selected -= 1;
        }
    }

    pub async fn browse_move_down(&self) {
        let mut state = self.ui_state.lock().await;
        if state.browse_selected < BrowseEntry::ALL.len() - 1 {
            state.browse_selected += 1;
        }
    }

    pub async fn selected_browse_entry(&self) -> BrowseEntry {
        let state = self.ui_state.lock().await;
        BrowseEntry::ALL[state.browse_selected.min(BrowseEntry::ALL.len() - 1)]
    }

    pub async fn list_move_up(&self) {
        let mut state = self.ui_state.lock().await;
        if state.list_selected > 0 {
            state.list_selected -= 1;
        }
    }

    pub async fn list_move_down(&self) {
        let item_count = self.browse.lock().await.items.len();
        let mut state = self.ui_state.lock().await;
        if state.list_selected < item_count.saturating_sub(1) {
            state.list_selected += 1;
        }
    }

    pub async fn reset_list_selection(&self) {
        let mut state = self.ui_state.lock().await;
        state.list_selected = 0;
    }

    pub async fn get_selected_movie(&self) -> Option<MovieSummary> {
        let browse = self.browse.lock().await;
        let state = self.ui_state.lock().await;
        browse.items.get(state.list_selected).cloned()
    }

    /// Advance the language filter and return the new tag
    pub async fn cycle_language(&self) -> &'static str {
        let mut state = self.ui_state.lock().await;
        state.language_selected = (state.language_selected + 1) % LANGUAGES.len();
        LANGUAGES[state.language_selected].0
    }

    pub async fn selected_language(&self) -> &'static str {
        let state = self.ui_state.lock().await;
        LANGUAGES[state.language_selected.min(LANGUAGES.len() - 1)].0
    }

    pub async fn show_detail(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_detail = true;
    }

    pub async fn hide_detail(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_detail = false;
    }

    pub async fn is_detail_open(&self) -> bool {
        self.ui_state.lock().await.show_detail
    }

    pub async fn show_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp {
            if timestamp.elapsed().as_secs() > 5 {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::movie::PageEnvelope;
    use crate::model::types::MovieCategory;

    fn envelope(page: u32, ids: &[u64], total_pages: u32) -> PageEnvelope {
        PageEnvelope {
            page,
            results: ids
                .iter()
                .map(|id| MovieSummary {
                    id: *id,
                    title: format!("Movie {id}"),
                    poster_path: None,
                    backdrop_path: None,
                    release_date: String::new(),
                    vote_average: 0.0,
                    overview: String::new(),
                    genre_ids: vec![],
                    original_title: None,
                    original_language: None,
                })
                .collect(),
            total_pages,
            total_results: total_pages * 20,
        }
    }

    #[tokio::test]
    async fn next_page_admitted_only_once_while_outstanding() {
        let model = AppModel::new();
        let issue = model
            .begin_listing_fetch(
                BrowseMode::Category(MovieCategory::Popular),
                1,
                "",
                true,
            )
            .await;
        model
            .complete_listing_fetch(issue.token, true, envelope(1, &[1, 2], 10))
            .await;

        let first = model.try_begin_next_page().await;
        assert!(first.is_some());
        assert_eq!(first.as_ref().unwrap().page, 2);

        // the first admission is still outstanding
        assert!(model.try_begin_next_page().await.is_none());
    }

    #[tokio::test]
    async fn next_page_refused_on_last_page() {
        let model = AppModel::new();
        let issue = model
            .begin_listing_fetch(
                BrowseMode::Category(MovieCategory::Popular),
                1,
                "",
                true,
            )
            .await;
        model
            .complete_listing_fetch(issue.token, true, envelope(1, &[1], 1))
            .await;

        assert!(model.try_begin_next_page().await.is_none());
    }

    #[tokio::test]
    async fn should_load_more_respects_threshold() {
        let model = AppModel::new();
        let issue = model
            .begin_listing_fetch(
                BrowseMode::Category(MovieCategory::Popular),
                1,
                "",
                true,
            )
            .await;
        let ids: Vec<u64> = (1..=40).collect();
        model
            .complete_listing_fetch(issue.token, true, envelope(1, &ids, 10))
            .await;

        // selection at the top: far from the end
        assert!(!model.should_load_more().await);

        for _ in 0..35 {
            model.list_move_down().await;
        }
        assert!(model.should_load_more().await);
    }

    #[tokio::test]
    async fn genre_names_resolves_known_ids() {
        let model = AppModel::new();
        model
            .set_genres(vec![
                Genre { id: 28, name: "Action".into() },
                Genre { id: 878, name: "Science Fiction".into() },
            ])
            .await;

        let names = model.genre_names(&[28, 999, 878]).await;
        assert_eq!(names, vec!["Action".to_string(), "Science Fiction".to_string()]);
    }
}
