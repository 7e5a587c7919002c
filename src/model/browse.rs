//! Browse/search state: the accumulated movie list, pagination cursors,
//! the active browsing mode, and the merge/dedup rules for paging.
//!
//! All mutation goes through `begin_fetch` / `complete_fetch` / `fail_fetch`
//! so that a response resolving after the user has switched modes can be
//! recognized as stale and dropped instead of merged into the wrong list.

use std::collections::HashSet;

use super::movie::{MovieDetails, MovieSummary, PageEnvelope};
use super::types::{MovieCategory, SortOption};

/// Which listing view is active. Exactly one at a time; `load_next_page`
/// dispatches on it exhaustively.
#[derive(Clone, Debug, PartialEq)]
pub enum BrowseMode {
    Category(MovieCategory),
    AllMovies { sort_by: SortOption },
    Search { query: String },
}

impl Default for BrowseMode {
    fn default() -> Self {
        BrowseMode::Category(MovieCategory::Popular)
    }
}

impl BrowseMode {
    pub fn is_search(&self) -> bool {
        matches!(self, BrowseMode::Search { .. })
    }
}

/// State owned by the browse/search store
#[derive(Clone, Debug, Default)]
pub struct BrowseState {
    pub items: Vec<MovieSummary>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_results: u32,
    pub mode: BrowseMode,
    /// Last non-search mode, so an empty search query can revert to it
    pub prior_mode: BrowseMode,
    pub language: String,
    /// Full-list spinner: set only for reset / first-page fetches
    pub is_loading: bool,
    /// Set for every outstanding listing fetch; guards `load_next_page`
    pub in_flight: bool,
    pub last_error: Option<String>,
    /// Bumped on every mode switch or reset; completions carrying an older
    /// value are stale and discarded
    pub generation: u64,
}

impl BrowseState {
    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// True when `load_next_page` may dispatch: more pages exist and no
    /// listing fetch is outstanding. Checked and acted on under one lock.
    pub fn can_load_next(&self) -> bool {
        self.has_more() && !self.in_flight
    }

    /// Record that a listing fetch is being issued and return the generation
    /// token the completion must present.
    ///
    /// `show_spinner` follows the reset/first-page rule: continuation
    /// fetches run without flipping `is_loading` so infinite scroll does not
    /// blank the list.
    pub fn begin_fetch(
        &mut self,
        mode: BrowseMode,
        language: &str,
        reset: bool,
        show_spinner: bool,
    ) -> u64 {
        if mode != self.mode || reset {
            self.generation += 1;
        }
        if !mode.is_search() {
            self.prior_mode = mode.clone();
        }
        self.mode = mode;
        self.language = language.to_string();
        self.last_error = None;
        if show_spinner {
            self.is_loading = true;
        }
        self.in_flight = true;
        self.generation
    }

    /// Merge a successful page into the list. Returns false (and changes
    /// nothing) when the response is stale, i.e. a newer fetch superseded
    /// the one that produced it.
    pub fn complete_fetch(&mut self, token: u64, reset: bool, envelope: PageEnvelope) -> bool {
        if token != self.generation {
            tracing::debug!(
                token,
                generation = self.generation,
                page = envelope.page,
                "Discarding stale listing response"
            );
            return false;
        }

        if reset {
            self.items = envelope.results;
        } else {
            let existing: HashSet<u64> = self.items.iter().map(|m| m.id).collect();
            self.items.extend(
                envelope
                    .results
                    .into_iter()
                    .filter(|m| !existing.contains(&m.id)),
            );
        }

        self.current_page = envelope.page;
        self.total_pages = envelope.total_pages;
        self.total_results = envelope.total_results;
        self.is_loading = false;
        self.in_flight = false;
        true
    }

    /// Record a failed fetch. Items and cursors keep their previous values;
    /// stale failures are dropped entirely. Returns whether the failure was
    /// recorded.
    pub fn fail_fetch(&mut self, token: u64, message: String) -> bool {
        if token != self.generation {
            tracing::debug!(token, generation = self.generation, "Discarding stale listing error");
            return false;
        }
        self.last_error = Some(message);
        self.is_loading = false;
        self.in_flight = false;
        true
    }

    /// Replace the whole list with a bulk prefetch result. Concatenated
    /// input is kept as-is: the bulk helper does not dedup. Stale
    /// completions are dropped like any other.
    pub fn complete_bulk(&mut self, token: u64, movies: Vec<MovieSummary>) -> bool {
        if token != self.generation {
            tracing::debug!(token, generation = self.generation, "Discarding stale bulk response");
            return false;
        }
        self.items = movies;
        self.current_page = 1;
        self.total_pages = 1;
        self.total_results = self.items.len() as u32;
        self.is_loading = false;
        self.in_flight = false;
        true
    }
}

/// Single-movie detail sub-state; independent lifecycle, never touches the
/// listing fields.
#[derive(Clone, Debug, Default)]
pub struct DetailState {
    pub detail: Option<MovieDetails>,
    pub is_loading_detail: bool,
    pub detail_error: Option<String>,
}

impl DetailState {
    pub fn begin(&mut self) {
        self.is_loading_detail = true;
        self.detail_error = None;
    }

    pub fn complete(&mut self, detail: MovieDetails) {
        self.detail = Some(detail);
        self.is_loading_detail = false;
    }

    /// Failure keeps whatever detail was shown before
    pub fn fail(&mut self, message: String) {
        self.detail_error = Some(message);
        self.is_loading_detail = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64) -> MovieSummary {
        MovieSummary {
            id,
            title: format!("Movie {id}"),
            poster_path: None,
            backdrop_path: None,
            release_date: String::new(),
            vote_average: 0.0,
            overview: String::new(),
            genre_ids: vec![],
            original_title: None,
            original_language: None,
        }
    }

    fn envelope(page: u32, ids: &[u64], total_pages: u32) -> PageEnvelope {
        PageEnvelope {
            page,
            results: ids.iter().copied().map(movie).collect(),
            total_pages,
            total_results: total_pages * 20,
        }
    }

    #[test]
    fn reset_replaces_items_wholesale() {
        let mut state = BrowseState::default();
        let token = state.begin_fetch(BrowseMode::default(), "", true, true);
        assert!(state.complete_fetch(token, true, envelope(1, &[1, 2], 10)));

        let token = state.begin_fetch(BrowseMode::default(), "", true, true);
        assert!(state.complete_fetch(token, true, envelope(1, &[3], 5)));

        let ids: Vec<u64> = state.items.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3]);
        assert_eq!(state.total_pages, 5);
    }

    #[test]
    fn continuation_dedups_and_preserves_incoming_order() {
        let mut state = BrowseState::default();
        let token = state.begin_fetch(BrowseMode::default(), "", true, true);
        state.complete_fetch(token, true, envelope(1, &[1, 2], 10));

        // page 2 repeats id 2; only 3 and 4 may be appended, in order
        let token = state.begin_fetch(BrowseMode::default(), "", false, false);
        state.complete_fetch(token, false, envelope(2, &[2, 4, 3], 10));

        let ids: Vec<u64> = state.items.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 4, 3]);
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn has_more_tracks_cursor_against_total() {
        let mut state = BrowseState::default();
        let token = state.begin_fetch(BrowseMode::default(), "", true, true);
        state.complete_fetch(token, true, envelope(1, &[1], 2));
        assert!(state.has_more());

        let token = state.begin_fetch(BrowseMode::default(), "", false, false);
        state.complete_fetch(token, false, envelope(2, &[2], 2));
        assert!(!state.has_more());
        assert!(!state.can_load_next());
    }

    #[test]
    fn in_flight_blocks_next_page() {
        let mut state = BrowseState::default();
        let token = state.begin_fetch(BrowseMode::default(), "", true, true);
        state.complete_fetch(token, true, envelope(1, &[1], 10));
        assert!(state.can_load_next());

        let _token = state.begin_fetch(BrowseMode::default(), "", false, false);
        assert!(!state.can_load_next());
    }

    #[test]
    fn mode_switch_discards_stale_completion() {
        let mut state = BrowseState::default();
        let stale = state.begin_fetch(
            BrowseMode::Category(MovieCategory::Popular),
            "",
            true,
            true,
        );

        // user switches to search before the first response lands
        let fresh = state.begin_fetch(
            BrowseMode::Search { query: "matrix".into() },
            "",
            true,
            true,
        );

        assert!(!state.complete_fetch(stale, true, envelope(1, &[1, 2], 10)));
        assert!(state.items.is_empty());

        assert!(state.complete_fetch(fresh, true, envelope(1, &[9], 1)));
        let ids: Vec<u64> = state.items.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![9]);
    }

    #[test]
    fn stale_failure_does_not_clobber_fresh_state() {
        let mut state = BrowseState::default();
        let stale = state.begin_fetch(BrowseMode::default(), "", true, true);
        let fresh = state.begin_fetch(
            BrowseMode::Category(MovieCategory::TopRated),
            "",
            true,
            true,
        );
        state.complete_fetch(fresh, true, envelope(1, &[5], 3));

        state.fail_fetch(stale, "boom".into());
        assert!(state.last_error.is_none());
        assert_eq!(state.items.len(), 1);
    }

    #[test]
    fn failure_keeps_items_and_clears_loading() {
        let mut state = BrowseState::default();
        let token = state.begin_fetch(BrowseMode::default(), "", true, true);
        state.complete_fetch(token, true, envelope(1, &[1, 2], 10));

        let token = state.begin_fetch(BrowseMode::default(), "", true, true);
        assert!(state.is_loading);
        state.fail_fetch(token, "API error 500: Internal error".into());

        assert_eq!(state.last_error.as_deref(), Some("API error 500: Internal error"));
        assert_eq!(state.items.len(), 2);
        assert!(!state.is_loading);
        assert!(!state.in_flight);
    }

    #[test]
    fn prior_mode_survives_search() {
        let mut state = BrowseState::default();
        state.begin_fetch(
            BrowseMode::Category(MovieCategory::Upcoming),
            "",
            true,
            true,
        );
        state.begin_fetch(
            BrowseMode::Search { query: "dune".into() },
            "",
            true,
            true,
        );
        assert_eq!(
            state.prior_mode,
            BrowseMode::Category(MovieCategory::Upcoming)
        );
    }

    #[test]
    fn continuation_in_same_mode_keeps_generation() {
        let mut state = BrowseState::default();
        let first = state.begin_fetch(BrowseMode::default(), "", true, true);
        state.complete_fetch(first, true, envelope(1, &[1], 10));

        let second = state.begin_fetch(BrowseMode::default(), "", false, false);
        assert_eq!(first, second);
    }
}
