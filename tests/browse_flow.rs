//! End-to-end exercises of the browse/search store through the public API,
//! with a scripted stand-in for the TMDB client.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::Mutex;

use tmdb_rs::controller::AppController;
use tmdb_rs::model::{
    ActiveSection, ApiResult, AppModel, BrowseMode, Genre, MovieApi, MovieCategory, MovieCredits,
    MovieDetails, MovieSummary, PageEnvelope, SortOption, TmdbError,
};

fn movie(id: u64) -> MovieSummary {
    MovieSummary {
        id,
        title: format!("Movie {id}"),
        poster_path: None,
        backdrop_path: None,
        release_date: "2024-01-01".to_string(),
        vote_average: 7.0,
        overview: String::new(),
        genre_ids: vec![28],
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

/// Scripted MovieApi: fixed pages per endpoint, counted calls
#[derive(Default)]
struct ScriptedApi {
    category_pages: HashMap<u32, PageEnvelope>,
    search_pages: HashMap<u32, PageEnvelope>,
    detail: Option<MovieDetails>,
    fail_all: bool,
    category_calls: AtomicU32,
    search_calls: AtomicU32,
}

impl ScriptedApi {
    fn upstream_error() -> TmdbError {
        TmdbError::Upstream {
            status: 500,
            message: "Internal error: Something went wrong".to_string(),
        }
    }
}

#[async_trait]
impl MovieApi for ScriptedApi {
    async fn movies_by_category(
        &self,
        _category: MovieCategory,
        page: u32,
        _language: &str,
    ) -> ApiResult<PageEnvelope> {
        self.category_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all {
            return Err(Self::upstream_error());
        }
        Ok(self.category_pages.get(&page).cloned().unwrap_or_default())
    }

    async fn discover_movies(
        &self,
        page: u32,
        _language: &str,
        _sort_by: SortOption,
    ) -> ApiResult<PageEnvelope> {
        if self.fail_all {
            return Err(Self::upstream_error());
        }
        Ok(self.category_pages.get(&page).cloned().unwrap_or_default())
    }

    async fn search_movies(
        &self,
        _query: &str,
        page: u32,
        _language: &str,
    ) -> ApiResult<PageEnvelope> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all {
            return Err(Self::upstream_error());
        }
        Ok(self.search_pages.get(&page).cloned().unwrap_or_default())
    }

    async fn full_movie_details(&self, id: u64, _language: &str) -> ApiResult<MovieDetails> {
        if self.fail_all {
            return Err(Self::upstream_error());
        }
        self.detail.clone().ok_or(TmdbError::Upstream {
            status: 404,
            message: format!("movie {id} not scripted"),
        })
    }

    async fn movie_genres(&self, _language: &str) -> ApiResult<Vec<Genre>> {
        if self.fail_all {
            return Err(Self::upstream_error());
        }
        Ok(vec![Genre { id: 28, name: "Action".to_string() }])
    }
}

fn setup(api: Arc<ScriptedApi>) -> (Arc<Mutex<AppModel>>, AppController) {
    let mut app_model = AppModel::new();
    app_model.set_api(api);
    let model = Arc::new(Mutex::new(app_model));
    let controller = AppController::new(model.clone());
    (model, controller)
}

#[tokio::test]
async fn infinite_scroll_accumulates_pages_without_duplicates() {
    let api = Arc::new(ScriptedApi {
        category_pages: HashMap::from([
            (1, envelope(1, &[1, 2], 3)),
            (2, envelope(2, &[2, 3], 3)),
            (3, envelope(3, &[3, 4], 3)),
        ]),
        ..Default::default()
    });
    let (model, controller) = setup(api.clone());

    controller
        .fetch_category(MovieCategory::Popular, 1, "", true)
        .await;
    controller.load_next_page().await;
    controller.load_next_page().await;

    let state = model.lock().await.get_browse_state().await;
    let ids: Vec<u64> = state.items.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(state.current_page, 3);
    assert!(!state.has_more());

    // a further call must not hit the API
    controller.load_next_page().await;
    assert_eq!(api.category_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn search_then_empty_query_restores_category_listing() {
    let api = Arc::new(ScriptedApi {
        category_pages: HashMap::from([(1, envelope(1, &[1, 2], 1))]),
        search_pages: HashMap::from([(1, envelope(1, &[40, 41], 2))]),
        ..Default::default()
    });
    let (model, controller) = setup(api.clone());

    controller
        .fetch_category(MovieCategory::NowPlaying, 1, "", true)
        .await;
    controller.search("blade runner", 1, true).await;

    {
        let state = model.lock().await.get_browse_state().await;
        assert_eq!(
            state.mode,
            BrowseMode::Search { query: "blade runner".to_string() }
        );
        let ids: Vec<u64> = state.items.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![40, 41]);
        assert!(state.has_more());
    }

    controller.search("", 1, true).await;

    let state = model.lock().await.get_browse_state().await;
    assert_eq!(state.mode, BrowseMode::Category(MovieCategory::NowPlaying));
    let ids: Vec<u64> = state.items.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 2]);
    // the revert is served by the page cache, not the search endpoint
    assert_eq!(api.search_calls.load(Ordering::SeqCst), 1);
    assert_eq!(api.category_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn upstream_failure_surfaces_message_and_preserves_list() {
    let good = Arc::new(ScriptedApi {
        category_pages: HashMap::from([(1, envelope(1, &[1, 2], 5))]),
        ..Default::default()
    });
    let (model, controller) = setup(good);
    controller
        .fetch_category(MovieCategory::Popular, 1, "", true)
        .await;

    {
        let mut guard = model.lock().await;
        guard.set_api(Arc::new(ScriptedApi { fail_all: true, ..Default::default() }));
    }
    controller.search("anything", 1, true).await;

    let guard = model.lock().await;
    let state = guard.get_browse_state().await;
    assert_eq!(
        state.last_error.as_deref(),
        Some("API error 500: Internal error: Something went wrong")
    );
    let ids: Vec<u64> = state.items.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert!(!state.is_loading);
    // the failure is also raised as a dismissable notification
    assert!(guard.get_ui_state().await.error_message.is_some());
}

#[tokio::test]
async fn detail_lifecycle_is_independent_of_listing() {
    let api = Arc::new(ScriptedApi {
        category_pages: HashMap::from([(1, envelope(1, &[603], 1))]),
        detail: Some(MovieDetails {
            id: 603,
            title: "The Matrix".to_string(),
            poster_path: None,
            release_date: "1999-03-30".to_string(),
            vote_average: 8.2,
            vote_count: 26000,
            overview: "A hacker learns the truth.".to_string(),
            genres: vec![Genre { id: 28, name: "Action".to_string() }],
            runtime: Some(136),
            tagline: None,
            budget: 63_000_000,
            revenue: 463_517_383,
            production_companies: vec![],
            credits: MovieCredits::default(),
        }),
        ..Default::default()
    });
    let (model, controller) = setup(api);

    controller
        .fetch_category(MovieCategory::Popular, 1, "", true)
        .await;
    controller.fetch_detail(603).await;

    let guard = model.lock().await;
    let detail = guard.get_detail_state().await;
    assert_eq!(detail.detail.as_ref().unwrap().id, 603);
    assert!(!detail.is_loading_detail);

    // listing state untouched by the detail fetch
    let state = guard.get_browse_state().await;
    assert_eq!(state.items.len(), 1);
    assert!(state.last_error.is_none());
}

#[tokio::test]
async fn typed_search_query_is_submitted_on_enter() {
    let api = Arc::new(ScriptedApi {
        search_pages: HashMap::from([(1, envelope(1, &[77], 1))]),
        ..Default::default()
    });
    let (model, controller) = setup(api.clone());

    {
        let guard = model.lock().await;
        guard.set_active_section(ActiveSection::Search).await;
    }

    for c in "dune".chars() {
        controller
            .handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
            .await
            .unwrap();
    }
    controller
        .handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
        .await
        .unwrap();

    assert_eq!(api.search_calls.load(Ordering::SeqCst), 1);
    let guard = model.lock().await;
    let state = guard.get_browse_state().await;
    assert_eq!(state.mode, BrowseMode::Search { query: "dune".to_string() });
    let ids: Vec<u64> = state.items.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![77]);
    // the handler moves focus to the list so results are navigable
    assert_eq!(
        guard.get_ui_state().await.active_section,
        ActiveSection::MovieList
    );
}
