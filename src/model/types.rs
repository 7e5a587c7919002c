//! Core type definitions for the application

use std::time::Instant;

/// Which section of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Search,
    Categories,
    MovieList,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Categories,
            ActiveSection::Categories => ActiveSection::MovieList,
            ActiveSection::MovieList => ActiveSection::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::MovieList,
            ActiveSection::Categories => ActiveSection::Search,
            ActiveSection::MovieList => ActiveSection::Categories,
        }
    }
}

/// The fixed TMDB listing categories
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum MovieCategory {
    #[default]
    Popular,
    TopRated,
    Upcoming,
    NowPlaying,
}

impl MovieCategory {
    pub const ALL: [MovieCategory; 4] = [
        MovieCategory::Popular,
        MovieCategory::TopRated,
        MovieCategory::Upcoming,
        MovieCategory::NowPlaying,
    ];

    /// Path segment used by the `/movie/{category}` endpoints
    pub fn path_segment(self) -> &'static str {
        match self {
            MovieCategory::Popular => "popular",
            MovieCategory::TopRated => "top_rated",
            MovieCategory::Upcoming => "upcoming",
            MovieCategory::NowPlaying => "now_playing",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MovieCategory::Popular => "Popular",
            MovieCategory::TopRated => "Top Rated",
            MovieCategory::Upcoming => "Upcoming",
            MovieCategory::NowPlaying => "Now Playing",
        }
    }
}

/// Sort order for the discover ("all movies") listing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortOption {
    #[default]
    PopularityDesc,
    VoteAverageDesc,
    ReleaseDateDesc,
}

impl SortOption {
    /// Value of the `sort_by` query parameter
    pub fn as_param(self) -> &'static str {
        match self {
            SortOption::PopularityDesc => "popularity.desc",
            SortOption::VoteAverageDesc => "vote_average.desc",
            SortOption::ReleaseDateDesc => "primary_release_date.desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOption::PopularityDesc => "popularity",
            SortOption::VoteAverageDesc => "rating",
            SortOption::ReleaseDateDesc => "release date",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SortOption::PopularityDesc => SortOption::VoteAverageDesc,
            SortOption::VoteAverageDesc => SortOption::ReleaseDateDesc,
            SortOption::ReleaseDateDesc => SortOption::PopularityDesc,
        }
    }
}

/// Language filters offered in the sidebar; the empty tag means no filter
pub const LANGUAGES: [(&str, &str); 5] = [
    ("", "Any language"),
    ("en-US", "English"),
    ("fr-FR", "Français"),
    ("de-DE", "Deutsch"),
    ("es-ES", "Español"),
];

/// An entry in the browse sidebar: the fixed categories plus the discover view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrowseEntry {
    Category(MovieCategory),
    AllMovies,
}

impl BrowseEntry {
    pub const ALL: [BrowseEntry; 5] = [
        BrowseEntry::Category(MovieCategory::Popular),
        BrowseEntry::Category(MovieCategory::TopRated),
        BrowseEntry::Category(MovieCategory::Upcoming),
        BrowseEntry::Category(MovieCategory::NowPlaying),
        BrowseEntry::AllMovies,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BrowseEntry::Category(c) => c.label(),
            BrowseEntry::AllMovies => "All Movies",
        }
    }
}

/// UI state for the application
#[derive(Clone)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_query: String,
    pub browse_selected: usize,
    pub language_selected: usize,
    pub list_selected: usize,
    pub show_detail: bool,
    pub show_help_popup: bool,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Categories,
            search_query: String::new(),
            browse_selected: 0,
            language_selected: 0,
            list_selected: 0,
            show_detail: false,
            show_help_popup: false,
            error_message: None,
            error_timestamp: None,
        }
    }
}
