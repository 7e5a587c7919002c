//! Movie data types as returned by the TMDB v3 API

use chrono::NaiveDate;
use serde::Deserialize;

/// One movie as it appears in listing and search results
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
}

impl MovieSummary {
    /// Release year parsed from the `YYYY-MM-DD` date the API returns,
    /// or None when the date is absent or malformed
    pub fn release_year(&self) -> Option<i32> {
        NaiveDate::parse_from_str(&self.release_date, "%Y-%m-%d")
            .ok()
            .map(|d| chrono::Datelike::year(&d))
    }
}

/// One page of listing or search results with pagination metadata
#[derive(Clone, Debug, Deserialize, Default, PartialEq)]
pub struct PageEnvelope {
    pub page: u32,
    pub results: Vec<MovieSummary>,
    pub total_pages: u32,
    pub total_results: u32,
}

/// A genre as returned by `/genre/movie/list`
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GenreList {
    pub genres: Vec<Genre>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}

/// A cast credit from `append_to_response=credits`
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
}

/// A crew credit from `append_to_response=credits`
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Default, PartialEq)]
pub struct MovieCredits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

/// Full movie details including credits, from
/// `/movie/{id}?append_to_response=credits`
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub credits: MovieCredits,
}

impl MovieDetails {
    pub fn director(&self) -> Option<&CrewMember> {
        self.credits
            .crew
            .iter()
            .find(|c| c.job.as_deref() == Some("Director"))
    }
}
