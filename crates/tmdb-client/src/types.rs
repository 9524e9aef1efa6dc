//! TMDB response shapes and the display record derived from them.

use serde::Deserialize;

/// Poster shown when TMDB has no artwork or cannot be reached
pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/200x300?text=No+Image";

/// Base URL that TMDB poster paths are appended to (w500 renditions)
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Display metadata for one movie card.
///
/// Every field always has a printable value; see [`EnrichmentRecord::fallback`].
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentRecord {
    pub poster: String,
    pub title: String,
    /// Vote average rounded to one decimal
    pub rating: f64,
    pub year: String,
    /// Comma-separated genre names
    pub genres: String,
    /// YouTube trailer link, or "#" when there is none
    pub trailer: String,
}

impl EnrichmentRecord {
    /// Placeholder values used whenever a lookup fails
    pub fn fallback() -> Self {
        Self {
            poster: PLACEHOLDER_POSTER.to_string(),
            title: "Unknown".to_string(),
            rating: 0.0,
            year: "N/A".to_string(),
            genres: "Unknown".to_string(),
            trailer: "#".to_string(),
        }
    }

    /// Map a TMDB details response onto display fields.
    ///
    /// Missing or empty fields fall back individually.
    pub fn from_details(details: MovieDetails, image_base: &str) -> Self {
        let poster = match details.poster_path.as_deref() {
            Some(path) if !path.is_empty() => format!("{}{}", image_base, path),
            _ => PLACEHOLDER_POSTER.to_string(),
        };

        let title = details
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());

        let rating = details
            .vote_average
            .filter(|v| v.is_finite())
            .map(round_rating)
            .unwrap_or(0.0);

        let year = details
            .release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .filter(|y| !y.is_empty())
            .unwrap_or("N/A")
            .to_string();

        let genre_names: Vec<String> = details
            .genres
            .unwrap_or_default()
            .into_iter()
            .filter_map(|g| g.name)
            .filter(|name| !name.is_empty())
            .collect();
        let genres = if genre_names.is_empty() {
            "Unknown".to_string()
        } else {
            genre_names.join(", ")
        };

        let trailer = details
            .videos
            .and_then(|v| v.results)
            .unwrap_or_default()
            .into_iter()
            .find_map(|video| video.youtube_trailer_key())
            .map(|key| format!("{}{}", YOUTUBE_WATCH_URL, key))
            .unwrap_or_else(|| "#".to_string());

        Self {
            poster,
            title,
            rating,
            year,
            genres,
            trailer,
        }
    }
}

/// Round to one decimal on the exact binary value, ties to even.
///
/// Goes through the decimal rendering so that `7.25` shows as `7.2` and
/// `0.05` (stored slightly above the tie) shows as `0.1`.
fn round_rating(vote_average: f64) -> f64 {
    format!("{:.1}", vote_average)
        .parse()
        .unwrap_or(vote_average)
}

/// `GET /movie/{id}?append_to_response=videos` body, reduced to the fields we read
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieDetails {
    pub poster_path: Option<String>,
    pub title: Option<String>,
    pub vote_average: Option<f64>,
    pub release_date: Option<String>,
    pub genres: Option<Vec<GenreEntry>>,
    pub videos: Option<VideoList>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenreEntry {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoList {
    pub results: Option<Vec<Video>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Video {
    pub key: Option<String>,
    pub site: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl Video {
    fn youtube_trailer_key(self) -> Option<String> {
        let is_trailer = self.kind.as_deref() == Some("Trailer");
        let on_youtube = self.site.as_deref() == Some("YouTube");
        match self.key {
            Some(key) if is_trailer && on_youtube && !key.is_empty() => Some(key),
            _ => None,
        }
    }
}
