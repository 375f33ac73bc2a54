use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};
use watchtime_models::{MediaType, MovieRecord};

use crate::error::SourceError;
use crate::traits::SearchHit;

/// Value OMDb uses for absent fields
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Type", default)]
    item_type: String,
}

#[derive(Debug, Deserialize)]
struct OmdbTitle {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Runtime")]
    runtime: Option<String>,
    #[serde(rename = "Type", default)]
    item_type: String,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Actors")]
    actors: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbErrorBody {
    #[serde(rename = "Error")]
    error: Option<String>,
}

/// Parse a runtime string like "142 min" into minutes.
///
/// Missing, "N/A" and digit-free values are 0.
pub fn parse_runtime(runtime: &str) -> u32 {
    let digits: String = runtime
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Map an OMDb `Error` message onto the error taxonomy
pub fn classify_error_message(message: &str) -> SourceError {
    let lower = message.to_lowercase();
    if ["not found", "too many results", "incorrect imdb id"]
        .iter()
        .any(|pattern| lower.contains(pattern))
    {
        SourceError::NotFound(message.to_string())
    } else if lower.contains("limit") {
        SourceError::RateLimited(message.to_string())
    } else if lower.contains("api key") {
        SourceError::Configuration(message.to_string())
    } else {
        SourceError::UpstreamUnavailable(message.to_string())
    }
}

fn optional_field(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != NOT_AVAILABLE)
}

/// Turn a non-success HTTP response into an error, preferring OMDb's own message
async fn error_from_response(response: Response) -> SourceError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<OmdbErrorBody>(&body)
        .ok()
        .and_then(|b| b.error);

    if let Some(message) = message {
        let classified = classify_error_message(&message);
        // An unrecognized message on an auth failure is still a credential problem
        if status == StatusCode::UNAUTHORIZED
            && matches!(classified, SourceError::UpstreamUnavailable(_))
        {
            return SourceError::Configuration(message);
        }
        return classified;
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            SourceError::Configuration(format!(
                "Metadata provider rejected the API key ({})",
                status
            ))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            SourceError::RateLimited("Metadata provider request limit reached".to_string())
        }
        StatusCode::NOT_FOUND => {
            SourceError::NotFound(format!("Metadata provider returned {}", status))
        }
        _ => SourceError::UpstreamUnavailable(format!("Metadata provider returned {}", status)),
    }
}

/// Title search (`s=`), returning hits in provider order
pub async fn search(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
    search_type: Option<&str>,
) -> Result<Vec<SearchHit>, SourceError> {
    let mut params = vec![("s", query), ("apikey", api_key)];
    if let Some(search_type) = search_type {
        params.push(("type", search_type));
    }

    let response = client.get(base_url).query(&params).send().await?;
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    let data: OmdbSearchResponse = response.json().await?;
    if data.response != "True" {
        let message = data.error.unwrap_or_else(|| "Unknown error".to_string());
        debug!(query = %query, error = %message, "OMDb search returned no results");
        return Err(classify_error_message(&message));
    }

    let hits: Vec<SearchHit> = data
        .search
        .into_iter()
        .filter_map(|item| {
            let Some(imdb_id) = optional_field(item.imdb_id) else {
                warn!(title = %item.title, "Skipping OMDb search hit without imdbID");
                return None;
            };
            Some(SearchHit {
                native_id: imdb_id,
                title: item.title,
                year: item.year,
                media_type: MediaType::from_provider(&item.item_type),
            })
        })
        .collect();

    debug!(query = %query, hits = hits.len(), "OMDb search completed");
    Ok(hits)
}

/// Detail lookup by IMDb id (`i=`). `record_id` becomes the record's `id`.
pub async fn get_title(
    client: &Client,
    base_url: &str,
    api_key: &str,
    imdb_id: &str,
    record_id: String,
) -> Result<MovieRecord, SourceError> {
    let response = client
        .get(base_url)
        .query(&[("i", imdb_id), ("apikey", api_key)])
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    let data: OmdbTitle = response.json().await?;
    if data.response != "True" {
        let message = data.error.unwrap_or_else(|| "Movie not found!".to_string());
        return Err(classify_error_message(&message));
    }

    Ok(MovieRecord {
        id: record_id,
        title: data.title,
        year: data.year,
        duration: data.runtime.as_deref().map(parse_runtime).unwrap_or(0),
        media_type: MediaType::from_provider(&data.item_type),
        imdb_id: optional_field(data.imdb_id).or_else(|| Some(imdb_id.to_string())),
        poster: optional_field(data.poster),
        plot: optional_field(data.plot),
        genre: optional_field(data.genre),
        director: optional_field(data.director),
        actors: optional_field(data.actors),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_runtime() {
        assert_eq!(parse_runtime("142 min"), 142);
        assert_eq!(parse_runtime("45 min"), 45);
        assert_eq!(parse_runtime("N/A"), 0);
        assert_eq!(parse_runtime(""), 0);
        assert_eq!(parse_runtime("min"), 0);
        assert_eq!(parse_runtime("approx. 90 min"), 90);
    }

    #[test]
    fn test_classify_error_message() {
        assert_eq!(classify_error_message("Movie not found!").kind(), "not_found");
        assert_eq!(classify_error_message("Series not found!").kind(), "not_found");
        assert_eq!(classify_error_message("Too many results.").kind(), "not_found");
        assert_eq!(classify_error_message("Invalid API key!").kind(), "configuration");
        assert_eq!(classify_error_message("No API key provided.").kind(), "configuration");
        assert_eq!(classify_error_message("Request limit reached!").kind(), "rate_limited");
        assert_eq!(classify_error_message("Something broke").kind(), "upstream_unavailable");
    }

    #[test]
    fn test_optional_field_drops_not_available() {
        assert_eq!(optional_field(Some("N/A".to_string())), None);
        assert_eq!(optional_field(Some(String::new())), None);
        assert_eq!(optional_field(Some("Drama".to_string())), Some("Drama".to_string()));
        assert_eq!(optional_field(None), None);
    }
}
