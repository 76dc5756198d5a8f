//! Place search against a Nominatim endpoint.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::{Error, GeoCoord, PlaceSearch};

pub const NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Nominatim reports coordinates as strings; some mirrors use numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum Degrees {
    Text(String),
    Number(f64),
}

impl Degrees {
    fn value(&self) -> Option<f64> {
        let value = match self {
            Degrees::Text(text) => text.trim().parse().ok()?,
            Degrees::Number(number) => *number,
        };
        value.is_finite().then_some(value)
    }
}

#[derive(Deserialize)]
struct Place {
    lat: Option<Degrees>,
    lon: Option<Degrees>,
}

/// Builds the query URL asking for the single best matching city.
///
/// # Errors
///
/// Returns [`Error::Search`] if `endpoint` is not a valid URL.
///
/// # Usage
///
/// ```
/// use orthoview::search::{search_url, NOMINATIM_ENDPOINT};
///
/// let url = search_url(NOMINATIM_ENDPOINT, "Nowy Sącz").unwrap();
///
/// assert_eq!(
///     url.as_str(),
///     "https://nominatim.openstreetmap.org/search?q=Nowy+S%C4%85cz&limit=1&featureType=city&polygon_geojson=0&format=jsonv2",
/// );
/// ```
pub fn search_url(endpoint: &str, query: &str) -> Result<Url, Error> {
    Url::parse_with_params(
        endpoint,
        &[
            ("q", query),
            ("limit", "1"),
            ("featureType", "city"),
            ("polygon_geojson", "0"),
            ("format", "jsonv2"),
        ],
    )
    .map_err(|err| Error::Search(format!("Invalid endpoint {endpoint}: {err}")))
}

/// Extracts the first result's position from a search response body.
/// Returns `None` unless the body is a JSON array whose first element
/// carries both `lat` and `lon`.
///
/// ```
/// use orthoview::search::parse_response;
///
/// let geo = parse_response(r#"[{"lat": "49.6249", "lon": "20.6915", "name": "Nowy Sącz"}]"#).unwrap();
/// assert_eq!(geo.longitude(), 20.6915);
/// assert_eq!(geo.latitude(), 49.6249);
///
/// assert!(parse_response("[]").is_none());
/// assert!(parse_response(r#"{"error": "Unable to geocode"}"#).is_none());
/// ```
pub fn parse_response(body: &str) -> Option<GeoCoord> {
    let results: Vec<serde_json::Value> = serde_json::from_str(body).ok()?;
    let place = Place::deserialize(results.first()?).ok()?;

    let lat = place.lat?.value()?;
    let lon = place.lon?.value()?;

    Some(GeoCoord::new(lon, lat))
}

/// [`PlaceSearch`] over HTTP. Failures of any kind count as no match; the
/// request is never retried.
#[derive(Clone, Debug)]
pub struct NominatimClient {
    client: Client,
    endpoint: String,
}

impl NominatimClient {
    /// Client for the public Nominatim instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Search`] if the HTTP client cannot be built.
    pub fn new() -> Result<NominatimClient, Error> {
        NominatimClient::with_endpoint(NOMINATIM_ENDPOINT)
    }

    /// Client for a self-hosted or mirrored instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Search`] if `endpoint` is not a valid URL or the HTTP
    /// client cannot be built.
    pub fn with_endpoint(endpoint: &str) -> Result<NominatimClient, Error> {
        search_url(endpoint, "")?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| Error::Search(err.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch(&self, query: &str) -> Result<String, Error> {
        let url = search_url(&self.endpoint, query)?;
        debug!("Searching {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| Error::Search(err.to_string()))?;

        response
            .text()
            .await
            .map_err(|err| Error::Search(err.to_string()))
    }
}

#[async_trait]
impl PlaceSearch for NominatimClient {
    async fn search(&self, query: &str) -> Option<GeoCoord> {
        match self.fetch(query).await {
            Ok(body) => parse_response(&body),
            Err(err) => {
                warn!("{err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numeric_coordinates() {
        let geo = parse_response(r#"[{"lat": 50.06, "lon": 19.94}]"#).unwrap();
        assert_eq!(geo, GeoCoord::new(19.94, 50.06));
    }

    #[test]
    fn only_first_result_counts() {
        assert!(parse_response(r#"[{"name": "nowhere"}, {"lat": "1", "lon": "2"}]"#).is_none());
        assert!(parse_response(r#"[{"lat": "1", "lon": "2"}, 42]"#).is_some());
    }

    #[test]
    fn rejects_malformed_bodies() {
        assert!(parse_response("").is_none());
        assert!(parse_response("not json").is_none());
        assert!(parse_response(r#"[{"lat": "abc", "lon": "2"}]"#).is_none());
        assert!(parse_response(r#"[{"lat": "1"}]"#).is_none());
        assert!(parse_response(r#"[null]"#).is_none());
    }

    #[test]
    fn rejects_bad_endpoint() {
        assert!(matches!(search_url("not a url", "Kraków"), Err(Error::Search(_))));
        assert!(NominatimClient::with_endpoint("::").is_err());
    }
}
