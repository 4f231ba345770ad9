//! Google Maps web-service client for route distances and place suggestions.
//!
//! This module wraps a blocking HTTP client and keeps the JSON response shapes
//! private; callers only see [`RouteLookupResult`] and plain address strings.

use std::time::Duration;

use reqwest::{blocking::Client, Url};
use serde::Deserialize;

use super::{RouteLookup, RouteLookupResult};
use crate::error::LookupError;
use crate::places::PlaceSuggester;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api";

/// Thin HTTP client for the Distance Matrix, Directions and Place Autocomplete
/// services.
#[derive(Debug, Clone)]
pub struct GoogleMapsClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GoogleMapsClient {
    pub fn new(api_key: &str) -> Result<Self, LookupError> {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key)
    }

    /// Create a client against a custom base URL (e.g. a local mock server).
    pub fn with_endpoint(endpoint: &str, api_key: &str) -> Result<Self, LookupError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn service_url(&self, service: &str, params: &[(&str, &str)]) -> Result<Url, LookupError> {
        let base = format!("{}/{}/json", self.endpoint, service);
        let mut url = Url::parse(&base)
            .map_err(|err| LookupError::Malformed(format!("failed to build maps URL: {err}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    fn distance_matrix(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Option<RouteLookupResult>, LookupError> {
        let url = self.service_url(
            "distancematrix",
            &[
                ("origins", origin),
                ("destinations", destination),
                ("mode", "driving"),
                ("units", "metric"),
            ],
        )?;
        let parsed: DistanceMatrixResponse = self.client.get(url).send()?.json()?;
        parse_distance_matrix(parsed)
    }

    fn directions(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Option<RouteLookupResult>, LookupError> {
        let url = self.service_url(
            "directions",
            &[
                ("origin", origin),
                ("destination", destination),
                ("mode", "driving"),
                ("units", "metric"),
            ],
        )?;
        let parsed: DirectionsResponse = self.client.get(url).send()?.json()?;
        parse_directions(parsed)
    }

    fn autocomplete(&self, partial: &str, country: &str) -> Result<Vec<String>, LookupError> {
        let components = format!("country:{country}");
        let url = self.service_url(
            "place/autocomplete",
            &[("input", partial), ("components", &components)],
        )?;
        let parsed: AutocompleteResponse = self.client.get(url).send()?.json()?;
        parse_autocomplete(parsed)
    }
}

impl RouteLookup for GoogleMapsClient {
    /// Distance Matrix first; if it has no usable element, ask Directions.
    fn lookup(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Option<RouteLookupResult>, LookupError> {
        match self.distance_matrix(origin, destination) {
            Ok(Some(route)) => return Ok(Some(route)),
            Ok(None) => tracing::debug!("distance matrix had no route; trying directions"),
            Err(error) => tracing::warn!(%error, "distance matrix failed; trying directions"),
        }
        self.directions(origin, destination)
    }
}

impl PlaceSuggester for GoogleMapsClient {
    fn suggest(&self, partial: &str, country: &str) -> Vec<String> {
        if partial.is_empty() {
            return Vec::new();
        }
        self.autocomplete(partial, country).unwrap_or_else(|error| {
            tracing::warn!(%error, "place autocomplete failed");
            Vec::new()
        })
    }
}

#[derive(Deserialize)]
struct TextValue {
    text: String,
    value: u64,
}

#[derive(Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    #[serde(default)]
    rows: Vec<DistanceMatrixRow>,
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct DistanceMatrixRow {
    #[serde(default)]
    elements: Vec<DistanceMatrixElement>,
}

#[derive(Deserialize)]
struct DistanceMatrixElement {
    status: String,
    distance: Option<TextValue>,
    duration: Option<TextValue>,
}

#[derive(Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Deserialize)]
struct DirectionsRoute {
    #[serde(default)]
    legs: Vec<DirectionsLeg>,
}

#[derive(Deserialize)]
struct DirectionsLeg {
    distance: Option<TextValue>,
    duration: Option<TextValue>,
}

#[derive(Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    predictions: Vec<AutocompletePrediction>,
}

#[derive(Deserialize)]
struct AutocompletePrediction {
    description: String,
}

fn parse_distance_matrix(
    resp: DistanceMatrixResponse,
) -> Result<Option<RouteLookupResult>, LookupError> {
    if resp.status != "OK" {
        let detail = match resp.error_message {
            Some(message) => format!("{}: {message}", resp.status),
            None => resp.status,
        };
        return Err(LookupError::Api(detail));
    }

    let Some(element) = resp
        .rows
        .into_iter()
        .next()
        .and_then(|row| row.elements.into_iter().next())
    else {
        return Ok(None);
    };

    if element.status != "OK" {
        tracing::debug!(status = %element.status, "distance matrix element not OK");
        return Ok(None);
    }

    match (element.distance, element.duration) {
        (Some(distance), Some(duration)) => Ok(Some(RouteLookupResult {
            distance_text: distance.text,
            distance_meters: distance.value,
            duration_text: duration.text,
            duration_seconds: duration.value,
        })),
        _ => Ok(None),
    }
}

fn parse_directions(resp: DirectionsResponse) -> Result<Option<RouteLookupResult>, LookupError> {
    if resp.status != "OK" {
        return Err(LookupError::Api(resp.status));
    }

    let Some(leg) = resp
        .routes
        .into_iter()
        .next()
        .and_then(|route| route.legs.into_iter().next())
    else {
        return Ok(None);
    };

    // A leg without distance/duration still counts as a route, reported as zero.
    let (distance_text, distance_meters) = leg
        .distance
        .map(|d| (d.text, d.value))
        .unwrap_or_else(|| ("0 km".to_string(), 0));
    let (duration_text, duration_seconds) = leg
        .duration
        .map(|d| (d.text, d.value))
        .unwrap_or_else(|| ("0 min".to_string(), 0));

    Ok(Some(RouteLookupResult {
        distance_text,
        distance_meters,
        duration_text,
        duration_seconds,
    }))
}

fn parse_autocomplete(resp: AutocompleteResponse) -> Result<Vec<String>, LookupError> {
    match resp.status.as_str() {
        "OK" => Ok(resp
            .predictions
            .into_iter()
            .map(|prediction| prediction.description)
            .collect()),
        "ZERO_RESULTS" => Ok(Vec::new()),
        _ => Err(LookupError::Api(resp.status)),
    }
}
