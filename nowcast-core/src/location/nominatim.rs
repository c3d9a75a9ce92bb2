use serde::Deserialize;
use tracing::debug;

use crate::{
    context::Context,
    error::{Result, WeatherError},
    http::{fill_template, get_json},
    model::Location,
};

/// One candidate from the Nominatim search API; coordinates arrive as strings.
#[derive(Debug, Deserialize)]
pub(crate) struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

fn parse_coordinate(field: &'static str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|source| WeatherError::InvalidCoordinate {
            field,
            value: value.to_owned(),
            source,
        })
}

/// Take the best (first) candidate.
pub(crate) fn first_location(places: Vec<NominatimPlace>, query: &str) -> Result<Location> {
    let place = places
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::NotFound {
            query: query.to_owned(),
        })?;

    Ok(Location::new(
        place.display_name,
        parse_coordinate("lat", &place.lat)?,
        parse_coordinate("lon", &place.lon)?,
    ))
}

/// Forward-geocode a free-text place name.
pub async fn geocode(ctx: &Context, query: &str) -> Result<Location> {
    debug!("geocoding location name: {query}");

    let escaped = urlencoding::encode(query);
    let url = fill_template(&ctx.config().endpoints.geocode, &[("query", escaped.as_ref())]);
    let places: Vec<NominatimPlace> = get_json(ctx.http(), &url).await?;

    debug!(candidates = places.len(), "geocoding finished");
    first_location(places, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(lat: &str, lon: &str, name: &str) -> NominatimPlace {
        NominatimPlace {
            lat: lat.into(),
            lon: lon.into(),
            display_name: name.into(),
        }
    }

    #[test]
    fn first_candidate_wins() {
        let loc = first_location(
            vec![
                place("52.3730796", "4.8924534", "Amsterdam, Noord-Holland, Nederland"),
                place("42.9", "-74.2", "Amsterdam, New York, United States"),
            ],
            "Amsterdam",
        )
        .unwrap();

        assert_eq!(loc.description, "Amsterdam, Noord-Holland, Nederland");
        assert!((loc.latitude - 52.3730796).abs() < 1e-9);
        assert!((loc.longitude - 4.8924534).abs() < 1e-9);
    }

    #[test]
    fn no_candidates_is_not_found() {
        let err = first_location(vec![], "Atlantis").unwrap_err();
        match err {
            WeatherError::NotFound { query } => assert_eq!(query, "Atlantis"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unparsable_coordinate_is_an_error() {
        let err = first_location(vec![place("52.1", "east", "Somewhere")], "x").unwrap_err();
        assert!(matches!(
            err,
            WeatherError::InvalidCoordinate { field: "lon", .. }
        ));
    }
}
