//! Location resolution.
//!
//! Exactly one strategy runs per invocation, picked by [`LocationQuery`]:
//! explicit coordinates (with a best-effort reverse lookup for the name),
//! a free-text place name, or the caller's IP address.

use tracing::debug;

use crate::{context::Context, error::Result, model::Location};

pub mod ip;
pub mod nominatim;
pub mod reverse;

pub use ip::locate_by_ip;
pub use nominatim::geocode;
pub use reverse::reverse_geocode;

/// What the user asked for, in priority order.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    Coordinates { latitude: f64, longitude: f64 },
    Name(String),
    Auto,
}

impl LocationQuery {
    /// Build a query from optional command-line values.
    ///
    /// Coordinates win when at least one of them is non-zero, then a
    /// non-blank name, then IP lookup.
    pub fn from_flags(latitude: Option<f64>, longitude: Option<f64>, name: Option<&str>) -> Self {
        let latitude = latitude.unwrap_or(0.0);
        let longitude = longitude.unwrap_or(0.0);

        if latitude != 0.0 || longitude != 0.0 {
            return LocationQuery::Coordinates {
                latitude,
                longitude,
            };
        }

        match name.map(str::trim) {
            Some(name) if !name.is_empty() => LocationQuery::Name(name.to_owned()),
            _ => LocationQuery::Auto,
        }
    }
}

/// Resolve a query into a [`Location`].
pub async fn resolve(ctx: &Context, query: &LocationQuery) -> Result<Location> {
    debug!(?query, "resolving location");

    let location = match query {
        LocationQuery::Coordinates {
            latitude,
            longitude,
        } => from_coordinates(ctx, *latitude, *longitude).await,
        LocationQuery::Name(name) => geocode(ctx, name).await?,
        LocationQuery::Auto => locate_by_ip(ctx).await?,
    };

    debug!(
        "resolved location: {} at ({}, {})",
        location.description, location.latitude, location.longitude
    );
    Ok(location)
}

/// Coordinates never fail to resolve; a missing name falls back to "Lat X, Lon Y".
async fn from_coordinates(ctx: &Context, latitude: f64, longitude: f64) -> Location {
    let description = match reverse_geocode(ctx, latitude, longitude).await {
        Ok(Some(name)) => name,
        Ok(None) => {
            debug!("reverse geocoding returned no name, using coordinates");
            Location::coordinates_description(latitude, longitude)
        }
        Err(err) => {
            debug!("reverse geocoding failed: {err}, using coordinates");
            Location::coordinates_description(latitude, longitude)
        }
    };

    Location::new(description, latitude, longitude)
}
