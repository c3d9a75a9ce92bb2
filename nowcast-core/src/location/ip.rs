use serde::Deserialize;
use tracing::debug;

use crate::{context::Context, error::Result, http::get_json, model::Location};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Names {
    en: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Named {
    names: Names,
}

#[derive(Debug, Deserialize)]
struct GeoPoint {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    accuracy_radius: u32,
}

/// City-level IP geolocation document.
#[derive(Debug, Deserialize)]
pub(crate) struct IpGeolocationResponse {
    #[serde(default)]
    city: Named,
    #[serde(default)]
    country: Named,
    location: GeoPoint,
}

impl IpGeolocationResponse {
    pub(crate) fn into_location(self) -> Location {
        let place = [self.city.names.en, self.country.names.en]
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        let description = if place.is_empty() {
            format!(
                "{} (±{}m)",
                Location::coordinates_description(self.location.latitude, self.location.longitude),
                self.location.accuracy_radius
            )
        } else {
            format!("{place} (±{}m)", self.location.accuracy_radius)
        };

        Location::new(description, self.location.latitude, self.location.longitude)
    }
}

/// Locate the caller from the IP address the service sees.
pub async fn locate_by_ip(ctx: &Context) -> Result<Location> {
    debug!("locating by IP address");

    let response: IpGeolocationResponse =
        get_json(ctx.http(), &ctx.config().endpoints.ip_geolocation).await?;

    Ok(response.into_location())
}
