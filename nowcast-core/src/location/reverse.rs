use serde::Deserialize;
use tracing::debug;

use crate::{
    context::Context,
    error::Result,
    http::{fill_template, get_json},
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ReverseGeocodeResponse {
    locality: String,
    city: String,
}

impl ReverseGeocodeResponse {
    /// Locality, or the city when the locality is blank.
    pub(crate) fn place_name(self) -> Option<String> {
        [self.locality, self.city]
            .into_iter()
            .map(|s| s.trim().to_owned())
            .find(|s| !s.is_empty())
    }
}

/// Look up a human-readable name for a coordinate pair.
///
/// `Ok(None)` means the service answered but had no name for the spot.
pub async fn reverse_geocode(ctx: &Context, latitude: f64, longitude: f64) -> Result<Option<String>> {
    debug!("reverse geocoding lat {latitude:.2}, lon {longitude:.2}");

    let lat = format!("{latitude:.2}");
    let lon = format!("{longitude:.2}");
    let url = fill_template(
        &ctx.config().endpoints.reverse_geocode,
        &[("lat", lat.as_str()), ("lon", lon.as_str())],
    );
    let response: ReverseGeocodeResponse = get_json(ctx.http(), &url).await?;

    Ok(response.place_name())
}
