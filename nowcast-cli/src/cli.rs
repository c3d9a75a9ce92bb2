use anyhow::Context as _;
use clap::{Parser, Subcommand};
use nowcast_core::{Config, Context, Forecast, LocationQuery, ProviderId, fetch_forecast, resolve};
use tracing::debug;

use crate::{chart::TerminalChart, configure, logging, report::Report};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    disable_version_flag = true,
    about = "Rain nowcast for the next two hours",
    long_about = "Shows the rain nowcast for the next two hours as a terminal chart.\n\
                  By default the location is guessed from your IP address; it can also \
                  be given as coordinates or as a place name."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Latitude of the location.
    #[arg(short = 'a', long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the location.
    #[arg(short = 'o', long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Location name, e.g. 'Amsterdam'.
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Forecast provider to use instead of the configured one.
    #[arg(short = 'p', long)]
    pub provider: Option<ProviderId>,

    /// Provider to draw next to the primary one.
    #[arg(short = 'c', long, conflicts_with = "no_compare")]
    pub compare: Option<ProviderId>,

    /// Only show the primary provider.
    #[arg(long)]
    pub no_compare: bool,

    /// Print debug information.
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Print version and exit.
    #[arg(short = 'v', long)]
    pub version: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Choose default providers and the message language.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        if self.version {
            println!("{}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }

        logging::init(self.debug);

        match self.command {
            Some(Command::Configure) => configure::run(),
            None => self.show().await,
        }
    }

    /// Apply one-off flag overrides on top of the stored config.
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(provider) = self.provider {
            config.primary_provider = provider;
        }
        if self.no_compare {
            config.set_comparison(None);
        } else if let Some(compare) = self.compare {
            config.set_comparison(Some(compare));
        }
    }

    fn location_query(&self) -> LocationQuery {
        LocationQuery::from_flags(self.lat, self.lon, self.name.as_deref())
    }

    async fn show(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        self.apply_overrides(&mut config);
        let ctx = Context::new(config)?;

        let location = resolve(&ctx, &self.location_query())
            .await
            .context("Failed to resolve location")?;

        let primary_id = ctx.config().primary_provider;
        let primary = fetch(&ctx, primary_id, location.latitude, location.longitude).await?;

        let comparison = match ctx.config().comparison() {
            Some(id) => Some((id, fetch(&ctx, id, location.latitude, location.longitude).await?)),
            None => None,
        };

        let report = Report::new(
            &location,
            (primary_id, &primary),
            comparison.as_ref().map(|(id, forecast)| (*id, forecast)),
        );
        print!("{}", report.render(&TerminalChart::fit_terminal()));

        Ok(())
    }
}

async fn fetch(ctx: &Context, id: ProviderId, latitude: f64, longitude: f64) -> anyhow::Result<Forecast> {
    let forecast = fetch_forecast(ctx, id, latitude, longitude)
        .await
        .with_context(|| format!("Failed to fetch {} forecast", id.display_name()))?;

    debug!(provider = %id, points = forecast.points.len(), "forecast fetched");
    Ok(forecast)
}
