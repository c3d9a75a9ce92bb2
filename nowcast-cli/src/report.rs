use nowcast_core::{
    Forecast, Location, ProviderId, SeriesColor, comparison_series, rain_summary,
};
use ratatui::crossterm::style::{Color, Stylize};

use crate::chart::{AxisLabels, ChartRenderer};

fn term_color(color: SeriesColor) -> Color {
    match color {
        SeriesColor::Cyan => Color::Cyan,
        SeriesColor::Purple => Color::Magenta,
        SeriesColor::Yellow => Color::Yellow,
    }
}

/// Everything printed for one invocation.
#[derive(Debug)]
pub struct Report<'a> {
    pub location: &'a Location,
    pub primary: (ProviderId, &'a Forecast),
    pub comparison: Option<(ProviderId, &'a Forecast)>,
}

impl<'a> Report<'a> {
    pub fn new(
        location: &'a Location,
        primary: (ProviderId, &'a Forecast),
        comparison: Option<(ProviderId, &'a Forecast)>,
    ) -> Self {
        Self {
            location,
            primary,
            comparison,
        }
    }

    fn legend(&self) -> String {
        let names = std::iter::once(self.primary.0)
            .chain(self.comparison.map(|(id, _)| id))
            .enumerate()
            .map(|(i, id)| {
                id.display_name()
                    .with(term_color(SeriesColor::nth(i)))
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join(", ");

        format!("Next 2 hours ({names})")
    }

    /// Temperature from whichever forecast carries one, primary first.
    fn temperature(&self) -> Option<i32> {
        self.primary
            .1
            .temperature
            .or_else(|| self.comparison.and_then(|(_, f)| f.temperature))
    }

    pub fn render(&self, chart: &dyn ChartRenderer) -> String {
        let (primary_id, primary) = self.primary;

        let mut lines = vec![
            format!("Weather in {}", self.location.description)
                .bold()
                .to_string(),
            self.legend(),
        ];
        if let Some(description) = primary.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(description.to_string());
        }
        lines.push(rain_summary(primary));
        if let Some(temperature) = self.temperature() {
            lines.push(format!("Temperature: {temperature}°C"));
        }

        let series = comparison_series(
            (primary_id.display_name(), primary),
            self.comparison
                .map(|(id, forecast)| (id.display_name(), forecast)),
        );

        let mut out = lines.join("\n");
        out.push('\n');
        out.push_str(&chart.render(&series, &AxisLabels::default()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration};
    use nowcast_core::{ForecastPoint, Series};
    use std::cell::RefCell;

    /// Records what it was asked to draw.
    #[derive(Default)]
    struct RecordingChart {
        seen: RefCell<Vec<Series>>,
    }

    impl ChartRenderer for RecordingChart {
        fn render(&self, series: &[Series], axes: &AxisLabels) -> String {
            assert_eq!(axes.y_unit, "mm");
            self.seen.borrow_mut().extend_from_slice(series);
            "<chart>\n".to_string()
        }
    }

    fn forecast(rates: &[f64]) -> Forecast {
        let start = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        Forecast {
            points: rates
                .iter()
                .enumerate()
                .map(|(i, r)| ForecastPoint::new(start + Duration::minutes(5 * (i as i64 + 1)), *r))
                .collect(),
            ..Forecast::default()
        }
    }

    #[test]
    fn report_lists_header_summary_and_chart() {
        let location = Location::new("Amsterdam", 52.37, 4.9);
        let mut primary = forecast(&[0.1, 0.2]);
        primary.description = Some("Light rain for the next hour".into());
        let chart = RecordingChart::default();

        let out = Report::new(&location, (ProviderId::Buienalarm, &primary), None).render(&chart);

        assert!(out.contains("Weather in Amsterdam"));
        assert!(out.contains("Buienalarm"));
        assert!(out.contains("Light rain for the next hour"));
        assert!(out.contains("Light rain expected."));
        assert!(!out.contains("Temperature"));
        assert!(out.ends_with("<chart>\n"));
        assert_eq!(chart.seen.borrow().len(), 1);
    }

    #[test]
    fn comparison_is_truncated_and_coloured() {
        let location = Location::new("Utrecht", 52.09, 5.12);
        let primary = forecast(&[0.0, 0.0]);
        let mut secondary = forecast(&[0.0, 0.0, 2.0, 2.0]);
        secondary.temperature = Some(9);
        let chart = RecordingChart::default();

        let out = Report::new(
            &location,
            (ProviderId::Buienalarm, &primary),
            Some((ProviderId::Buienradar, &secondary)),
        )
        .render(&chart);

        assert!(out.contains("Buienradar"));
        assert!(out.contains("No rain expected."));
        assert!(out.contains("Temperature: 9°C"));

        let seen = chart.seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].points.len(), 2);
        assert_eq!(seen[1].color, SeriesColor::Purple);
    }

    #[test]
    fn each_section_is_on_its_own_line() {
        let location = Location::new("Leiden", 52.16, 4.49);
        let mut primary = forecast(&[0.5]);
        primary.description = Some("Showers".into());
        primary.temperature = Some(11);

        let out = Report::new(&location, (ProviderId::Buienradar, &primary), None)
            .render(&RecordingChart::default());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("Weather in Leiden"));
        assert!(lines[1].starts_with("Next 2 hours ("));
        assert_eq!(lines[2], "Showers");
        assert_eq!(lines[3], "Moderate rain expected.");
        assert_eq!(lines[4], "Temperature: 11°C");
        assert_eq!(lines[5], "<chart>");
    }
}
