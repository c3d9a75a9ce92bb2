use anyhow::{Context, Result};
use inquire::Select;
use nowcast_core::{Config, MessageLanguage, ProviderId};

const NO_COMPARISON: &str = "none";

fn comparison_choices(primary: ProviderId) -> Vec<String> {
    ProviderId::all()
        .iter()
        .filter(|id| **id != primary)
        .map(ProviderId::to_string)
        .chain(std::iter::once(NO_COMPARISON.to_string()))
        .collect()
}

fn starting_index<T: PartialEq>(options: &[T], current: &T) -> usize {
    options.iter().position(|o| o == current).unwrap_or(0)
}

/// Interactively choose providers and message language, then save the config.
pub fn run() -> Result<()> {
    let mut config = Config::load()?;

    let providers = ProviderId::all().to_vec();
    let primary = Select::new("Primary forecast provider:", providers.clone())
        .with_starting_cursor(starting_index(&providers, &config.primary_provider))
        .prompt()
        .context("Provider selection cancelled")?;
    config.primary_provider = primary;

    let choices = comparison_choices(primary);
    let current = config
        .comparison()
        .map(|id| id.to_string())
        .unwrap_or_else(|| NO_COMPARISON.to_string());
    let compare = Select::new("Provider to compare against:", choices.clone())
        .with_starting_cursor(starting_index(&choices, &current))
        .prompt()
        .context("Comparison selection cancelled")?;
    config.set_comparison(match compare.as_str() {
        NO_COMPARISON => None,
        other => Some(ProviderId::try_from(other)?),
    });

    let languages = MessageLanguage::all().to_vec();
    config.language = Select::new("Forecast message language:", languages.clone())
        .with_starting_cursor(starting_index(&languages, &config.language))
        .prompt()
        .context("Language selection cancelled")?;

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_choices_skip_primary_and_offer_none() {
        let choices = comparison_choices(ProviderId::Buienalarm);
        assert_eq!(choices, vec!["buienalarm-classic", "buienradar", "none"]);
    }

    #[test]
    fn starting_index_defaults_to_first() {
        let options = vec!["a", "b"];
        assert_eq!(starting_index(&options, &"b"), 1);
        assert_eq!(starting_index(&options, &"z"), 0);
    }
}
