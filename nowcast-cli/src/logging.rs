use tracing_subscriber::EnvFilter;

const DEBUG_FILTER: &str = "nowcast_core=debug,weather=debug";
const DEFAULT_FILTER: &str = "warn";

/// Filter directives for this run: `--debug` wins, then `RUST_LOG`, then warnings only.
fn filter(debug: bool) -> EnvFilter {
    if debug {
        return EnvFilter::new(DEBUG_FILTER);
    }

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Logs go to stderr so stdout stays the report.
pub fn init(debug: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(debug))
        .with_writer(std::io::stderr)
        .with_target(debug)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_filter_enables_crate_targets() {
        let rendered = filter(true).to_string();
        assert!(rendered.contains("nowcast_core=debug"));
        assert!(rendered.contains("weather=debug"));
    }
}
