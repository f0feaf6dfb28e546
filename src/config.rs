//! Runtime configuration, read from environment variables.

use std::time::Duration;

use crate::error::ConfigError;
use crate::render::{Layout, MAX_COLUMNS};
use crate::schedule::DEFAULT_SCHEDULE_URL;

// Narrow enough for two columns on a classic 80-column terminal
const DEFAULT_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub schedule_url: String,
    /// Unset means the request may take as long as it needs
    pub timeout: Option<Duration>,
    pub columns: Option<usize>,
    pub width: usize,
    pub log_format: LogFormat,
}

impl Config {
    /// Read the environment, falling back to the size of the attached terminal for the width.
    pub fn from_env() -> Result<Self, ConfigError> {
        let terminal_width = crossterm::terminal::size().ok().map(|(cols, _)| cols);
        Self::resolve(|key| std::env::var(key).ok(), terminal_width)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve(lookup, None)
    }

    /// Width precedence: `SCOREBOARD_WIDTH`, the measured terminal, `COLUMNS`, then the default.
    pub fn resolve<F>(lookup: F, terminal_width: Option<u16>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let schedule_url = get("SCHEDULE_URL").unwrap_or_else(|| DEFAULT_SCHEDULE_URL.to_string());

        let timeout = match get("SCHEDULE_TIMEOUT_SECS") {
            Some(v) => Some(Duration::from_secs(parse_number(
                "SCHEDULE_TIMEOUT_SECS",
                "a whole number of seconds",
                &v,
            )?)),
            None => None,
        };

        let columns = match get("SCOREBOARD_COLUMNS") {
            Some(v) => {
                let n = parse_number("SCOREBOARD_COLUMNS", "1, 2 or 3", &v)? as usize;
                if n == 0 || n > MAX_COLUMNS {
                    return Err(invalid("SCOREBOARD_COLUMNS", "1, 2 or 3", v));
                }
                Some(n)
            }
            None => None,
        };

        let width = match (get("SCOREBOARD_WIDTH"), terminal_width) {
            (Some(v), _) => parse_number("SCOREBOARD_WIDTH", "a terminal width in characters", &v)? as usize,
            (None, Some(cols)) if cols > 0 => cols as usize,
            // Shells rarely export COLUMNS, but honour it when they do
            _ => match get("COLUMNS") {
                Some(v) => parse_number("COLUMNS", "a terminal width in characters", &v)? as usize,
                None => DEFAULT_WIDTH,
            },
        };

        let log_format = match get("LOG_FORMAT").map(|v| v.to_ascii_lowercase()).as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => return Err(invalid("LOG_FORMAT", "\"json\" or \"pretty\"", other.to_string())),
        };

        Ok(Config { schedule_url, timeout, columns, width, log_format })
    }

    pub fn layout(&self) -> Layout {
        match self.columns {
            Some(n) => Layout::fixed(n),
            None => Layout::for_width(self.width),
        }
    }
}

fn parse_number(key: &'static str, expected: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| invalid(key, expected, value.to_string()))
}

fn invalid(key: &'static str, expected: &'static str, value: String) -> ConfigError {
    ConfigError::Invalid { key, expected, value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.schedule_url, "http://localhost:3000/schedules");
        assert_eq!(cfg.timeout, None);
        assert_eq!(cfg.log_format, LogFormat::Pretty);
        assert_eq!(cfg.width, 80);
        assert_eq!(cfg.layout().columns(), 2);
    }

    #[test]
    fn default_layout_fits_an_80_column_terminal() {
        use crate::render::render;
        use crate::state::ViewState;

        let cfg = Config::from_lookup(|_| None).unwrap();
        let grid = render(&ViewState::initial(), cfg.layout());
        let widest = grid.to_string().lines().map(|l| l.chars().count()).max().unwrap_or(0);
        assert!(widest <= 80, "grid is {widest} chars wide");
    }

    #[test]
    fn measured_terminal_width_drives_layout() {
        let cfg = Config::resolve(lookup(&[]), Some(70)).unwrap();
        assert_eq!(cfg.layout().columns(), 2);

        let cfg = Config::resolve(lookup(&[]), Some(40)).unwrap();
        assert_eq!(cfg.layout().columns(), 1);

        // The measured size beats a stale COLUMNS, an explicit width beats both
        let cfg = Config::resolve(lookup(&[("COLUMNS", "200")]), Some(40)).unwrap();
        assert_eq!(cfg.layout().columns(), 1);
        let cfg = Config::resolve(lookup(&[("SCOREBOARD_WIDTH", "120")]), Some(40)).unwrap();
        assert_eq!(cfg.layout().columns(), 3);
    }

    #[test]
    fn explicit_columns_override_width() {
        let cfg = Config::from_lookup(lookup(&[("SCOREBOARD_COLUMNS", "1"), ("COLUMNS", "200")])).unwrap();
        assert_eq!(cfg.layout().columns(), 1);

        let cfg = Config::from_lookup(lookup(&[("COLUMNS", "70")])).unwrap();
        assert_eq!(cfg.layout().columns(), 2);
    }

    #[test]
    fn rejects_bad_values() {
        let err = Config::from_lookup(lookup(&[("SCOREBOARD_COLUMNS", "4")])).unwrap_err();
        assert!(err.to_string().starts_with("SCOREBOARD_COLUMNS must be"), "{err}");

        let err = Config::from_lookup(lookup(&[("SCHEDULE_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "SCHEDULE_TIMEOUT_SECS", .. }));

        let err = Config::from_lookup(lookup(&[("COLUMNS", "wide")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "COLUMNS", .. }), "{err}");
        let err = Config::from_lookup(lookup(&[("SCOREBOARD_WIDTH", "wide")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "SCOREBOARD_WIDTH", .. }), "{err}");

        assert!(Config::from_lookup(lookup(&[("LOG_FORMAT", "xml")])).is_err());
        let cfg = Config::from_lookup(lookup(&[("LOG_FORMAT", "JSON"), ("SCHEDULE_TIMEOUT_SECS", "5")])).unwrap();
        assert_eq!(cfg.log_format, LogFormat::Json);
        assert_eq!(cfg.timeout, Some(Duration::from_secs(5)));
    }
}
