use anyhow::{anyhow, Context};
use chrono_tz::Tz;
use std::{env, fs, path::PathBuf, time::Duration};

use crate::{
    models::{default_vacation_table, parse_vacation_table, VacationRange},
    services::{
        calendar::DEFAULT_REGION,
        evaluator::TUESDAY,
        holiday_provider::{DEFAULT_HOLIDAY_API_URL, DEFAULT_REQUEST_TIMEOUT},
    },
};

#[derive(Debug, Clone)]
pub struct Config {
    pub time_zone: Tz,
    pub target_weekday: u8,
    pub holiday_api_url: String,
    pub holiday_region: String,
    pub request_timeout: Duration,
    pub vacations: Vec<VacationRange>,
    pub panel_output_dir: PathBuf,
}

impl Config {
    /// Reads `.env` (if present) and then the process environment.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let time_zone_name = lookup("APP_TIMEZONE").unwrap_or_else(|| "Europe/Berlin".to_string());
        let time_zone: Tz = time_zone_name
            .parse()
            .map_err(|_| anyhow!("Invalid APP_TIMEZONE value: {}", time_zone_name))?;

        let target_weekday = match lookup("TARGET_WEEKDAY") {
            Some(raw) => parse_weekday(&raw)?,
            None => TUESDAY,
        };

        let holiday_api_url =
            lookup("HOLIDAY_API_URL").unwrap_or_else(|| DEFAULT_HOLIDAY_API_URL.to_string());

        let holiday_region = lookup("HOLIDAY_REGION")
            .map(|region| region.trim().to_ascii_uppercase())
            .filter(|region| !region.is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let request_timeout = match lookup("HOLIDAY_API_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| anyhow!("Invalid HOLIDAY_API_TIMEOUT_SECS value: {}", raw))?;
                if secs == 0 {
                    return Err(anyhow!("HOLIDAY_API_TIMEOUT_SECS must be positive"));
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        let vacation_table_path = lookup("VACATION_TABLE_PATH").map(PathBuf::from);
        let vacations = match vacation_table_path {
            Some(path) => {
                let raw = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read vacation table {}", path.display()))?;
                parse_vacation_table(&raw)
                    .with_context(|| format!("Invalid vacation table {}", path.display()))?
            }
            None => default_vacation_table(),
        };

        let panel_output_dir = lookup("PANEL_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| env::temp_dir().join("infoag-extension"));

        Ok(Config {
            time_zone,
            target_weekday,
            holiday_api_url,
            holiday_region,
            request_timeout,
            vacations,
            panel_output_dir,
        })
    }
}

fn parse_weekday(raw: &str) -> anyhow::Result<u8> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|weekday| *weekday <= 6)
        .ok_or_else(|| anyhow!("Invalid TARGET_WEEKDAY value (expected 0=Sunday..6=Saturday): {}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_match_berlin_tuesday_mv() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.time_zone, chrono_tz::Europe::Berlin);
        assert_eq!(config.target_weekday, 2);
        assert_eq!(config.holiday_api_url, "https://feiertage-api.de/api/");
        assert_eq!(config.holiday_region, "MV");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.vacations.len(), 6);
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            ("APP_TIMEZONE", "Asia/Tokyo"),
            ("TARGET_WEEKDAY", "5"),
            ("HOLIDAY_REGION", " by "),
            ("HOLIDAY_API_TIMEOUT_SECS", "3"),
            ("PANEL_OUTPUT_DIR", "/tmp/panels"),
        ])
        .unwrap();
        assert_eq!(config.time_zone, chrono_tz::Asia::Tokyo);
        assert_eq!(config.target_weekday, 5);
        assert_eq!(config.holiday_region, "BY");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.panel_output_dir, PathBuf::from("/tmp/panels"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(config_from(&[("APP_TIMEZONE", "Mars/Olympus")]).is_err());
        assert!(config_from(&[("TARGET_WEEKDAY", "7")]).is_err());
        assert!(config_from(&[("TARGET_WEEKDAY", "Tuesday")]).is_err());
        assert!(config_from(&[("HOLIDAY_API_TIMEOUT_SECS", "0")]).is_err());
        assert!(config_from(&[("HOLIDAY_API_TIMEOUT_SECS", "soon")]).is_err());
    }

    #[test]
    fn vacation_table_is_loaded_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ferien.json");
        fs::write(
            &path,
            r#"[{"name": "Herbstferien", "start": "2025-10-20", "end": "2025-10-24"}]"#,
        )
        .unwrap();

        let config = config_from(&[("VACATION_TABLE_PATH", path.to_str().unwrap())]).unwrap();
        assert_eq!(config.vacations.len(), 1);
        assert_eq!(config.vacations[0].name, "Herbstferien");
        assert_eq!(config.vacations[0].days().len(), 5);
    }

    #[test]
    fn missing_or_broken_vacation_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(config_from(&[("VACATION_TABLE_PATH", missing.to_str().unwrap())]).is_err());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{not json").unwrap();
        assert!(config_from(&[("VACATION_TABLE_PATH", broken.to_str().unwrap())]).is_err());
    }
}
